//! Dashboard aggregation shaping
//!
//! Turns the server's day-bucketed visitor report into chart points and
//! summary figures. Nothing here is authoritative: the backend owns the
//! numbers, this only reshapes them.

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Visit, VisitorReportBucket};
use std::collections::HashSet;

/// Number of trailing buckets shown in the trend chart
pub const TREND_WINDOW: usize = 7;

/// Estimated customer share of visits when the report carries no split.
///
/// This is a guess, not a measurement. Points that use it are flagged
/// `estimated` so the chart can label them.
pub const DEFAULT_CUSTOMER_SHARE: f64 = 0.8;

/// Customer/staff breakdown of a bucket's visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitSplit {
    pub customers: i64,
    pub staff: i64,
    /// Derived from the share heuristic rather than reported by the server
    pub estimated: bool,
}

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub total_visits: i64,
    pub unique_visitors: i64,
    pub repeat_visitors: i64,
    pub split: VisitSplit,
}

/// Today's headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitSummary {
    pub today_visits: i64,
    pub unique_visitors: i64,
    /// Percent change against the previous bucket
    pub visits_trend: Option<f64>,
    /// `false` when counted locally from raw visits
    pub from_report: bool,
}

/// Visits beyond the first per visitor; never negative
pub fn repeat_visitors(total: i64, unique: i64) -> i64 {
    total.saturating_sub(unique).max(0)
}

/// Split a bucket's visits between customers and staff.
///
/// A reported split wins (a single reported side implies the other). Reported
/// sides are clamped to `0..=total` and never sum past the total. Without a
/// split, `customer_share` of the total goes to customers.
pub fn split_visits(bucket: &VisitorReportBucket, customer_share: f64) -> VisitSplit {
    let total = bucket.total_visits.max(0);
    let clamp = |n: i64| n.clamp(0, total);
    match (bucket.customer_visits, bucket.staff_visits) {
        (Some(customers), Some(staff)) => {
            let customers = clamp(customers);
            VisitSplit {
                customers,
                staff: clamp(staff).min(total - customers),
                estimated: false,
            }
        }
        (Some(customers), None) => {
            let customers = clamp(customers);
            VisitSplit {
                customers,
                staff: total - customers,
                estimated: false,
            }
        }
        (None, Some(staff)) => {
            let staff = clamp(staff);
            VisitSplit {
                customers: total - staff,
                staff,
                estimated: false,
            }
        }
        (None, None) => {
            let share = customer_share.clamp(0.0, 1.0);
            let customers = (total as f64 * share).round() as i64;
            VisitSplit {
                customers,
                staff: total - customers,
                estimated: true,
            }
        }
    }
}

/// Chart points for the last [`TREND_WINDOW`] buckets, oldest first
pub fn trend_points(buckets: &[VisitorReportBucket], customer_share: f64) -> Vec<TrendPoint> {
    let start = buckets.len().saturating_sub(TREND_WINDOW);
    buckets[start..]
        .iter()
        .map(|b| TrendPoint {
            period: b.period.clone(),
            total_visits: b.total_visits,
            unique_visitors: b.unique_visitors,
            repeat_visitors: repeat_visitors(b.total_visits, b.unique_visitors),
            split: split_visits(b, customer_share),
        })
        .collect()
}

/// Percent change from `previous` to `current`, one decimal.
/// `None` when there is no baseline.
pub fn trend_percent(current: i64, previous: i64) -> Option<f64> {
    if previous <= 0 {
        return None;
    }
    let pct = (current - previous) as f64 / previous as f64 * 100.0;
    Some((pct * 10.0).round() / 10.0)
}

/// Visits whose timestamp falls on `day` (UTC)
pub fn visits_on(visits: &[Visit], day: NaiveDate) -> impl Iterator<Item = &Visit> {
    visits
        .iter()
        .filter(move |v| v.timestamp.date_naive() == day)
}

/// Calendar day a bucket covers, read from the leading `YYYY-MM-DD` of its
/// period. `None` for periods in any other shape.
pub fn bucket_day(bucket: &VisitorReportBucket) -> Option<NaiveDate> {
    let date = bucket.period.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Headline figures for `today`.
///
/// Uses the report's last bucket when it covers `today` (a period that is not
/// a date is taken as today). When the report has no bucket for today or it
/// yields zero visits, the figures are counted from `visits` instead.
pub fn summarize(
    buckets: &[VisitorReportBucket],
    visits: &[Visit],
    today: NaiveDate,
) -> VisitSummary {
    let latest = buckets
        .last()
        .filter(|b| bucket_day(b).is_none_or(|day| day == today));
    match latest {
        Some(last) if last.total_visits > 0 => {
            let previous = buckets
                .len()
                .checked_sub(2)
                .map(|i| buckets[i].total_visits);
            VisitSummary {
                today_visits: last.total_visits,
                unique_visitors: last.unique_visitors,
                visits_trend: previous.and_then(|p| trend_percent(last.total_visits, p)),
                from_report: true,
            }
        }
        _ => {
            let todays: Vec<&Visit> = visits_on(visits, today).collect();
            let unique: HashSet<_> = todays
                .iter()
                .map(|v| (v.person_type, v.person_id))
                .collect();
            VisitSummary {
                today_visits: todays.len() as i64,
                unique_visitors: unique.len() as i64,
                visits_trend: None,
                from_report: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::PersonType;

    fn bucket(period: &str, total: i64, unique: i64) -> VisitorReportBucket {
        VisitorReportBucket {
            period: period.to_string(),
            total_visits: total,
            unique_visitors: unique,
            customer_visits: None,
            staff_visits: None,
        }
    }

    fn visit(id: i64, person_id: i64, day: u32, hour: u32) -> Visit {
        Visit {
            id,
            person_id,
            person_type: PersonType::Customer,
            site_id: 1,
            timestamp: Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_repeat_visitors_never_negative() {
        assert_eq!(repeat_visitors(10, 4), 6);
        assert_eq!(repeat_visitors(4, 4), 0);
        assert_eq!(repeat_visitors(3, 9), 0);
        assert_eq!(repeat_visitors(i64::MIN + 1, 0), 0);
        for total in -5..20 {
            for unique in -5..20 {
                assert!(repeat_visitors(total, unique) >= 0);
            }
        }
    }

    #[test]
    fn test_estimated_split() {
        let split = split_visits(&bucket("d", 10, 8), DEFAULT_CUSTOMER_SHARE);
        assert_eq!(
            split,
            VisitSplit {
                customers: 8,
                staff: 2,
                estimated: true
            }
        );

        // Rounds, and the two sides always sum to the total
        let split = split_visits(&bucket("d", 7, 7), DEFAULT_CUSTOMER_SHARE);
        assert_eq!((split.customers, split.staff), (6, 1));

        let split = split_visits(&bucket("d", 5, 5), 1.5);
        assert_eq!((split.customers, split.staff), (5, 0));
    }

    #[test]
    fn test_reported_split_wins() {
        let mut b = bucket("d", 10, 8);
        b.customer_visits = Some(3);
        b.staff_visits = Some(7);
        assert_eq!(
            split_visits(&b, DEFAULT_CUSTOMER_SHARE),
            VisitSplit {
                customers: 3,
                staff: 7,
                estimated: false
            }
        );

        b.staff_visits = None;
        let split = split_visits(&b, DEFAULT_CUSTOMER_SHARE);
        assert_eq!((split.customers, split.staff, split.estimated), (3, 7, false));
    }

    #[test]
    fn test_reported_split_is_clamped_to_total() {
        let split_of = |customers: Option<i64>, staff: Option<i64>| {
            let mut b = bucket("d", 10, 8);
            b.customer_visits = customers;
            b.staff_visits = staff;
            let split = split_visits(&b, DEFAULT_CUSTOMER_SHARE);
            assert!(!split.estimated);
            (split.customers, split.staff)
        };

        assert_eq!(split_of(Some(-4), None), (0, 10));
        assert_eq!(split_of(Some(14), None), (10, 0));
        assert_eq!(split_of(None, Some(-1)), (10, 0));
        assert_eq!(split_of(None, Some(25)), (0, 10));
        assert_eq!(split_of(Some(12), Some(3)), (10, 0));
        assert_eq!(split_of(Some(-2), Some(-3)), (0, 0));
        assert_eq!(split_of(Some(4), Some(6)), (4, 6));
    }

    #[test]
    fn test_trend_points_take_last_seven() {
        let buckets: Vec<_> = (1..=10)
            .map(|d| bucket(&format!("2024-05-{d:02}"), d * 10, d * 5))
            .collect();
        let points = trend_points(&buckets, DEFAULT_CUSTOMER_SHARE);
        assert_eq!(points.len(), TREND_WINDOW);
        assert_eq!(points[0].period, "2024-05-04");
        assert_eq!(points[6].period, "2024-05-10");
        assert_eq!(points[6].repeat_visitors, 50);

        assert_eq!(trend_points(&buckets[..3], 0.8).len(), 3);
        assert!(trend_points(&[], 0.8).is_empty());
    }

    #[test]
    fn test_trend_percent() {
        assert_eq!(trend_percent(12, 10), Some(20.0));
        assert_eq!(trend_percent(5, 10), Some(-50.0));
        assert_eq!(trend_percent(1, 3), Some(-66.7));
        assert_eq!(trend_percent(10, 0), None);
    }

    #[test]
    fn test_summary_from_report() {
        let buckets = vec![bucket("2024-05-01", 10, 6), bucket("2024-05-02", 15, 9)];
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let summary = summarize(&buckets, &[visit(1, 1, 2, 9)], today);
        assert_eq!(
            summary,
            VisitSummary {
                today_visits: 15,
                unique_visitors: 9,
                visits_trend: Some(50.0),
                from_report: true,
            }
        );
    }

    #[test]
    fn test_summary_ignores_report_ending_before_today() {
        let buckets = vec![bucket("2024-05-01", 10, 6), bucket("2024-05-02", 15, 9)];
        let today = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let visits = vec![visit(1, 1, 3, 9), visit(2, 1, 2, 9)];

        let summary = summarize(&buckets, &visits, today);
        assert!(!summary.from_report);
        assert_eq!(summary.today_visits, 1);
        assert_eq!(summary.visits_trend, None);

        // Periods that are not dates are taken at face value
        let buckets = vec![bucket("week 18", 4, 3)];
        let summary = summarize(&buckets, &visits, today);
        assert!(summary.from_report);
        assert_eq!(summary.today_visits, 4);
    }

    #[test]
    fn test_bucket_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2);
        assert_eq!(bucket_day(&bucket("2024-05-02", 0, 0)), day);
        assert_eq!(bucket_day(&bucket("2024-05-02T00:00:00Z", 0, 0)), day);
        assert_eq!(bucket_day(&bucket("May 2", 0, 0)), None);
    }

    #[test]
    fn test_summary_falls_back_to_raw_visits_when_report_is_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let visits = vec![
            visit(1, 1, 2, 9),
            visit(2, 1, 2, 11),
            visit(3, 2, 2, 12),
            visit(4, 3, 1, 12),
        ];

        for buckets in [vec![], vec![bucket("2024-05-02", 0, 0)]] {
            let summary = summarize(&buckets, &visits, today);
            assert_eq!(summary.today_visits, 3);
            assert_eq!(summary.unique_visitors, 2);
            assert_eq!(summary.visits_trend, None);
            assert!(!summary.from_report);
        }
    }
}
