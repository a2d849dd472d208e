//! Dashboard page
//!
//! Pulls every list the summary cards need in one concurrent round, then
//! shapes the visitor report into cards and the trend chart.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::models::{CustomerQuery, HealthStatus, ReportQuery, VisitQuery, WorkerStatus};
use std::sync::Arc;
use visitor_client::{ClientResult, VisitorApi};

use crate::controller::{PageState, Phase, ViewKind};
use crate::error::describe_error;
use crate::stats::{self, TREND_WINDOW, TrendPoint, VisitSummary};

/// Raw visits fetched for the local fallback count
const RECENT_VISIT_LIMIT: u32 = 500;

/// Headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub total_customers: usize,
    pub active_staff: usize,
    pub total_staff: usize,
    pub today: VisitSummary,
    pub workers_online: i64,
    pub workers_total: i64,
    pub system: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub cards: SummaryCards,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug)]
pub enum DashboardView<'a> {
    Loading,
    FullPageError { message: &'a str },
    Ready {
        data: &'a DashboardData,
        banner: Option<&'a str>,
    },
}

pub struct DashboardPage {
    api: Arc<dyn VisitorApi>,
    customer_share: f64,
    state: PageState,
    data: Option<DashboardData>,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn VisitorApi>) -> Self {
        Self {
            api,
            customer_share: stats::DEFAULT_CUSTOMER_SHARE,
            state: PageState::default(),
            data: None,
        }
    }

    /// Override the estimated customer share used when the report has no split
    pub fn with_customer_share(mut self, share: f64) -> Self {
        self.customer_share = share;
        self
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    pub async fn load(&mut self) {
        self.load_on(Utc::now().date_naive()).await;
    }

    /// Load with `today` as the reference day for the raw-visit fallback
    pub async fn load_on(&mut self, today: NaiveDate) {
        self.state.begin_load();
        tracing::debug!("Loading dashboard");

        let api = &self.api;
        let all = CustomerQuery::default();
        let recent = VisitQuery::recent(RECENT_VISIT_LIMIT);
        let report = ReportQuery::daily(TREND_WINDOW as u32);
        let required = async {
            tokio::try_join!(
                api.get_customers(&all),
                api.get_staff(),
                api.get_visits(&recent),
                api.get_visitor_report(&report),
            )
        };
        let (required, health, workers) =
            tokio::join!(required, optional_health(api), optional_workers(api));

        match required {
            Ok((customers, staff, visits, buckets)) => {
                let data = DashboardData {
                    cards: SummaryCards {
                        total_customers: customers.len(),
                        active_staff: staff.iter().filter(|s| s.is_active).count(),
                        total_staff: staff.len(),
                        today: stats::summarize(&buckets, &visits.visits, today),
                        workers_online: workers.online_count,
                        workers_total: workers.total_count,
                        system: health,
                    },
                    trend: stats::trend_points(&buckets, self.customer_share),
                };
                tracing::debug!(
                    buckets = buckets.len(),
                    from_report = data.cards.today.from_report,
                    "Dashboard loaded"
                );
                self.data = Some(data);
                self.state.finish_load();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard load failed");
                self.state
                    .fail_load(describe_error(&e, "Failed to load dashboard data"));
            }
        }
    }

    pub fn view(&self) -> DashboardView<'_> {
        match (self.state.view_kind(self.data.is_some()), &self.data) {
            (ViewKind::Content, Some(data)) => DashboardView::Ready {
                data,
                banner: self.state.error(),
            },
            (ViewKind::FullPageError, _) => DashboardView::FullPageError {
                message: self.state.error().unwrap_or_default(),
            },
            _ => DashboardView::Loading,
        }
    }
}

async fn optional_health(api: &Arc<dyn VisitorApi>) -> HealthStatus {
    or_default("health", api.get_health().await, HealthStatus::unknown)
}

async fn optional_workers(api: &Arc<dyn VisitorApi>) -> WorkerStatus {
    or_default("workers", api.get_workers().await, WorkerStatus::default)
}

/// Optional signals never block the page
fn or_default<T>(signal: &str, result: ClientResult<T>, default: fn() -> T) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(signal, error = %e, "Optional signal unavailable, using default");
        default()
    })
}
