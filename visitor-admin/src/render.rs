//! Plain-text rendering of page view models for the CLI

use std::fmt::Write;

use crate::pages::{CustomerDetail, DashboardData};
use crate::table::TableModel;

const BUSY_MARK: &str = "*";

/// Render a table page with aligned columns and its footer
pub fn render_table(model: &TableModel) -> String {
    let mut widths: Vec<usize> = model.headers.iter().map(|h| h.chars().count()).collect();
    for row in &model.rows {
        for (w, cell) in widths.iter_mut().zip(&row.cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = model.headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, " ", &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, " ", &rule, &widths);
    for row in &model.rows {
        let mark = if row.busy { BUSY_MARK } else { " " };
        push_line(&mut out, mark, &row.cells, &widths);
    }

    let p = &model.pagination;
    let _ = writeln!(
        out,
        "{} (page {}/{})",
        model.footer,
        p.page,
        p.page_count()
    );
    out
}

fn push_line(out: &mut String, mark: &str, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "{mark} {}", padded.join("  ").trim_end());
}

pub fn render_dashboard(data: &DashboardData) -> String {
    let cards = &data.cards;
    let mut out = String::new();
    let trend = match cards.today.visits_trend {
        Some(pct) => format!(" ({pct:+.1}%)"),
        None => String::new(),
    };
    let source = if cards.today.from_report {
        ""
    } else {
        " [counted from raw visits]"
    };

    let _ = writeln!(out, "Total customers:  {}", cards.total_customers);
    let _ = writeln!(
        out,
        "Active staff:     {}/{}",
        cards.active_staff, cards.total_staff
    );
    let _ = writeln!(
        out,
        "Today's visits:   {}{trend}{source}",
        cards.today.today_visits
    );
    let _ = writeln!(out, "Unique visitors:  {}", cards.today.unique_visitors);
    let _ = writeln!(
        out,
        "Workers online:   {}/{}",
        cards.workers_online, cards.workers_total
    );
    let _ = writeln!(out, "System status:    {}", cards.system.status);

    if !data.trend.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<12} {:>7} {:>7} {:>7} {:>9} {:>6}",
            "Period", "Visits", "Unique", "Repeat", "Customers", "Staff"
        );
        for point in &data.trend {
            let mark = if point.split.estimated { "~" } else { "" };
            let _ = writeln!(
                out,
                "{:<12} {:>7} {:>7} {:>7} {:>9} {:>6}",
                point.period,
                point.total_visits,
                point.unique_visitors,
                point.repeat_visitors,
                format!("{mark}{}", point.split.customers),
                format!("{mark}{}", point.split.staff),
            );
        }
        if data.trend.iter().any(|p| p.split.estimated) {
            let _ = writeln!(out, "~ estimated split");
        }
    }
    out
}

pub fn render_customer_detail(detail: &CustomerDetail) -> String {
    let c = &detail.customer;
    let mut out = String::new();
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    let _ = writeln!(out, "{} (#{})", c.display_name(), c.id);
    let _ = writeln!(out, "Gender:     {}", field(&c.gender));
    let _ = writeln!(out, "Phone:      {}", field(&c.phone));
    let _ = writeln!(out, "Email:      {}", field(&c.email));
    let _ = writeln!(out, "Visits:     {}", c.visit_count);
    let _ = writeln!(out, "First seen: {}", c.first_seen.format("%Y-%m-%d %H:%M"));
    if let Some(last) = c.last_seen {
        let _ = writeln!(out, "Last seen:  {}", last.format("%Y-%m-%d %H:%M"));
    }

    let _ = writeln!(out);
    if detail.visits.is_empty() {
        let _ = writeln!(out, "No recent visits");
    } else {
        let _ = writeln!(out, "Recent visits:");
        for v in &detail.visits {
            let _ = writeln!(
                out,
                "  {}  site #{}  {:.0}%",
                v.timestamp.format("%Y-%m-%d %H:%M"),
                v.site_id,
                v.confidence * 100.0
            );
        }
    }
    out
}
