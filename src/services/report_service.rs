//! Financial reports over a date range.
//!
//! Revenue sums the stored per-order totals rather than recomputing from
//! line items, so report figures always reconcile with receipts.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::reports::{EmailReportRequest, ReportRequest, ReportSummary, StatusCount},
    entity::{
        parts::{Column as PartCol, Entity as Parts},
        work_order_items::{Column as ItemCol, Entity as WorkOrderItems},
        work_orders::{Column as OrderCol, Entity as WorkOrders},
    },
    error::{AppError, AppResult},
    mailer::OutboundEmail,
    models::WorkOrderStatus,
    pricing,
    response::{ApiResponse, Meta},
    services::email_service,
    state::AppState,
};

pub async fn generate(
    state: &AppState,
    request: ReportRequest,
) -> AppResult<ApiResponse<ReportSummary>> {
    let summary = build_summary(state, request.from, request.to).await?;
    Ok(ApiResponse::success("Report", summary, Some(Meta::empty())))
}

pub async fn email_report(
    state: &AppState,
    request: EmailReportRequest,
) -> AppResult<ApiResponse<ReportSummary>> {
    if !email_service::is_usable_email(Some(&request.to_address)) {
        return Err(AppError::validation(
            "to_address",
            "Malformed recipient address",
        ));
    }

    let summary = build_summary(state, request.from, request.to).await?;
    let email = OutboundEmail {
        to: request.to_address,
        subject: format!("Shop report {} to {}", summary.from, summary.to),
        html_body: render_report_html(&summary),
    };
    email_service::deliver(state, &email).await?;

    Ok(ApiResponse::success(
        "Report emailed",
        summary,
        Some(Meta::empty()),
    ))
}

async fn build_summary(
    state: &AppState,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<ReportSummary> {
    if from > to {
        return Err(AppError::validation("from", "Range start is after its end"));
    }

    // Day bounds are taken in the shop's display timezone so "today's
    // report" matches what the operator sees on receipts.
    let settings = state.time_settings.read().await.clone();
    let tz = settings.effective_timezone()?;
    let start = day_start_utc(from, tz);
    let end = day_start_utc(to.succ_opt().unwrap_or(to), tz);

    let orders = WorkOrders::find()
        .filter(OrderCol::CreatedAt.gte(start))
        .filter(OrderCol::CreatedAt.lt(end))
        .all(&state.orm)
        .await?;

    let mut by_status: HashMap<&'static str, u64> = HashMap::new();
    let mut completed_ids: Vec<Uuid> = Vec::new();
    let mut completed_subtotal_cents = 0i64;
    let mut completed_tax_cents = 0i64;
    let mut completed_total_cents = 0i64;

    for order in &orders {
        let status = WorkOrderStatus::parse(&order.status).unwrap_or(WorkOrderStatus::Estimate);
        *by_status.entry(status.as_str()).or_default() += 1;
        if status == WorkOrderStatus::Complete {
            completed_ids.push(order.id);
            completed_subtotal_cents += order.subtotal_cents;
            completed_tax_cents += order.tax_cents;
            completed_total_cents += order.total_cents;
        }
    }

    let parts_profit_cents = parts_profit(state, &completed_ids).await?;

    let mut by_status: Vec<StatusCount> = by_status
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    by_status.sort_by(|a, b| a.status.cmp(&b.status));

    Ok(ReportSummary {
        from,
        to,
        orders_created: orders.len() as u64,
        by_status,
        completed_subtotal_cents,
        completed_tax_cents,
        completed_total_cents,
        parts_profit_cents,
    })
}

fn day_start_utc(date: NaiveDate, tz: chrono_tz::Tz) -> chrono::DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or(date.and_time(chrono::NaiveTime::MIN));
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| chrono::TimeZone::from_utc_datetime(&Utc, &naive))
}

/// charged − paid across part lines of the given orders, using the charged
/// snapshot on the line and the current paid cost of the part. Parts since
/// removed from the catalog contribute zero profit.
async fn parts_profit(state: &AppState, order_ids: &[Uuid]) -> AppResult<i64> {
    if order_ids.is_empty() {
        return Ok(0);
    }

    let items = WorkOrderItems::find()
        .filter(ItemCol::WorkOrderId.is_in(order_ids.to_vec()))
        .filter(ItemCol::Kind.eq("part"))
        .all(&state.orm)
        .await?;

    let part_ids: Vec<Uuid> = items.iter().filter_map(|item| item.part_id).collect();
    if part_ids.is_empty() {
        return Ok(0);
    }
    let paid_by_part: HashMap<Uuid, i64> = Parts::find()
        .filter(PartCol::Id.is_in(part_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|part| (part.id, part.costs().paid_cents))
        .collect();

    let raw: f64 = items
        .iter()
        .filter_map(|item| {
            let paid = paid_by_part.get(&item.part_id?)?;
            Some((item.unit_cost_cents - paid) as f64 * item.quantity)
        })
        .sum();

    Ok(pricing::round_half_up(raw))
}

fn dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}

fn render_report_html(summary: &ReportSummary) -> String {
    let mut status_rows = String::new();
    for entry in &summary.by_status {
        status_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            entry.status, entry.count
        ));
    }

    format!(
        r#"<html><body>
<h1>Shop report {from} to {to}</h1>
<p>Work orders created: {orders}</p>
<table border="1" cellspacing="0" cellpadding="4">
<tr><th>Status</th><th>Count</th></tr>
{status_rows}</table>
<p>Completed revenue: {total} (subtotal {subtotal}, tax {tax})<br>
Parts profit: {profit}</p>
</body></html>
"#,
        from = summary.from,
        to = summary.to,
        orders = summary.orders_created,
        status_rows = status_rows,
        total = dollars(summary.completed_total_cents),
        subtotal = dollars(summary.completed_subtotal_cents),
        tax = dollars(summary.completed_tax_cents),
        profit = dollars(summary.parts_profit_cents),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_formats_negatives() {
        assert_eq!(dollars(10284), "$102.84");
        assert_eq!(dollars(-50), "-$0.50");
    }

    #[test]
    fn report_html_carries_revenue() {
        let summary = ReportSummary {
            from: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
            orders_created: 3,
            by_status: vec![StatusCount {
                status: "complete".into(),
                count: 2,
            }],
            completed_subtotal_cents: 9500,
            completed_tax_cents: 784,
            completed_total_cents: 10284,
            parts_profit_cents: 550,
        };
        let html = render_report_html(&summary);
        assert!(html.contains("$102.84"));
        assert!(html.contains("$5.50"));
        assert!(html.contains("complete"));
    }
}
