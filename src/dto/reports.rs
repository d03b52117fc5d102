use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportRequest {
    /// Inclusive start date (shop timezone).
    pub from: NaiveDate,
    /// Inclusive end date.
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailReportRequest {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub to_address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Date-range summary over work orders. Revenue figures sum the stored
/// per-order totals, so they reconcile with receipts by construction.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub orders_created: u64,
    pub by_status: Vec<StatusCount>,
    pub completed_subtotal_cents: i64,
    pub completed_tax_cents: i64,
    pub completed_total_cents: i64,
    /// charged − paid across part lines of completed orders.
    pub parts_profit_cents: i64,
}
