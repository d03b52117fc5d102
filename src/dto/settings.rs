use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// What the current time settings resolve to right now. Lets the operator
/// verify an override before any work order is stamped with it.
#[derive(Debug, Serialize, ToSchema)]
pub struct TimePreview {
    pub instant: DateTime<Utc>,
    pub display: String,
    pub timezone: String,
    pub in_dst: bool,
}
