use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Part;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePartRequest {
    pub brand: String,
    pub item_name: String,
    pub part_number: String,
    pub category: String,
    pub description: Option<String>,
    pub cost_paid_cents: i64,
    pub cost_charged_cents: i64,
    pub quantity_on_hand: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePartRequest {
    pub brand: Option<String>,
    pub item_name: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cost_paid_cents: Option<i64>,
    pub cost_charged_cents: Option<i64>,
    pub quantity_on_hand: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PartList {
    pub items: Vec<Part>,
}
