use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Labor;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLaborRequest {
    pub name: String,
    pub cost_cents: i64,
    pub category: String,
    pub description: Option<String>,
    pub estimated_hours: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLaborRequest {
    pub name: Option<String>,
    pub cost_cents: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LaborList {
    pub items: Vec<Labor>,
}
