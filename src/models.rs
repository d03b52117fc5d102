use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Vehicle {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub engine_size: Option<String>,
    pub transmission: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Always the two-cost shape; legacy single-cost rows are normalized
/// at the entity boundary before they get here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Part {
    pub id: Uuid,
    pub brand: String,
    pub item_name: String,
    pub part_number: String,
    pub category: String,
    pub description: Option<String>,
    pub cost_paid_cents: i64,
    pub cost_charged_cents: i64,
    pub profit_cents: i64,
    pub quantity_on_hand: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Labor {
    pub id: Uuid,
    pub name: String,
    pub cost_cents: i64,
    pub category: String,
    pub description: Option<String>,
    pub estimated_hours: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Estimate,
    Approved,
    Started,
    Complete,
    Cancelled,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Estimate => "estimate",
            WorkOrderStatus::Approved => "approved",
            WorkOrderStatus::Started => "started",
            WorkOrderStatus::Complete => "complete",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "estimate" => Some(WorkOrderStatus::Estimate),
            "approved" => Some(WorkOrderStatus::Approved),
            "started" => Some(WorkOrderStatus::Started),
            "complete" => Some(WorkOrderStatus::Complete),
            "cancelled" => Some(WorkOrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    Drawn,
    Typed,
}

impl SignatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Drawn => "drawn",
            SignatureKind::Typed => "typed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Signature {
    pub kind: SignatureKind,
    pub image: Option<String>,
    pub typed_name: Option<String>,
    pub signer_name: Option<String>,
    pub signed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub status: WorkOrderStatus,
    pub tax_rate: f64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub notes: Option<String>,
    pub signature: Option<Signature>,
    pub created_in_dst: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkOrderItem {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub kind: String,
    pub part_id: Option<Uuid>,
    pub labor_id: Option<Uuid>,
    pub description: String,
    pub quantity: f64,
    pub unit_cost_cents: i64,
    pub position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            WorkOrderStatus::Estimate,
            WorkOrderStatus::Approved,
            WorkOrderStatus::Started,
            WorkOrderStatus::Complete,
            WorkOrderStatus::Cancelled,
        ] {
            assert_eq!(WorkOrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(WorkOrderStatus::parse("shipped"), None);
    }
}
