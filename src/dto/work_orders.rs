use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{SignatureKind, WorkOrder, WorkOrderItem, WorkOrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Part,
    Labor,
}

/// One row from the order form. A row whose reference id is missing is an
/// incomplete selection: it contributes nothing and is not persisted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LineItemRequest {
    pub kind: LineKind,
    pub part_id: Option<Uuid>,
    pub labor_id: Option<Uuid>,
    pub quantity: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWorkOrderRequest {
    pub customer_id: Uuid,
    /// Absent in estimate-only mode.
    pub vehicle_id: Option<Uuid>,
    pub items: Vec<LineItemRequest>,
    pub tax_rate: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkOrderWithItems {
    pub order: WorkOrder,
    pub items: Vec<WorkOrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkOrderList {
    pub items: Vec<WorkOrder>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: WorkOrderStatus,
    /// Only consulted when the transition lands on Complete and the customer
    /// has a usable email; the transition itself never depends on it.
    pub send_email: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdateResult {
    pub order: WorkOrder,
    /// True when the caller should have offered the completion email.
    pub email_prompt: bool,
    pub email_sent: bool,
    /// Set when the send failed; the status change stands regardless.
    pub email_warning: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignatureRequest {
    pub kind: SignatureKind,
    /// Base64 image data for drawn signatures.
    pub image: Option<String>,
    pub typed_name: Option<String>,
    pub signer_name: Option<String>,
}

/// Literal confirmation token for hard deletes; deliberate friction,
/// never a boolean.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteConfirmQuery {
    pub confirm: Option<String>,
}
