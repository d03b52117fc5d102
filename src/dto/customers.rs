use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Customer, Vehicle, WorkOrder};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerList {
    pub items: Vec<Customer>,
}

/// Vehicles and work orders owned by a customer; also what the operator
/// reviews before a cascade delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerHistory {
    pub customer: Customer,
    pub vehicles: Vec<Vehicle>,
    pub work_orders: Vec<WorkOrder>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDeleteSummary {
    pub vehicles_deleted: u64,
    pub work_orders_deleted: u64,
}
