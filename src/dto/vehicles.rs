use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Vehicle;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVehicleRequest {
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
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVehicleRequest {
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub engine_size: Option<String>,
    pub transmission: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleList {
    pub items: Vec<Vehicle>,
}
