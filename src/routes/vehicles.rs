use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::vehicles::{CreateVehicleRequest, UpdateVehicleRequest, VehicleList},
    error::AppResult,
    models::Vehicle,
    response::ApiResponse,
    routes::params::VehicleQuery,
    services::vehicle_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

#[utoipa::path(
    get,
    path = "/vehicles",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("customer_id" = Option<Uuid>, Query, description = "Filter by owner")
    ),
    responses(
        (status = 200, description = "List vehicles", body = ApiResponse<VehicleList>),
    ),
    tag = "Vehicles"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> AppResult<Json<ApiResponse<VehicleList>>> {
    let resp = vehicle_service::list_vehicles(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle created", body = ApiResponse<Vehicle>),
        (status = 404, description = "Unknown customer"),
        (status = 422, description = "Not in the vehicle catalog"),
    ),
    tag = "Vehicles"
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    let resp = vehicle_service::create_vehicle(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Get vehicle", body = ApiResponse<Vehicle>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Vehicles"
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    let resp = vehicle_service::get_vehicle(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<Vehicle>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Vehicles"
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    let resp = vehicle_service::update_vehicle(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = vehicle_service::delete_vehicle(&state, id).await?;
    Ok(Json(resp))
}
