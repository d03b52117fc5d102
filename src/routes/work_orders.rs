use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::work_orders::{
        CreateWorkOrderRequest, DeleteConfirmQuery, SignatureRequest, StatusUpdateResult,
        UpdateStatusRequest, WorkOrderList, WorkOrderWithItems,
    },
    error::AppResult,
    models::WorkOrder,
    response::ApiResponse,
    routes::params::WorkOrderQuery,
    services::work_order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_work_orders).post(create_work_order))
        .route("/{id}", get(get_work_order).delete(delete_work_order))
        .route("/{id}/status", put(update_status))
        .route("/{id}/signature", put(submit_signature))
}

#[utoipa::path(
    get,
    path = "/work-orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("customer_id" = Option<Uuid>, Query, description = "Filter by customer"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "asc or desc by creation time")
    ),
    responses(
        (status = 200, description = "List work orders", body = ApiResponse<WorkOrderList>),
    ),
    tag = "Work Orders"
)]
pub async fn list_work_orders(
    State(state): State<AppState>,
    Query(query): Query<WorkOrderQuery>,
) -> AppResult<Json<ApiResponse<WorkOrderList>>> {
    let resp = work_order_service::list_work_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/work-orders",
    request_body = CreateWorkOrderRequest,
    responses(
        (status = 200, description = "Work order created with priced items", body = ApiResponse<WorkOrderWithItems>),
        (status = 404, description = "Unknown customer or vehicle"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Work Orders"
)]
pub async fn create_work_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateWorkOrderRequest>,
) -> AppResult<Json<ApiResponse<WorkOrderWithItems>>> {
    let resp = work_order_service::create_work_order(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/work-orders/{id}",
    params(("id" = Uuid, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Get work order with items", body = ApiResponse<WorkOrderWithItems>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Work Orders"
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<WorkOrderWithItems>>> {
    let resp = work_order_service::get_work_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/work-orders/{id}/status",
    params(("id" = Uuid, Path, description = "Work order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated; email outcome reported alongside", body = ApiResponse<StatusUpdateResult>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Unknown status"),
    ),
    tag = "Work Orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<StatusUpdateResult>>> {
    let resp = work_order_service::update_status(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/work-orders/{id}/signature",
    params(("id" = Uuid, Path, description = "Work order ID")),
    request_body = SignatureRequest,
    responses(
        (status = 200, description = "Signature recorded", body = ApiResponse<WorkOrder>),
        (status = 400, description = "Already signed"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Signature payload incomplete"),
    ),
    tag = "Work Orders"
)]
pub async fn submit_signature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SignatureRequest>,
) -> AppResult<Json<ApiResponse<WorkOrder>>> {
    let resp = work_order_service::submit_signature(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/work-orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Work order ID"),
        ("confirm" = Option<String>, Query, description = "Must be the literal DELETE")
    ),
    responses(
        (status = 200, description = "Work order and items deleted"),
        (status = 400, description = "Missing confirmation"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Work Orders"
)]
pub async fn delete_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteConfirmQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = work_order_service::delete_work_order(&state, id, query.confirm.as_deref()).await?;
    Ok(Json(resp))
}
