use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::labor::{CreateLaborRequest, LaborList, UpdateLaborRequest},
    error::AppResult,
    models::Labor,
    response::ApiResponse,
    routes::params::LaborQuery,
    services::labor_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_labor).post(create_labor))
        .route("/{id}", get(get_labor).put(update_labor).delete(delete_labor))
}

#[utoipa::path(
    get,
    path = "/labor",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search name or description"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List labor entries", body = ApiResponse<LaborList>),
    ),
    tag = "Labor"
)]
pub async fn list_labor(
    State(state): State<AppState>,
    Query(query): Query<LaborQuery>,
) -> AppResult<Json<ApiResponse<LaborList>>> {
    let resp = labor_service::list_labor(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/labor",
    request_body = CreateLaborRequest,
    responses(
        (status = 200, description = "Labor entry created", body = ApiResponse<Labor>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Labor"
)]
pub async fn create_labor(
    State(state): State<AppState>,
    Json(payload): Json<CreateLaborRequest>,
) -> AppResult<Json<ApiResponse<Labor>>> {
    let resp = labor_service::create_labor(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/labor/{id}",
    params(("id" = Uuid, Path, description = "Labor ID")),
    responses(
        (status = 200, description = "Get labor entry", body = ApiResponse<Labor>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Labor"
)]
pub async fn get_labor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Labor>>> {
    let resp = labor_service::get_labor(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/labor/{id}",
    params(("id" = Uuid, Path, description = "Labor ID")),
    request_body = UpdateLaborRequest,
    responses(
        (status = 200, description = "Labor entry updated", body = ApiResponse<Labor>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Labor"
)]
pub async fn update_labor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLaborRequest>,
) -> AppResult<Json<ApiResponse<Labor>>> {
    let resp = labor_service::update_labor(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/labor/{id}",
    params(("id" = Uuid, Path, description = "Labor ID")),
    responses(
        (status = 200, description = "Labor entry deleted"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Labor"
)]
pub async fn delete_labor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = labor_service::delete_labor(&state, id).await?;
    Ok(Json(resp))
}
