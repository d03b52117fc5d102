use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::parts::{CreatePartRequest, PartList, UpdatePartRequest},
    error::AppResult,
    models::Part,
    response::ApiResponse,
    routes::params::PartQuery,
    services::part_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parts).post(create_part))
        .route("/{id}", get(get_part).put(update_part).delete(delete_part))
}

#[utoipa::path(
    get,
    path = "/parts",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search item name, part number or brand"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List parts", body = ApiResponse<PartList>),
    ),
    tag = "Parts"
)]
pub async fn list_parts(
    State(state): State<AppState>,
    Query(query): Query<PartQuery>,
) -> AppResult<Json<ApiResponse<PartList>>> {
    let resp = part_service::list_parts(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/parts",
    request_body = CreatePartRequest,
    responses(
        (status = 200, description = "Part created", body = ApiResponse<Part>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Parts"
)]
pub async fn create_part(
    State(state): State<AppState>,
    Json(payload): Json<CreatePartRequest>,
) -> AppResult<Json<ApiResponse<Part>>> {
    let resp = part_service::create_part(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/parts/{id}",
    params(("id" = Uuid, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Get part", body = ApiResponse<Part>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Parts"
)]
pub async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Part>>> {
    let resp = part_service::get_part(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/parts/{id}",
    params(("id" = Uuid, Path, description = "Part ID")),
    request_body = UpdatePartRequest,
    responses(
        (status = 200, description = "Part updated", body = ApiResponse<Part>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Parts"
)]
pub async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartRequest>,
) -> AppResult<Json<ApiResponse<Part>>> {
    let resp = part_service::update_part(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/parts/{id}",
    params(("id" = Uuid, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Part deleted"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Parts"
)]
pub async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = part_service::delete_part(&state, id).await?;
    Ok(Json(resp))
}
