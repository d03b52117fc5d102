use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{MakeList, ModelList, ModelQuery, YearList, YearQuery},
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/makes", get(list_makes))
        .route("/models", get(list_models))
        .route("/years", get(list_years))
}

#[utoipa::path(
    get,
    path = "/catalog/makes",
    responses(
        (status = 200, description = "Known makes", body = ApiResponse<MakeList>),
    ),
    tag = "Catalog"
)]
pub async fn list_makes(State(state): State<AppState>) -> AppResult<Json<ApiResponse<MakeList>>> {
    let resp = catalog_service::makes(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/catalog/models",
    params(("make" = String, Query, description = "Make to look up")),
    responses(
        (status = 200, description = "Models for a make", body = ApiResponse<ModelList>),
    ),
    tag = "Catalog"
)]
pub async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ModelQuery>,
) -> AppResult<Json<ApiResponse<ModelList>>> {
    let resp = catalog_service::models_for(&state, &query.make).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/catalog/years",
    params(
        ("make" = String, Query, description = "Make to look up"),
        ("model" = String, Query, description = "Model to look up")
    ),
    responses(
        (status = 200, description = "Years for a make/model", body = ApiResponse<YearList>),
    ),
    tag = "Catalog"
)]
pub async fn list_years(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> AppResult<Json<ApiResponse<YearList>>> {
    let resp = catalog_service::years_for(&state, &query.make, &query.model).await?;
    Ok(Json(resp))
}
