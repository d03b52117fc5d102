use axum::{
    Json, Router,
    extract::{Query, State},
    routing::post,
};

use crate::{
    dto::reports::{EmailReportRequest, ReportRequest, ReportSummary},
    error::AppResult,
    response::ApiResponse,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/generate",
            post(generate_report).get(generate_report_query),
        )
        .route("/email", post(email_report))
}

#[utoipa::path(
    post,
    path = "/reports/generate",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Work-order summary for the range", body = ApiResponse<ReportSummary>),
        (status = 422, description = "Start date after end date"),
    ),
    tag = "Reports"
)]
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> AppResult<Json<ApiResponse<ReportSummary>>> {
    let resp = report_service::generate(&state, request).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/reports/generate",
    params(
        ("from" = String, Query, description = "Inclusive start date, YYYY-MM-DD"),
        ("to" = String, Query, description = "Inclusive end date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Work-order summary for the range", body = ApiResponse<ReportSummary>),
        (status = 422, description = "Start date after end date"),
    ),
    tag = "Reports"
)]
pub async fn generate_report_query(
    State(state): State<AppState>,
    Query(request): Query<ReportRequest>,
) -> AppResult<Json<ApiResponse<ReportSummary>>> {
    let resp = report_service::generate(&state, request).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/reports/email",
    request_body = EmailReportRequest,
    responses(
        (status = 200, description = "Summary emailed; figures echoed back", body = ApiResponse<ReportSummary>),
        (status = 400, description = "Email is not configured"),
        (status = 422, description = "Malformed recipient or date range"),
        (status = 502, description = "Relay rejected the message"),
    ),
    tag = "Reports"
)]
pub async fn email_report(
    State(state): State<AppState>,
    Json(request): Json<EmailReportRequest>,
) -> AppResult<Json<ApiResponse<ReportSummary>>> {
    let resp = report_service::email_report(&state, request).await?;
    Ok(Json(resp))
}
