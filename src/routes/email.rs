use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::email::{ConfigureEmailRequest, SendOutcome, TestEmailRequest},
    error::AppResult,
    response::ApiResponse,
    services::email_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/configure", post(configure_email))
        .route("/test", post(send_test_email))
        .route("/send-receipt/{order_id}", post(send_receipt))
        .route("/send-completion/{order_id}", post(send_completion))
}

#[utoipa::path(
    post,
    path = "/email/configure",
    request_body = ConfigureEmailRequest,
    responses(
        (status = 200, description = "Relay credentials stored for this process"),
        (status = 422, description = "Malformed sender address"),
    ),
    tag = "Email"
)]
pub async fn configure_email(
    State(state): State<AppState>,
    Json(payload): Json<ConfigureEmailRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = email_service::configure(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/email/test",
    request_body = TestEmailRequest,
    responses(
        (status = 200, description = "Test message delivered", body = ApiResponse<SendOutcome>),
        (status = 400, description = "Email is not configured"),
        (status = 502, description = "Relay rejected the message"),
    ),
    tag = "Email"
)]
pub async fn send_test_email(
    State(state): State<AppState>,
    Json(payload): Json<TestEmailRequest>,
) -> AppResult<Json<ApiResponse<SendOutcome>>> {
    let resp = email_service::send_test(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/email/send-receipt/{order_id}",
    params(("order_id" = Uuid, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Receipt emailed to the customer", body = ApiResponse<SendOutcome>),
        (status = 400, description = "Email not configured or customer has no usable address"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Relay rejected the message"),
    ),
    tag = "Email"
)]
pub async fn send_receipt(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SendOutcome>>> {
    let resp = email_service::send_receipt(&state, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/email/send-completion/{order_id}",
    params(("order_id" = Uuid, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Completion notice emailed to the customer", body = ApiResponse<SendOutcome>),
        (status = 400, description = "Email not configured or customer has no usable address"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Relay rejected the message"),
    ),
    tag = "Email"
)]
pub async fn send_completion(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SendOutcome>>> {
    let resp = email_service::send_completion(&state, order_id).await?;
    Ok(Json(resp))
}
