use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    clock::{self, TimeSettings},
    dto::settings::TimePreview,
    error::AppResult,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/time", get(get_time_settings).put(update_time_settings))
        .route("/time/preview", get(preview_time))
}

#[utoipa::path(
    get,
    path = "/settings/time",
    responses(
        (status = 200, description = "Current time settings", body = ApiResponse<TimeSettings>),
    ),
    tag = "Settings"
)]
pub async fn get_time_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TimeSettings>>> {
    let settings = state.time_settings.read().await.clone();
    Ok(Json(ApiResponse::success("Time settings", settings, None)))
}

#[utoipa::path(
    put,
    path = "/settings/time",
    request_body = TimeSettings,
    responses(
        (status = 200, description = "Time settings replaced", body = ApiResponse<TimeSettings>),
        (status = 422, description = "Unknown timezone or unusable override"),
    ),
    tag = "Settings"
)]
pub async fn update_time_settings(
    State(state): State<AppState>,
    Json(payload): Json<TimeSettings>,
) -> AppResult<Json<ApiResponse<TimeSettings>>> {
    // Reject settings that could not stamp a work order later.
    payload.effective_timezone()?;
    if payload.use_custom_time {
        clock::resolve_current_time(&payload)?;
    }

    let mut settings = state.time_settings.write().await;
    *settings = payload.clone();
    drop(settings);

    tracing::info!(
        use_custom_time = payload.use_custom_time,
        timezone = %payload.timezone,
        "time settings updated"
    );
    Ok(Json(ApiResponse::success("Time settings", payload, None)))
}

#[utoipa::path(
    get,
    path = "/settings/time/preview",
    responses(
        (status = 200, description = "What the settings resolve to right now", body = ApiResponse<TimePreview>),
        (status = 422, description = "Settings cannot be resolved"),
    ),
    tag = "Settings"
)]
pub async fn preview_time(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TimePreview>>> {
    let settings = state.time_settings.read().await.clone();
    let instant = clock::resolve_current_time(&settings)?;
    let tz = settings.effective_timezone()?;
    let preview = TimePreview {
        instant,
        display: clock::format_for_display(instant, tz),
        timezone: tz.name().to_string(),
        in_dst: clock::dst_flag_for(instant, &settings),
    };
    Ok(Json(ApiResponse::success("Time preview", preview, None)))
}
