use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::backup::{
        BackupFile, BackupList, CreateBackupRequest, DatabaseList, RestoreRequest, RestoreSummary,
    },
    error::AppResult,
    response::ApiResponse,
    services::backup_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/databases", get(list_databases))
        .route("/create", post(create_backup))
        .route("/list", get(list_backups))
        .route("/{filename}", axum::routing::delete(delete_backup))
        .route("/restore", post(restore_backup))
}

#[utoipa::path(
    get,
    path = "/backup/databases",
    responses(
        (status = 200, description = "Databases eligible for backup", body = ApiResponse<DatabaseList>),
    ),
    tag = "Backup"
)]
pub async fn list_databases(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DatabaseList>>> {
    let resp = backup_service::list_databases(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/backup/create",
    request_body = CreateBackupRequest,
    responses(
        (status = 200, description = "Dump written to the backup directory", body = ApiResponse<BackupFile>),
        (status = 400, description = "Unknown database or pg_dump failure"),
    ),
    tag = "Backup"
)]
pub async fn create_backup(
    State(state): State<AppState>,
    Json(payload): Json<CreateBackupRequest>,
) -> AppResult<Json<ApiResponse<BackupFile>>> {
    let resp = backup_service::create_backup(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/backup/list",
    responses(
        (status = 200, description = "Backups on disk, newest first", body = ApiResponse<BackupList>),
    ),
    tag = "Backup"
)]
pub async fn list_backups(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BackupList>>> {
    let resp = backup_service::list_backups(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/backup/{filename}",
    params(("filename" = String, Path, description = "Backup file name")),
    responses(
        (status = 200, description = "Backup deleted"),
        (status = 400, description = "Not a backup file"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Backup"
)]
pub async fn delete_backup(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = backup_service::delete_backup(&state, &filename).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/backup/restore",
    request_body = RestoreRequest,
    responses(
        (status = 200, description = "Dump replayed into the target database", body = ApiResponse<RestoreSummary>),
        (status = 400, description = "Missing confirmation or unusable dump"),
        (status = 404, description = "Backup file not found"),
    ),
    tag = "Backup"
)]
pub async fn restore_backup(
    State(state): State<AppState>,
    Json(payload): Json<RestoreRequest>,
) -> AppResult<Json<ApiResponse<RestoreSummary>>> {
    let resp = backup_service::restore(&state, payload).await?;
    Ok(Json(resp))
}
