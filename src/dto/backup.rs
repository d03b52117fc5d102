use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DatabaseList {
    pub databases: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBackupRequest {
    pub database: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BackupFile {
    pub database: String,
    pub filename: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BackupList {
    pub items: Vec<BackupFile>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestoreRequest {
    pub filename: String,
    /// Must be the literal string "RESTORE".
    pub confirm: String,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct RestoreSummary {
    pub database: String,
    pub tables_created: u64,
    pub rows_inserted: u64,
    pub statements_executed: u64,
}
