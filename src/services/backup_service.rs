//! Database backup/restore utility.
//!
//! Backups shell out to `pg_dump` and land in the configured backup
//! directory as `{database}_backup_{timestamp}.sql`. That naming convention
//! is load-bearing: the restore picker and the external-copy workflow both
//! key off it. Restore replays the dump statement-by-statement, the same
//! way the migration runner executes SQL files, so a mid-replay failure can
//! report exactly how far it got.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Statement};
use tokio::fs;
use tokio::process::Command;

use crate::{
    audit::log_audit,
    db,
    dto::backup::{BackupFile, BackupList, CreateBackupRequest, DatabaseList, RestoreRequest, RestoreSummary},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

const FILENAME_TIMESTAMP: &str = "%Y-%m-%dT%H-%M-%S";

pub async fn list_databases(state: &AppState) -> AppResult<ApiResponse<DatabaseList>> {
    Ok(ApiResponse::success(
        "Databases",
        DatabaseList {
            databases: state.config.backup_databases.clone(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn create_backup(
    state: &AppState,
    payload: CreateBackupRequest,
) -> AppResult<ApiResponse<BackupFile>> {
    let database = payload.database;
    if !state.config.backup_databases.contains(&database) {
        return Err(AppError::BadRequest(format!(
            "Unknown database: {database}"
        )));
    }

    fs::create_dir_all(&state.config.backup_dir).await?;

    let created_at = Utc::now();
    let filename = backup_filename(&database, created_at);
    let path = state.config.backup_dir.join(&filename);

    // --inserts keeps the dump replayable statement-by-statement;
    // --clean --if-exists makes the dump itself drop and recreate objects.
    let output = Command::new("pg_dump")
        .arg("--dbname")
        .arg(state.config.url_for_database(&database))
        .args(["--clean", "--if-exists", "--inserts", "--no-owner"])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::BadRequest(format!(
            "pg_dump failed: {}",
            stderr.trim()
        )));
    }

    fs::write(&path, &output.stdout).await?;
    let size_bytes = fs::metadata(&path).await?.len();

    tracing::info!(%filename, size_bytes, "backup created");
    if let Err(err) = log_audit(
        &state.pool,
        "backup_create",
        Some("backups"),
        Some(serde_json::json!({ "database": database, "filename": filename, "size_bytes": size_bytes })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Backup created",
        BackupFile {
            database,
            filename,
            size_bytes,
            created_at,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_backups(state: &AppState) -> AppResult<ApiResponse<BackupList>> {
    let mut items = Vec::new();

    match fs::read_dir(&state.config.backup_dir).await {
        Ok(mut entries) => {
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name().to_string_lossy().to_string();
                let Some((database, created_at)) = parse_backup_filename(&name) else {
                    continue;
                };
                let size_bytes = entry.metadata().await.map(|m| m.len()).unwrap_or(0);
                items.push(BackupFile {
                    database,
                    filename: name,
                    size_bytes,
                    created_at,
                });
            }
        }
        // A missing directory just means no backups have been taken yet.
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }

    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Backups",
        BackupList { items },
        Some(Meta::new(1, total.max(1), total)),
    ))
}

pub async fn delete_backup(
    state: &AppState,
    filename: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if parse_backup_filename(filename).is_none() {
        return Err(AppError::BadRequest(format!(
            "Not a backup file: {filename}"
        )));
    }
    let path = state.config.backup_dir.join(filename);
    match fs::remove_file(&path).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(err) => return Err(err.into()),
    }

    if let Err(err) = log_audit(
        &state.pool,
        "backup_delete",
        Some("backups"),
        Some(serde_json::json!({ "filename": filename })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Backup deleted",
        serde_json::json!({ "filename": filename }),
        Some(Meta::empty()),
    ))
}

/// Replay a dump against its database. The most destructive operation in
/// the system: gated behind the literal `RESTORE` token, checked before any
/// mutation, and a mid-replay failure reports how many statements ran
/// rather than silently rolling back or continuing.
pub async fn restore(
    state: &AppState,
    payload: RestoreRequest,
) -> AppResult<ApiResponse<RestoreSummary>> {
    ensure_restore_token(&payload.confirm)?;

    let Some((database, _)) = parse_backup_filename(&payload.filename) else {
        return Err(AppError::BadRequest(format!(
            "Not a backup file: {}",
            payload.filename
        )));
    };
    if !state.config.backup_databases.contains(&database) {
        return Err(AppError::BadRequest(format!(
            "Unknown database: {database}"
        )));
    }

    let path = state.config.backup_dir.join(&payload.filename);
    let sql = match fs::read_to_string(&path).await {
        Ok(sql) => sql,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(err) => return Err(err.into()),
    };

    if sql.contains("FROM stdin") {
        return Err(AppError::BadRequest(
            "Dump uses COPY format and cannot be replayed; recreate it with this tool".into(),
        ));
    }

    let statements = split_sql_statements(&sql);
    let conn = db::create_orm_conn(&state.config.url_for_database(&database))
        .await
        .map_err(AppError::Internal)?;
    let backend = conn.get_database_backend();

    let mut summary = RestoreSummary {
        database: database.clone(),
        ..Default::default()
    };
    for stmt in &statements {
        let result = conn
            .execute(Statement::from_string(backend, stmt.clone()))
            .await;
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(
                    executed = summary.statements_executed,
                    total = statements.len(),
                    error = %err,
                    "restore failed mid-replay"
                );
                return Err(AppError::Internal(anyhow::anyhow!(
                    "restore of {} failed after {} of {} statements: {err}",
                    payload.filename,
                    summary.statements_executed,
                    statements.len()
                )));
            }
        };

        summary.statements_executed += 1;
        let upper = stmt.trim_start().to_uppercase();
        if upper.starts_with("CREATE TABLE") {
            summary.tables_created += 1;
        } else if upper.starts_with("INSERT") {
            summary.rows_inserted += result.rows_affected();
        }
    }

    tracing::info!(
        database = %database,
        statements = summary.statements_executed,
        tables = summary.tables_created,
        rows = summary.rows_inserted,
        "restore complete"
    );
    if let Err(err) = log_audit(
        &state.pool,
        "backup_restore",
        Some("backups"),
        Some(serde_json::json!({
            "filename": payload.filename,
            "statements_executed": summary.statements_executed,
            "tables_created": summary.tables_created,
            "rows_inserted": summary.rows_inserted,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Restore complete",
        summary,
        Some(Meta::empty()),
    ))
}

/// Exact-token gate, checked before anything touches the database.
pub fn ensure_restore_token(confirm: &str) -> AppResult<()> {
    if confirm != "RESTORE" {
        return Err(AppError::BadRequest(
            "Restoring requires confirm=RESTORE".into(),
        ));
    }
    Ok(())
}

pub fn backup_filename(database: &str, created_at: DateTime<Utc>) -> String {
    format!(
        "{database}_backup_{}.sql",
        created_at.format(FILENAME_TIMESTAMP)
    )
}

/// Parse `{database}_backup_{timestamp}.sql`; anything else (including path
/// traversal attempts) is rejected by returning None.
pub fn parse_backup_filename(filename: &str) -> Option<(String, DateTime<Utc>)> {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return None;
    }
    let stem = filename.strip_suffix(".sql")?;
    let (database, timestamp) = stem.split_once("_backup_")?;
    if database.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(timestamp, FILENAME_TIMESTAMP).ok()?;
    Some((database.to_string(), Utc.from_utc_datetime(&naive)))
}

/// Split a dump into executable statements, dropping comments and
/// whitespace, since postgres prepared statements take one command at a
/// time. Semicolons, `--` markers, and newlines inside single-quoted
/// literals belong to the data, so the scan tracks literal state (with
/// `''` as the quote escape) and only splits and strips outside of it.
pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = sql.chars().peekable();
    let mut in_literal = false;

    while let Some(ch) = chars.next() {
        if in_literal {
            current.push(ch);
            if ch == '\'' {
                // '' stays inside the literal
                if chars.peek() == Some(&'\'') {
                    current.push('\'');
                    chars.next();
                } else {
                    in_literal = false;
                }
            }
        } else if ch == '\'' {
            in_literal = true;
            current.push(ch);
        } else if ch == '-' && chars.peek() == Some(&'-') {
            // line comment runs to end of line
            for skipped in chars.by_ref() {
                if skipped == '\n' {
                    break;
                }
            }
            current.push('\n');
        } else if ch == ';' {
            push_statement(&mut statements, &current);
            current.clear();
        } else {
            current.push(ch);
        }
    }
    push_statement(&mut statements, &current);
    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let stmt = raw.trim();
    if !stmt.is_empty() {
        statements.push(format!("{stmt};"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_round_trips() {
        let created_at = Utc.with_ymd_and_hms(2025, 8, 25, 14, 30, 5).unwrap();
        let filename = backup_filename("autoshop", created_at);
        assert_eq!(filename, "autoshop_backup_2025-08-25T14-30-05.sql");
        assert_eq!(
            parse_backup_filename(&filename),
            Some(("autoshop".to_string(), created_at))
        );
    }

    #[test]
    fn rejects_foreign_and_hostile_filenames() {
        assert_eq!(parse_backup_filename("notes.txt"), None);
        assert_eq!(parse_backup_filename("autoshop.sql"), None);
        assert_eq!(parse_backup_filename("_backup_2025-08-25T14-30-05.sql"), None);
        assert_eq!(
            parse_backup_filename("../etc/autoshop_backup_2025-08-25T14-30-05.sql"),
            None
        );
        assert_eq!(
            parse_backup_filename("autoshop_backup_yesterday.sql"),
            None
        );
    }

    #[test]
    fn restore_token_must_match_exactly() {
        assert!(ensure_restore_token("RESTORE").is_ok());
        assert!(ensure_restore_token("restore").is_err());
        assert!(ensure_restore_token("yes").is_err());
        assert!(ensure_restore_token("").is_err());
    }

    #[test]
    fn splits_statements_and_drops_comments() {
        let sql = r#"
-- PostgreSQL database dump
DROP TABLE IF EXISTS customers;
CREATE TABLE customers (
    id uuid PRIMARY KEY
);
-- Data for Name: customers
INSERT INTO customers VALUES ('a');
INSERT INTO customers VALUES ('b');
"#;
        let statements = split_sql_statements(sql);
        assert_eq!(statements.len(), 4);
        assert!(statements[1].starts_with("CREATE TABLE"));
        assert!(statements[3].starts_with("INSERT"));
        let tables = statements
            .iter()
            .filter(|s| s.to_uppercase().starts_with("CREATE TABLE"))
            .count();
        assert_eq!(tables, 1);
    }

    #[test]
    fn semicolons_inside_literals_do_not_split() {
        let statements = split_sql_statements(
            "INSERT INTO customers VALUES ('waiting; call later');\nINSERT INTO customers VALUES ('it''s; fine');",
        );
        assert_eq!(
            statements,
            vec![
                "INSERT INTO customers VALUES ('waiting; call later');".to_string(),
                "INSERT INTO customers VALUES ('it''s; fine');".to_string(),
            ]
        );
    }

    #[test]
    fn comment_markers_inside_literals_survive() {
        let statements = split_sql_statements(
            "INSERT INTO vehicles (notes) VALUES ('check tires\n-- customer request\nand alignment');",
        );
        assert_eq!(statements.len(), 1);
        assert!(statements[0].contains("-- customer request"), "{:?}", statements[0]);
    }
}
