use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Append one audit row. Destructive operations (deletes, restore) and
/// status changes all pass through here; callers downgrade failures to a
/// warning so the audit trail never blocks the operation it records.
pub async fn log_audit(
    pool: &DbPool,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, action, resource, metadata)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(id)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}
