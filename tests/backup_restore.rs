use std::sync::Arc;

use async_trait::async_trait;
use axum_autoshop_api::{
    config::{AppConfig, database_name_from_url},
    db::{create_orm_conn, create_pool, run_migrations},
    dto::backup::RestoreRequest,
    error::AppError,
    mailer::{EmailConfig, Mailer, MailerError, OutboundEmail},
    services::backup_service,
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};
use tokio::fs;
use uuid::Uuid;

struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, _config: &EmailConfig, _email: &OutboundEmail) -> Result<(), MailerError> {
        Ok(())
    }
}

// Replays a dump back into the database and checks both outcomes: a clean
// dump restores with accurate counts (quoted semicolons intact), and a
// broken one reports how far the replay got.
#[tokio::test]
async fn restore_replays_dump_and_reports_progress() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };
    let Some(database) = database_name_from_url(&database_url) else {
        anyhow::bail!("database URL has no database name");
    };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    let backup_dir = std::env::temp_dir().join(format!("autoshop-restore-{}", Uuid::new_v4()));
    let config = AppConfig {
        database_url: database_url.clone(),
        host: "127.0.0.1".into(),
        port: 0,
        backup_dir: backup_dir.clone(),
        backup_databases: vec![database.clone()],
    };
    let state = AppState::new(pool, orm, config, Arc::new(NullMailer));
    fs::create_dir_all(&backup_dir).await?;

    // A dump shaped like pg_dump --clean --inserts output, with customer
    // data that contains semicolons and an escaped quote.
    let good = format!("{database}_backup_2025-08-25T10-00-00.sql");
    fs::write(
        backup_dir.join(&good),
        "-- PostgreSQL database dump\n\
         DROP TABLE IF EXISTS restore_scratch;\n\
         CREATE TABLE restore_scratch (id integer PRIMARY KEY, note text);\n\
         INSERT INTO restore_scratch VALUES (1, 'waiting; call later');\n\
         INSERT INTO restore_scratch VALUES (2, 'it''s done');\n",
    )
    .await?;

    let summary = backup_service::restore(
        &state,
        RestoreRequest {
            filename: good,
            confirm: "RESTORE".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(summary.statements_executed, 4);
    assert_eq!(summary.tables_created, 1);
    assert_eq!(summary.rows_inserted, 2);

    // The semicolon-laden note survived the replay verbatim
    let backend = state.orm.get_database_backend();
    let row = state
        .orm
        .query_one(Statement::from_string(
            backend,
            "SELECT note FROM restore_scratch WHERE id = 1",
        ))
        .await?
        .unwrap();
    let note: String = row.try_get("", "note")?;
    assert_eq!(note, "waiting; call later");

    // A dump that fails mid-replay reports the statement counts
    let bad = format!("{database}_backup_2025-08-25T11-00-00.sql");
    fs::write(
        backup_dir.join(&bad),
        "DROP TABLE IF EXISTS restore_scratch_two;\n\
         CREATE TABLE restore_scratch_two (id integer PRIMARY KEY);\n\
         INSERT INTO missing_relation VALUES (1);\n\
         INSERT INTO restore_scratch_two VALUES (2);\n",
    )
    .await?;

    let failed = backup_service::restore(
        &state,
        RestoreRequest {
            filename: bad,
            confirm: "RESTORE".into(),
        },
    )
    .await;
    match failed {
        Err(AppError::Internal(err)) => {
            let message = err.to_string();
            assert!(message.contains("after 2 of 4 statements"), "{message}");
        }
        other => panic!("expected Internal error, got {other:?}"),
    }

    // Cleanup
    for table in ["restore_scratch", "restore_scratch_two"] {
        state
            .orm
            .execute(Statement::from_string(
                backend,
                format!("DROP TABLE IF EXISTS {table}"),
            ))
            .await?;
    }
    fs::remove_dir_all(&backup_dir).await.ok();

    Ok(())
}
