use std::sync::Arc;

use tokio::sync::RwLock;

use crate::clock::TimeSettings;
use crate::config::AppConfig;
use crate::db::{DbPool, OrmConn};
use crate::mailer::{EmailConfig, Mailer};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: AppConfig,
    pub mailer: Arc<dyn Mailer>,
    /// Entered through the UI, memory only; empty until configured.
    pub email_config: Arc<RwLock<Option<EmailConfig>>>,
    pub time_settings: Arc<RwLock<TimeSettings>>,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            pool,
            orm,
            config,
            mailer,
            email_config: Arc::new(RwLock::new(None)),
            time_settings: Arc::new(RwLock::new(TimeSettings::default())),
        }
    }
}
