use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::identity::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        // Sessions expire after a period of inactivity, not a fixed lifetime
        let sessions = SessionStore::new(Duration::from_secs(config.session_timeout_seconds));

        Self {
            db,
            config: Arc::new(config),
            sessions,
        }
    }
}
