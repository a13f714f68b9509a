use std::sync::Arc;

use cantina_db::DbPool;
use cantina_mailer::ReportDispatcher;

use crate::config::ServerConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: DbPool,
    /// Server configuration loaded at startup.
    pub config: Arc<ServerConfig>,
    /// Report dispatcher configured for the active mail mode.
    pub dispatcher: Arc<ReportDispatcher>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, dispatcher: ReportDispatcher) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }
}
