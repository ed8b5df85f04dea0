use std::sync::Arc;

use mosstroi_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted, everything else is behind
/// `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: mosstroi_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Post-commit domain events (new chat messages).
    pub event_bus: Arc<EventBus>,
}
