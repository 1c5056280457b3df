use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::ResetNotifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: innkeep_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Delivers password-reset tokens to their users.
    pub reset_notifier: Arc<dyn ResetNotifier>,
}
