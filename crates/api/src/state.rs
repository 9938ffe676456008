use std::sync::Arc;

use userdir_db::Directory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: `Directory` wraps a pool handle and the config is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage client for users and addresses.
    pub directory: Directory,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
