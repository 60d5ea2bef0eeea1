use std::sync::Arc;

use keel_core::validation::schema::SchemaRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Validation schemas keyed by entity type. Read-only after startup.
    pub schemas: Arc<SchemaRegistry>,
}
