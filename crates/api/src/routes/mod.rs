pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /validation/schemas                              list schemas (GET)
/// /validation/rule-types                           accepted rule types (GET)
/// /validation/validate                             validate records (POST)
/// /validation/check                                validate one record, 422 on failure (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/validation", validation::validation_router())
}
