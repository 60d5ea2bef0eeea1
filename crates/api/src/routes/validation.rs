//! Route definitions for the `/validation` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/validation`.
///
/// ```text
/// GET    /schemas    -> list_schemas
/// GET    /rule-types -> list_rule_types
/// POST   /validate   -> validate     (batch, always 200)
/// POST   /check      -> check        (single record, 422 when invalid)
/// ```
pub fn validation_router() -> Router<AppState> {
    Router::new()
        .route("/schemas", get(validation::list_schemas))
        .route("/rule-types", get(validation::list_rule_types))
        .route("/validate", post(validation::validate))
        .route("/check", post(validation::check))
}
