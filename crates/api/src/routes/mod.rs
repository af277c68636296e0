pub mod health;
pub mod tour;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /tours          list, create
/// /tours/{id}     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tours", tour::router())
}
