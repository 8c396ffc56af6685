use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod store;

// Build the page router without binding state; it will be provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(store::router())
        .nest("/cart", cart::router())
        .nest("/dashboard", dashboard::router())
}
