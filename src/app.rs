use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/overview", get(handlers::overview))
        .route("/api/aggregate", get(handlers::aggregate))
        .route("/api/months", get(handlers::months))
        .with_state(state)
}
