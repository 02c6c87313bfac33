use axum::Router;

use crate::app_state::SharedState;

pub mod album;
pub mod capsule;
pub mod notification;

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .nest("/capsules", capsule::router())
        .nest("/albums", album::router())
        .nest("/notifications", notification::router())
}

/// All API routes under `/api`, without middleware.
pub fn app(state: SharedState) -> Router {
    Router::new().nest("/api", api_router()).with_state(state)
}
