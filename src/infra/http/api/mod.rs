pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::ApiState;

use axum::{
    Router,
    routing::{get, post},
};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/stats", get(handlers::platform_stats))
        .route("/api/opportunities", get(handlers::list_opportunities))
        .route("/api/notifications", get(handlers::list_notifications))
        .route("/api/messages/unread", get(handlers::unread_messages))
        .route("/api/escrow/{id}", get(handlers::escrow_status))
        .route(
            "/api/push/subscriptions",
            post(handlers::upsert_push_subscription),
        )
        .route("/_health/db", get(handlers::db_health))
        .with_state(state)
}
