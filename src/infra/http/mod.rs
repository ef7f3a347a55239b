pub mod api;
mod middleware;
pub mod session;

pub use api::{ApiError, ApiState};
pub use middleware::RequestContext;

use axum::{Router, middleware as axum_middleware};

use middleware::{log_responses, set_request_context};

/// Full application router: API routes wrapped in request-id and logging layers.
pub fn build_router(state: ApiState) -> Router {
    api::build_api_router(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
