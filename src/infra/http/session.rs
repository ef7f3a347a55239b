//! Identity of the requesting user, as asserted by the authenticating edge.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use tracing::debug;

use crate::domain::user::UserId;

use super::api::{ApiError, ApiState};

/// Extractor for routes that serve user-scoped data.
///
/// Reads the configured identity header; a missing, blank or malformed value
/// is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    ApiState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ApiState::from_ref(state);

        let raw = parts
            .headers
            .get(&state.session_header)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;

        let user = UserId::parse(raw).map_err(|err| {
            debug!(
                target = "creatuno::http::session",
                error = %err,
                "rejecting malformed identity header"
            );
            ApiError::unauthorized()
        })?;

        Ok(Self(user))
    }
}
