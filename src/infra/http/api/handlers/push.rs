use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use creatuno_api_types::{PushSubscriptionRequest, PushSubscriptionView};

use crate::application::push::PushError;
use crate::cache::{CachedJson, EndpointClass};
use crate::infra::http::api::error::{ApiError, codes};
use crate::infra::http::api::state::ApiState;
use crate::infra::http::session::AuthenticatedUser;

pub async fn upsert_push_subscription(
    State(state): State<ApiState>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<PushSubscriptionRequest>, JsonRejection>,
) -> Result<CachedJson<PushSubscriptionView>, ApiError> {
    let Json(request) = payload
        .map_err(|err| ApiError::bad_request("invalid request body", Some(err.body_text())))?;

    let view = state
        .push
        .subscribe(&user, &request)
        .await
        .map_err(push_to_api)?;

    Ok(CachedJson::new(
        view,
        state.policies.select(EndpointClass::UserScoped),
    ))
}

fn push_to_api(err: PushError) -> ApiError {
    match err {
        PushError::Invalid(err) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid push subscription",
            Some(err.to_string()),
        ),
        PushError::Repo(err) => ApiError::from(err),
    }
}
