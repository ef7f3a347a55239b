use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use creatuno_api_types::{NotificationsResponse, UnreadMessagesResponse};

use super::NotificationListQuery;
use crate::cache::{CachedJson, EndpointClass};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;
use crate::infra::http::session::AuthenticatedUser;

pub async fn list_notifications(
    State(state): State<ApiState>,
    AuthenticatedUser(user): AuthenticatedUser,
    query: Result<Query<NotificationListQuery>, QueryRejection>,
) -> Result<CachedJson<NotificationsResponse>, ApiError> {
    let Query(query) = query
        .map_err(|err| ApiError::bad_request("invalid query", Some(err.body_text())))?;

    let response = state
        .inbox
        .notifications(&user, query.unread_only.unwrap_or(false))
        .await?;

    Ok(CachedJson::new(
        response,
        state.policies.select(EndpointClass::UserScoped),
    ))
}

pub async fn unread_messages(
    State(state): State<ApiState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<CachedJson<UnreadMessagesResponse>, ApiError> {
    let unread = state.inbox.unread_messages(&user).await?;

    Ok(CachedJson::new(
        UnreadMessagesResponse { unread },
        state.policies.select(EndpointClass::UserScoped),
    ))
}
