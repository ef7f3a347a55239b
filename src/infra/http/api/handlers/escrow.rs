use axum::extract::{Path, State};
use creatuno_api_types::EscrowStatusResponse;
use uuid::Uuid;

use crate::application::escrow::EscrowError;
use crate::cache::{CachedJson, EndpointClass};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;
use crate::infra::http::session::AuthenticatedUser;

pub async fn escrow_status(
    State(state): State<ApiState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<CachedJson<EscrowStatusResponse>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|err| ApiError::bad_request("invalid escrow id", Some(err.to_string())))?;

    let status = state
        .escrow
        .status(&user, id)
        .await
        .map_err(escrow_to_api)?;

    Ok(CachedJson::new(
        status,
        state.policies.select(EndpointClass::UserScoped),
    ))
}

fn escrow_to_api(err: EscrowError) -> ApiError {
    match err {
        EscrowError::NotFound(_) => ApiError::not_found("Escrow not found"),
        EscrowError::Repo(err) => ApiError::from(err),
    }
}
