use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use creatuno_api_types::OpportunityListResponse;

use super::OpportunityListQuery;
use crate::cache::{CachedJson, EndpointClass};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn list_opportunities(
    State(state): State<ApiState>,
    query: Result<Query<OpportunityListQuery>, QueryRejection>,
) -> Result<CachedJson<OpportunityListResponse>, ApiError> {
    let Query(query) = query
        .map_err(|err| ApiError::bad_request("invalid query", Some(err.body_text())))?;

    let opportunities = state
        .opportunities
        .list_open(query.category.as_deref(), query.limit)
        .await?;

    Ok(CachedJson::new(
        OpportunityListResponse { opportunities },
        state.policies.select(EndpointClass::PublicListing),
    ))
}
