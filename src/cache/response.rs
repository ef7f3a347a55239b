//! JSON responses carrying a `Cache-Control` header derived from a [`CachePolicy`].

use axum::{
    body::Body,
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use creatuno_api_types::{ApiErrorBody, ApiErrorMessage};
use serde::Serialize;
use tracing::error;

use crate::application::error::ErrorReport;

use super::policy::CachePolicy;

const JSON_CONTENT_TYPE: &str = "application/json";
const SERIALIZATION_ERROR_CODE: &str = "serialization_error";

/// Handler return type pairing a payload with the policy it is served under.
#[derive(Debug, Clone)]
pub struct CachedJson<T> {
    pub payload: T,
    pub policy: CachePolicy,
}

impl<T: Serialize> CachedJson<T> {
    pub fn new(payload: T, policy: CachePolicy) -> Self {
        Self { payload, policy }
    }
}

impl<T: Serialize> IntoResponse for CachedJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.payload) {
            Ok(body) => encode(Bytes::from(body), &self.policy),
            Err(err) => serialization_failure(&err),
        }
    }
}

/// Serialize `payload` as the response body and apply `policy`.
pub fn cached_json<T: Serialize>(payload: T, policy: CachePolicy) -> Response {
    CachedJson::new(payload, policy).into_response()
}

/// Shared-cacheable JSON. Defaults to `max-age=60, stale-while-revalidate=300`.
pub fn public_cached_json<T: Serialize>(
    payload: T,
    max_age_seconds: Option<u32>,
    stale_while_revalidate_seconds: Option<u32>,
) -> Response {
    let policy = CachePolicy::public()
        .max_age(max_age_seconds.unwrap_or(CachePolicy::DEFAULT_PUBLIC_MAX_AGE))
        .stale_while_revalidate(
            stale_while_revalidate_seconds
                .unwrap_or(CachePolicy::DEFAULT_PUBLIC_STALE_WHILE_REVALIDATE),
        );
    cached_json(payload, policy)
}

/// User-specific JSON. Defaults to `max-age=0`; never stale-while-revalidate.
pub fn private_cached_json<T: Serialize>(payload: T, max_age_seconds: Option<u32>) -> Response {
    let policy = CachePolicy::private()
        .max_age(max_age_seconds.unwrap_or(CachePolicy::DEFAULT_PRIVATE_MAX_AGE));
    cached_json(payload, policy)
}

fn encode(body: Bytes, policy: &CachePolicy) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = policy.status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(CACHE_CONTROL, policy.header_value());
    response
}

fn serialization_failure(err: &serde_json::Error) -> Response {
    const SOURCE: &str = "cache::response::cached_json";

    error!(target = SOURCE, error = %err, "failed to serialize response payload");

    let body = ApiErrorBody {
        error: ApiErrorMessage {
            code: SERIALIZATION_ERROR_CODE.to_string(),
            message: "Response could not be encoded".to_string(),
            hint: None,
        },
    };
    let policy = CachePolicy::private().status(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = match serde_json::to_vec(&body) {
        Ok(bytes) => encode(Bytes::from(bytes), &policy),
        Err(_) => {
            let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
            response
                .headers_mut()
                .insert(CACHE_CONTROL, policy.header_value());
            response
        }
    };
    ErrorReport::from_error(SOURCE, StatusCode::INTERNAL_SERVER_ERROR, err).attach(&mut response);
    response
}
