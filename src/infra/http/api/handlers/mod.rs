//! API handlers organized by resource type.
//!
//! Every handler picks an `EndpointClass`, resolves it through
//! `ApiState::policies`, and returns a `CachedJson` so the `Cache-Control`
//! header is always set by the cache layer.

mod escrow;
mod health;
mod inbox;
mod opportunities;
mod push;
mod stats;

pub use escrow::*;
pub use health::*;
pub use inbox::*;
pub use opportunities::*;
pub use push::*;
pub use stats::*;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpportunityListQuery {
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotificationListQuery {
    #[serde(deserialize_with = "empty_as_none")]
    pub unread_only: Option<bool>,
}

/// `?limit=` means "use the default", not a parse error.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(uri: &str) -> Result<T, String> {
        let uri: Uri = uri.parse().expect("uri");
        Query::<T>::try_from_uri(&uri)
            .map(|Query(value)| value)
            .map_err(|err| err.body_text())
    }

    #[test]
    fn empty_values_are_treated_as_absent() {
        let query: OpportunityListQuery =
            parse("/api/opportunities?limit=&category=").expect("empty params");
        assert_eq!(query.limit, None);
        assert_eq!(query.category, None);

        let query: NotificationListQuery =
            parse("/api/notifications?unread_only=").expect("empty param");
        assert_eq!(query.unread_only, None);
    }

    #[test]
    fn present_values_are_parsed() {
        let query: OpportunityListQuery =
            parse("/api/opportunities?limit=7&category=design").expect("params");
        assert_eq!(query.limit, Some(7));
        assert_eq!(query.category.as_deref(), Some("design"));

        let query: NotificationListQuery =
            parse("/api/notifications?unread_only=true").expect("param");
        assert_eq!(query.unread_only, Some(true));
    }

    #[test]
    fn malformed_values_still_fail() {
        assert!(parse::<OpportunityListQuery>("/api/opportunities?limit=-3").is_err());
        assert!(parse::<NotificationListQuery>("/api/notifications?unread_only=maybe").is_err());
    }
}
