//! Per-route choice of caching intent and freshness window.

use super::policy::CachePolicy;

const DEFAULT_STATS_MAX_AGE: u32 = 300;
const DEFAULT_STATS_STALE_WHILE_REVALIDATE: u32 = 600;

/// Kind of data an endpoint returns, as far as caching is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointClass {
    /// Platform-wide aggregate counts.
    PlatformStats,
    /// Listings identical for every visitor.
    PublicListing,
    /// Anything derived from the requesting user's identity.
    UserScoped,
    /// Degraded payload served after an upstream failure.
    Fallback,
}

/// Freshness window for a shared response class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    pub max_age_seconds: u32,
    pub stale_while_revalidate_seconds: u32,
}

impl Freshness {
    pub const fn new(max_age_seconds: u32, stale_while_revalidate_seconds: u32) -> Self {
        Self {
            max_age_seconds,
            stale_while_revalidate_seconds,
        }
    }
}

/// Resolves an [`EndpointClass`] to the [`CachePolicy`] its responses use.
///
/// User-scoped responses are always private; only their `max-age` is tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointPolicies {
    pub stats: Freshness,
    pub listing: Freshness,
    pub private_max_age_seconds: u32,
}

impl Default for EndpointPolicies {
    fn default() -> Self {
        Self {
            stats: Freshness::new(DEFAULT_STATS_MAX_AGE, DEFAULT_STATS_STALE_WHILE_REVALIDATE),
            listing: Freshness::new(
                CachePolicy::DEFAULT_PUBLIC_MAX_AGE,
                CachePolicy::DEFAULT_PUBLIC_STALE_WHILE_REVALIDATE,
            ),
            private_max_age_seconds: CachePolicy::DEFAULT_PRIVATE_MAX_AGE,
        }
    }
}

impl From<&crate::config::CacheSettings> for EndpointPolicies {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            stats: Freshness::new(
                settings.stats_max_age_seconds,
                settings.stats_stale_while_revalidate_seconds,
            ),
            listing: Freshness::new(
                settings.listing_max_age_seconds,
                settings.listing_stale_while_revalidate_seconds,
            ),
            private_max_age_seconds: settings.private_max_age_seconds,
        }
    }
}

impl EndpointPolicies {
    pub fn select(&self, class: EndpointClass) -> CachePolicy {
        match class {
            EndpointClass::PlatformStats => shared(self.stats),
            EndpointClass::PublicListing => shared(self.listing),
            EndpointClass::UserScoped => CachePolicy::private().max_age(self.private_max_age_seconds),
            EndpointClass::Fallback => CachePolicy::public(),
        }
    }
}

fn shared(freshness: Freshness) -> CachePolicy {
    CachePolicy::public()
        .max_age(freshness.max_age_seconds)
        .stale_while_revalidate(freshness.stale_while_revalidate_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Visibility;

    #[test]
    fn defaults_match_documented_windows() {
        let policies = EndpointPolicies::default();
        assert_eq!(
            policies.select(EndpointClass::PlatformStats).to_string(),
            "public, max-age=300, stale-while-revalidate=600"
        );
        assert_eq!(
            policies.select(EndpointClass::PublicListing).to_string(),
            "public, max-age=60, stale-while-revalidate=300"
        );
        assert_eq!(
            policies.select(EndpointClass::UserScoped).to_string(),
            "private, max-age=0"
        );
        assert_eq!(
            policies.select(EndpointClass::Fallback).to_string(),
            "public, max-age=0"
        );
    }

    #[test]
    fn user_scoped_stays_private_when_tuned() {
        let policies = EndpointPolicies {
            private_max_age_seconds: 30,
            ..EndpointPolicies::default()
        };
        let policy = policies.select(EndpointClass::UserScoped);
        assert_eq!(policy.visibility, Visibility::Private);
        assert_eq!(policy.stale_while_revalidate_seconds, 0);
        assert_eq!(policy.to_string(), "private, max-age=30");
    }

    #[test]
    fn settings_flow_into_selection() {
        let settings = crate::config::CacheSettings {
            stats_max_age_seconds: 10,
            stats_stale_while_revalidate_seconds: 0,
            listing_max_age_seconds: 20,
            listing_stale_while_revalidate_seconds: 40,
            private_max_age_seconds: 0,
        };
        let policies = EndpointPolicies::from(&settings);
        assert_eq!(
            policies.select(EndpointClass::PlatformStats).to_string(),
            "public, max-age=10"
        );
        assert_eq!(
            policies.select(EndpointClass::PublicListing).to_string(),
            "public, max-age=20, stale-while-revalidate=40"
        );
    }
}
