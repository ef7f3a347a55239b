//! `Cache-Control` policy values and their directive encoding.

use std::fmt;

use axum::http::{HeaderValue, StatusCode};

/// Who may keep a cached copy of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Shared caches (CDNs, proxies) may store the response.
    #[default]
    Public,
    /// Only the requesting user's agent may store the response.
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Caching intent and freshness window for a single outgoing response.
///
/// Seconds are unsigned so a negative window cannot be expressed. A zero
/// `stale_while_revalidate` disables the directive instead of emitting `=0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub visibility: Visibility,
    pub max_age_seconds: u32,
    pub stale_while_revalidate_seconds: u32,
    pub status: StatusCode,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            visibility: Visibility::Public,
            max_age_seconds: 0,
            stale_while_revalidate_seconds: 0,
            status: StatusCode::OK,
        }
    }
}

impl CachePolicy {
    pub const DEFAULT_PUBLIC_MAX_AGE: u32 = 60;
    pub const DEFAULT_PUBLIC_STALE_WHILE_REVALIDATE: u32 = 300;
    pub const DEFAULT_PRIVATE_MAX_AGE: u32 = 0;

    /// `public, max-age=0` with status 200.
    pub fn public() -> Self {
        Self::default()
    }

    /// `private, max-age=0` with status 200.
    pub fn private() -> Self {
        Self {
            visibility: Visibility::Private,
            ..Self::default()
        }
    }

    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    pub fn stale_while_revalidate(mut self, seconds: u32) -> Self {
        self.stale_while_revalidate_seconds = seconds;
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    /// Ordered directive tokens: visibility, `max-age`, then
    /// `stale-while-revalidate` when non-zero.
    pub fn directives(&self) -> Vec<String> {
        let mut directives = Vec::with_capacity(3);
        directives.push(self.visibility.as_str().to_string());
        directives.push(format!("max-age={}", self.max_age_seconds));
        if self.stale_while_revalidate_seconds > 0 {
            directives.push(format!(
                "stale-while-revalidate={}",
                self.stale_while_revalidate_seconds
            ));
        }
        directives
    }

    pub fn header_value(&self) -> HeaderValue {
        // Only ASCII tokens and digits are ever produced.
        HeaderValue::from_str(&self.to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("private, max-age=0"))
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.directives().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_public_zero_max_age() {
        let policy = CachePolicy::default();
        assert_eq!(policy.to_string(), "public, max-age=0");
        assert_eq!(policy.status, StatusCode::OK);
    }

    #[test]
    fn zero_stale_while_revalidate_is_omitted() {
        let policy = CachePolicy::public().max_age(120).stale_while_revalidate(0);
        assert_eq!(policy.to_string(), "public, max-age=120");
        assert!(!policy.to_string().contains("stale-while-revalidate"));
    }

    #[test]
    fn stale_while_revalidate_is_last_token() {
        let policy = CachePolicy::public().max_age(300).stale_while_revalidate(600);
        let directives = policy.directives();
        assert_eq!(
            directives,
            vec!["public", "max-age=300", "stale-while-revalidate=600"]
        );
    }

    #[test]
    fn private_never_carries_public_marker() {
        for max_age in [0, 1, 59, 3600, u32::MAX] {
            let encoded = CachePolicy::private()
                .max_age(max_age)
                .stale_while_revalidate(30)
                .to_string();
            assert!(encoded.starts_with("private"));
            assert!(!encoded.contains("public"));
        }
    }

    #[test]
    fn header_value_matches_display() {
        let policy = CachePolicy::private().max_age(15);
        assert_eq!(policy.header_value(), "private, max-age=15");
    }

    #[test]
    fn status_is_carried_unchanged() {
        let policy = CachePolicy::public().status(StatusCode::NOT_FOUND);
        assert_eq!(policy.status, StatusCode::NOT_FOUND);
        assert_eq!(policy.to_string(), "public, max-age=0");
    }
}
