//! Web-push subscription invariants.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;
use url::Url;

const MAX_ENDPOINT_LEN: usize = 2048;
const MAX_USER_AGENT_LEN: usize = 512;
/// Uncompressed P-256 public point.
const P256DH_KEY_BYTES: usize = 65;
const AUTH_SECRET_BYTES: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushSubscriptionError {
    #[error("endpoint is not a valid URL")]
    InvalidEndpoint,
    #[error("endpoint must use https")]
    InsecureEndpoint,
    #[error("endpoint exceeds {MAX_ENDPOINT_LEN} bytes")]
    EndpointTooLong,
    #[error("key `{name}` is missing")]
    MissingKey { name: &'static str },
    #[error("key `{name}` is not base64url encoded")]
    MalformedKey { name: &'static str },
    #[error("key `{name}` must decode to {expected} bytes, got {actual}")]
    KeyLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Validated subscription ready to be upserted, keyed on `endpoint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSubscriptionDraft {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub user_agent: Option<String>,
}

impl PushSubscriptionDraft {
    pub fn new(
        endpoint: &str,
        p256dh: &str,
        auth: &str,
        user_agent: Option<&str>,
    ) -> Result<Self, PushSubscriptionError> {
        let endpoint = endpoint.trim();
        if endpoint.len() > MAX_ENDPOINT_LEN {
            return Err(PushSubscriptionError::EndpointTooLong);
        }
        let url = Url::parse(endpoint).map_err(|_| PushSubscriptionError::InvalidEndpoint)?;
        if url.scheme() != "https" {
            return Err(PushSubscriptionError::InsecureEndpoint);
        }
        if url.host_str().is_none() {
            return Err(PushSubscriptionError::InvalidEndpoint);
        }

        // Stored as sent; the push service matches on the exact string.
        Ok(Self {
            endpoint: endpoint.to_string(),
            p256dh: validate_key("p256dh", p256dh, P256DH_KEY_BYTES)?,
            auth: validate_key("auth", auth, AUTH_SECRET_BYTES)?,
            user_agent: user_agent.and_then(normalize_user_agent),
        })
    }
}

fn validate_key(
    name: &'static str,
    raw: &str,
    expected: usize,
) -> Result<String, PushSubscriptionError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(PushSubscriptionError::MissingKey { name });
    }
    let decoded = URL_SAFE_NO_PAD
        .decode(value.trim_end_matches('='))
        .map_err(|_| PushSubscriptionError::MalformedKey { name })?;
    if decoded.len() != expected {
        return Err(PushSubscriptionError::KeyLength {
            name,
            expected,
            actual: decoded.len(),
        });
    }
    Ok(value.to_string())
}

fn normalize_user_agent(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_USER_AGENT_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send/abc123";

    fn p256dh() -> String {
        URL_SAFE_NO_PAD.encode([4u8; P256DH_KEY_BYTES])
    }

    fn auth() -> String {
        URL_SAFE_NO_PAD.encode([7u8; AUTH_SECRET_BYTES])
    }

    #[test]
    fn accepts_well_formed_subscription() {
        let draft = PushSubscriptionDraft::new(ENDPOINT, &p256dh(), &auth(), Some(" Firefox "))
            .expect("valid subscription");
        assert_eq!(draft.endpoint, ENDPOINT);
        assert_eq!(draft.user_agent.as_deref(), Some("Firefox"));
    }

    #[test]
    fn padded_keys_are_accepted() {
        let padded_auth = format!("{}==", auth());
        let draft = PushSubscriptionDraft::new(ENDPOINT, &p256dh(), &padded_auth, None)
            .expect("padded key");
        assert_eq!(draft.auth, padded_auth);
    }

    #[test]
    fn endpoint_is_kept_as_sent() {
        let draft = PushSubscriptionDraft::new(" https://push.example.net ", &p256dh(), &auth(), None)
            .expect("valid subscription");
        assert_eq!(draft.endpoint, "https://push.example.net");
    }

    #[test]
    fn rejects_plain_http() {
        let err = PushSubscriptionDraft::new("http://push.example/x", &p256dh(), &auth(), None)
            .expect_err("http endpoint");
        assert_eq!(err, PushSubscriptionError::InsecureEndpoint);
    }

    #[test]
    fn rejects_garbage_endpoint() {
        let err = PushSubscriptionDraft::new("not a url", &p256dh(), &auth(), None)
            .expect_err("garbage");
        assert_eq!(err, PushSubscriptionError::InvalidEndpoint);
    }

    #[test]
    fn rejects_missing_key() {
        assert_eq!(
            PushSubscriptionDraft::new(ENDPOINT, " ", &auth(), None),
            Err(PushSubscriptionError::MissingKey { name: "p256dh" })
        );
    }

    #[test]
    fn rejects_keys_that_do_not_decode() {
        assert_eq!(
            PushSubscriptionDraft::new(ENDPOINT, &p256dh(), "a b", None),
            Err(PushSubscriptionError::MalformedKey { name: "auth" })
        );
        assert_eq!(
            PushSubscriptionDraft::new(ENDPOINT, "=a=b=", &auth(), None),
            Err(PushSubscriptionError::MalformedKey { name: "p256dh" })
        );
        assert_eq!(
            PushSubscriptionDraft::new(ENDPOINT, "k", &auth(), None),
            Err(PushSubscriptionError::MalformedKey { name: "p256dh" })
        );
    }

    #[test]
    fn rejects_keys_of_wrong_length() {
        let short_auth = URL_SAFE_NO_PAD.encode([7u8; 8]);
        assert_eq!(
            PushSubscriptionDraft::new(ENDPOINT, &p256dh(), &short_auth, None),
            Err(PushSubscriptionError::KeyLength {
                name: "auth",
                expected: AUTH_SECRET_BYTES,
                actual: 8,
            })
        );
        assert_eq!(
            PushSubscriptionDraft::new(ENDPOINT, &auth(), &auth(), None),
            Err(PushSubscriptionError::KeyLength {
                name: "p256dh",
                expected: P256DH_KEY_BYTES,
                actual: AUTH_SECRET_BYTES,
            })
        );
    }

    #[test]
    fn blank_user_agent_is_dropped() {
        let draft = PushSubscriptionDraft::new(ENDPOINT, &p256dh(), &auth(), Some("   "))
            .expect("valid subscription");
        assert_eq!(draft.user_agent, None);
    }
}
