//! Opaque user identifiers issued by the external identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_USER_ID_LEN: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("user id is empty")]
    Empty,
    #[error("user id exceeds {MAX_USER_ID_LEN} bytes")]
    TooLong,
    #[error("user id contains control characters")]
    ControlCharacter,
}

/// Identity-provider subject for the requesting user. Never interpreted, only compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }
        if trimmed.len() > MAX_USER_ID_LEN {
            return Err(UserIdError::TooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserIdError::ControlCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
