//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    EscrowRecord, NotificationRecord, OpportunityRecord, PushSubscriptionRecord,
};
use crate::domain::push::PushSubscriptionDraft;
use crate::domain::user::UserId;

pub use creatuno_api_types::PlatformStats;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpportunityQueryFilter {
    pub category: Option<String>,
}

#[async_trait]
pub trait StatsRepo: Send + Sync {
    async fn platform_stats(&self) -> Result<PlatformStats, RepoError>;
}

#[async_trait]
pub trait OpportunitiesRepo: Send + Sync {
    /// Open opportunities, newest first.
    async fn list_open(
        &self,
        filter: &OpportunityQueryFilter,
        limit: u32,
    ) -> Result<Vec<OpportunityRecord>, RepoError>;
}

#[async_trait]
pub trait NotificationsRepo: Send + Sync {
    /// Notifications addressed to `user`, newest first.
    async fn list_for_user(
        &self,
        user: &UserId,
        unread_only: bool,
        limit: u32,
    ) -> Result<Vec<NotificationRecord>, RepoError>;

    async fn count_unread_notifications(&self, user: &UserId) -> Result<i64, RepoError>;
}

#[async_trait]
pub trait MessagesRepo: Send + Sync {
    /// Messages sent to `user` by other participants that `user` has not read.
    async fn count_unread_messages(&self, user: &UserId) -> Result<i64, RepoError>;
}

#[async_trait]
pub trait EscrowRepo: Send + Sync {
    async fn find_escrow(&self, id: Uuid) -> Result<Option<EscrowRecord>, RepoError>;
}

#[async_trait]
pub trait PushSubscriptionsRepo: Send + Sync {
    /// Insert or refresh the subscription identified by `draft.endpoint`.
    async fn upsert_subscription(
        &self,
        user: &UserId,
        draft: &PushSubscriptionDraft,
    ) -> Result<PushSubscriptionRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
