//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{
    types::{EscrowStatus, NotificationKind},
    user::UserId,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityRecord {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub currency: String,
    pub is_open: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: Option<String>,
    pub link: Option<String>,
    pub read_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl NotificationRecord {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EscrowRecord {
    pub id: Uuid,
    pub payer_id: UserId,
    pub payee_id: UserId,
    pub status: EscrowStatus,
    pub amount_minor: i64,
    pub currency: String,
    pub updated_at: OffsetDateTime,
}

impl EscrowRecord {
    /// Only the two parties of a payment may read its status.
    pub fn is_party(&self, user: &UserId) -> bool {
        &self.payer_id == user || &self.payee_id == user
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushSubscriptionRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub user_agent: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
