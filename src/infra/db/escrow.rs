use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{EscrowRepo, RepoError};
use crate::domain::entities::EscrowRecord;
use crate::domain::types::EscrowStatus;
use crate::domain::user::UserId;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct EscrowRow {
    id: Uuid,
    payer_id: UserId,
    payee_id: UserId,
    status: EscrowStatus,
    amount_minor: i64,
    currency: String,
    updated_at: OffsetDateTime,
}

impl From<EscrowRow> for EscrowRecord {
    fn from(row: EscrowRow) -> Self {
        Self {
            id: row.id,
            payer_id: row.payer_id,
            payee_id: row.payee_id,
            status: row.status,
            amount_minor: row.amount_minor,
            currency: row.currency,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl EscrowRepo for PostgresRepositories {
    async fn find_escrow(&self, id: Uuid) -> Result<Option<EscrowRecord>, RepoError> {
        let row = sqlx::query_as::<_, EscrowRow>(
            r#"
            SELECT id, payer_id, payee_id, status, amount_minor, currency, updated_at
            FROM escrow_payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(EscrowRecord::from))
    }
}
