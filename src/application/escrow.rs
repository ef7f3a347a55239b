use std::sync::Arc;

use creatuno_api_types::EscrowStatusResponse;
use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{EscrowRepo, RepoError};
use crate::domain::user::UserId;

#[derive(Debug, Error)]
pub enum EscrowError {
    /// Missing, or visible only to other users.
    #[error("escrow `{0}` not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct EscrowService {
    escrows: Arc<dyn EscrowRepo>,
}

impl EscrowService {
    pub fn new(escrows: Arc<dyn EscrowRepo>) -> Self {
        Self { escrows }
    }

    pub async fn status(&self, user: &UserId, id: Uuid) -> Result<EscrowStatusResponse, EscrowError> {
        let record = self
            .escrows
            .find_escrow(id)
            .await?
            .filter(|record| record.is_party(user))
            .ok_or(EscrowError::NotFound(id))?;

        Ok(EscrowStatusResponse {
            id: record.id,
            status: record.status,
            amount_minor: record.amount_minor,
            currency: record.currency,
            settled: record.status.is_settled(),
            updated_at: record.updated_at,
        })
    }
}
