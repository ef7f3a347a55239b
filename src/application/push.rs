use std::sync::Arc;

use creatuno_api_types::{PushSubscriptionRequest, PushSubscriptionView};
use thiserror::Error;
use tracing::info;

use crate::application::repos::{PushSubscriptionsRepo, RepoError};
use crate::domain::push::{PushSubscriptionDraft, PushSubscriptionError};
use crate::domain::user::UserId;

const SOURCE: &str = "application::push::PushService";

#[derive(Debug, Error)]
pub enum PushError {
    #[error(transparent)]
    Invalid(#[from] PushSubscriptionError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct PushService {
    subscriptions: Arc<dyn PushSubscriptionsRepo>,
}

impl PushService {
    pub fn new(subscriptions: Arc<dyn PushSubscriptionsRepo>) -> Self {
        Self { subscriptions }
    }

    pub async fn subscribe(
        &self,
        user: &UserId,
        request: &PushSubscriptionRequest,
    ) -> Result<PushSubscriptionView, PushError> {
        let draft = PushSubscriptionDraft::new(
            &request.endpoint,
            &request.keys.p256dh,
            &request.keys.auth,
            request.user_agent.as_deref(),
        )?;

        let record = self.subscriptions.upsert_subscription(user, &draft).await?;

        info!(
            target = SOURCE,
            user_id = %user,
            subscription_id = %record.id,
            "push subscription stored"
        );

        Ok(PushSubscriptionView {
            id: record.id,
            endpoint: record.endpoint,
            updated_at: record.updated_at,
        })
    }
}
