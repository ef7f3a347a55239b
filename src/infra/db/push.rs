use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{PushSubscriptionsRepo, RepoError};
use crate::domain::entities::PushSubscriptionRecord;
use crate::domain::push::PushSubscriptionDraft;
use crate::domain::user::UserId;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PushSubscriptionRow {
    id: Uuid,
    user_id: UserId,
    endpoint: String,
    p256dh: String,
    auth: String,
    user_agent: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PushSubscriptionRow> for PushSubscriptionRecord {
    fn from(row: PushSubscriptionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            endpoint: row.endpoint,
            p256dh: row.p256dh,
            auth: row.auth,
            user_agent: row.user_agent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PushSubscriptionsRepo for PostgresRepositories {
    async fn upsert_subscription(
        &self,
        user: &UserId,
        draft: &PushSubscriptionDraft,
    ) -> Result<PushSubscriptionRecord, RepoError> {
        // A browser re-subscribing on a shared device moves the endpoint to the new user.
        let row = sqlx::query_as::<_, PushSubscriptionRow>(
            r#"
            INSERT INTO push_subscriptions (id, user_id, endpoint, p256dh, auth, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (endpoint) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                p256dh = EXCLUDED.p256dh,
                auth = EXCLUDED.auth,
                user_agent = EXCLUDED.user_agent,
                updated_at = now()
            RETURNING id, user_id, endpoint, p256dh, auth, user_agent, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.as_str())
        .bind(&draft.endpoint)
        .bind(&draft.p256dh)
        .bind(&draft.auth)
        .bind(draft.user_agent.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PushSubscriptionRecord::from(row))
    }
}
