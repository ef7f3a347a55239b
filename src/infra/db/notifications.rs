use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{NotificationsRepo, RepoError};
use crate::domain::entities::NotificationRecord;
use crate::domain::types::NotificationKind;
use crate::domain::user::UserId;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: UserId,
    kind: NotificationKind,
    title: String,
    body: Option<String>,
    link: Option<String>,
    read_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
}

impl From<NotificationRow> for NotificationRecord {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            title: row.title,
            body: row.body,
            link: row.link,
            read_at: row.read_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl NotificationsRepo for PostgresRepositories {
    async fn list_for_user(
        &self,
        user: &UserId,
        unread_only: bool,
        limit: u32,
    ) -> Result<Vec<NotificationRecord>, RepoError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, user_id, kind, title, body, link, read_at, created_at
            FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR read_at IS NULL)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(user.as_str())
        .bind(unread_only)
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(NotificationRecord::from).collect())
    }

    async fn count_unread_notifications(&self, user: &UserId) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
