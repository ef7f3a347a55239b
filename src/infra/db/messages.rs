use async_trait::async_trait;

use crate::application::repos::{MessagesRepo, RepoError};
use crate::domain::user::UserId;

use super::{PostgresRepositories, map_sqlx_error};

#[async_trait]
impl MessagesRepo for PostgresRepositories {
    async fn count_unread_messages(&self, user: &UserId) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE recipient_id = $1 AND sender_id <> $1 AND read_at IS NULL
            "#,
        )
        .bind(user.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
