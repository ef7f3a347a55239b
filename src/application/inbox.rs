//! Per-user notification and message counters.

use std::sync::Arc;

use creatuno_api_types::{NotificationView, NotificationsResponse};

use crate::application::repos::{MessagesRepo, NotificationsRepo, RepoError};
use crate::domain::entities::NotificationRecord;
use crate::domain::user::UserId;

pub const NOTIFICATION_PAGE_SIZE: u32 = 50;

#[derive(Clone)]
pub struct InboxService {
    notifications: Arc<dyn NotificationsRepo>,
    messages: Arc<dyn MessagesRepo>,
}

impl InboxService {
    pub fn new(notifications: Arc<dyn NotificationsRepo>, messages: Arc<dyn MessagesRepo>) -> Self {
        Self {
            notifications,
            messages,
        }
    }

    pub async fn notifications(
        &self,
        user: &UserId,
        unread_only: bool,
    ) -> Result<NotificationsResponse, RepoError> {
        let records = self
            .notifications
            .list_for_user(user, unread_only, NOTIFICATION_PAGE_SIZE)
            .await?;
        let unread_count = self.notifications.count_unread_notifications(user).await?;

        Ok(NotificationsResponse {
            notifications: records.into_iter().map(notification_view).collect(),
            unread_count,
        })
    }

    pub async fn unread_messages(&self, user: &UserId) -> Result<i64, RepoError> {
        self.messages.count_unread_messages(user).await
    }
}

fn notification_view(record: NotificationRecord) -> NotificationView {
    let read = record.is_read();
    NotificationView {
        id: record.id,
        kind: record.kind,
        title: record.title,
        body: record.body,
        link: record.link,
        read,
        created_at: record.created_at,
    }
}
