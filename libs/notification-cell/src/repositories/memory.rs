use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{CreateNotificationData, Notification};
use crate::repositories::NotificationsRepository;

#[derive(Default)]
pub struct InMemoryNotificationsRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn for_recipient(&self, recipient_id: &str) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|notification| notification.recipient_id == recipient_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn create(&self, data: CreateNotificationData) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id: data.recipient_id,
            content: data.content,
            read: false,
            created_at: Utc::now(),
        };

        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }
}
