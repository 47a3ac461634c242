use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateNotificationData, Notification};
use crate::repositories::NotificationsRepository;

const NOTIFICATIONS_TABLE: &str = "notifications";

pub struct SupabaseNotificationsRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseNotificationsRepository {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(SupabaseClient::new(config)))
    }
}

#[async_trait]
impl NotificationsRepository for SupabaseNotificationsRepository {
    async fn create(&self, data: CreateNotificationData) -> Result<Notification> {
        debug!("Storing notification for recipient {}", data.recipient_id);

        let row = json!({
            "recipient_id": data.recipient_id,
            "content": data.content,
            "read": false,
        });

        self.supabase.insert(NOTIFICATIONS_TABLE, &row).await
    }
}
