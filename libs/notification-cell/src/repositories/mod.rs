use anyhow::Result;
use async_trait::async_trait;

use crate::models::{CreateNotificationData, Notification};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryNotificationsRepository;
pub use supabase::SupabaseNotificationsRepository;

#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn create(&self, data: CreateNotificationData) -> Result<Notification>;
}
