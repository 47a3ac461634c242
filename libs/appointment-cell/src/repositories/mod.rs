use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Appointment, CreateAppointmentData};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryAppointmentsRepository;
pub use supabase::SupabaseAppointmentsRepository;

#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    /// Appointment of `provider_id` starting exactly at `date`, if any.
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>>;

    /// Persists a new appointment; the store assigns its id.
    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment>;
}
