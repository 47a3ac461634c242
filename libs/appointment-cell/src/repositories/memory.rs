use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Appointment, CreateAppointmentData};
use crate::repositories::AppointmentsRepository;

/// Appointments kept in process memory. It enforces no uniqueness of slots,
/// exactly like a table without a unique index.
#[derive(Default)]
pub struct InMemoryAppointmentsRepository {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }
}

#[async_trait]
impl AppointmentsRepository for InMemoryAppointmentsRepository {
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>> {
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .find(|appointment| appointment.date == date && appointment.provider_id == provider_id)
            .cloned())
    }

    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment> {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id: data.provider_id,
            user_id: data.user_id,
            date: data.date,
            created_at: now,
            updated_at: now,
        };

        self.appointments.write().await.push(appointment.clone());
        Ok(appointment)
    }
}
