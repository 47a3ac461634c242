use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, CreateAppointmentData};
use crate::repositories::AppointmentsRepository;

const APPOINTMENTS_TABLE: &str = "appointments";

pub struct SupabaseAppointmentsRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseAppointmentsRepository {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(SupabaseClient::new(config)))
    }
}

#[async_trait]
impl AppointmentsRepository for SupabaseAppointmentsRepository {
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>> {
        debug!("Looking up appointment of provider {} at {}", provider_id, date);

        let filters = [
            ("provider_id", format!("eq.{}", provider_id)),
            ("date", format!("eq.{}", date.to_rfc3339_opts(SecondsFormat::Secs, true))),
            ("limit", "1".to_string()),
        ];

        let appointments: Vec<Appointment> =
            self.supabase.select(APPOINTMENTS_TABLE, &filters).await?;

        Ok(appointments.into_iter().next())
    }

    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment> {
        debug!("Storing appointment of provider {} at {}", data.provider_id, data.date);

        let row = json!({
            "provider_id": data.provider_id,
            "user_id": data.user_id,
            "date": data.date,
        });

        self.supabase.insert(APPOINTMENTS_TABLE, &row).await
    }
}
