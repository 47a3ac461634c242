// libs/appointment-cell/src/services/create_appointment.rs
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use cache_cell::{CacheProvider, InMemoryCacheProvider, RedisCacheProvider};
use notification_cell::{
    CreateNotificationData, NotificationsRepository, SupabaseNotificationsRepository,
};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::clock::{Clock, SystemClock};
use crate::models::{Appointment, AppointmentError, CreateAppointmentData, CreateAppointmentRequest};
use crate::repositories::{AppointmentsRepository, SupabaseAppointmentsRepository};
use crate::rules::BookingRules;

/// Books one hour of a provider's agenda for a user.
///
/// Every rule is checked before the first write, so a rejected request leaves
/// no trace. Once the appointment is stored, a failing notification or cache
/// invalidation is reported to the caller but the appointment stays.
///
/// The slot lookup and the insert are two separate store calls. Two concurrent
/// requests for the same slot can both pass the lookup; only a unique index on
/// `(provider_id, date)` in the store closes that window.
pub struct CreateAppointmentService {
    appointments: Arc<dyn AppointmentsRepository>,
    notifications: Arc<dyn NotificationsRepository>,
    cache: Arc<dyn CacheProvider>,
    clock: Arc<dyn Clock>,
    rules: BookingRules,
}

impl CreateAppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentsRepository>,
        notifications: Arc<dyn NotificationsRepository>,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self {
            appointments,
            notifications,
            cache,
            clock: Arc::new(SystemClock),
            rules: BookingRules::default(),
        }
    }

    /// Wires the Supabase stores and, when `REDIS_URL` is set, the Redis cache.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let supabase = Arc::new(SupabaseClient::new(config));

        let cache: Arc<dyn CacheProvider> = if config.is_cache_configured() {
            Arc::new(RedisCacheProvider::new(config).await?)
        } else {
            warn!("Using in-memory cache provider; invalidations are process-local");
            Arc::new(InMemoryCacheProvider::new())
        };

        Ok(Self::new(
            Arc::new(SupabaseAppointmentsRepository::new(Arc::clone(&supabase))),
            Arc::new(SupabaseNotificationsRepository::new(supabase)),
            cache,
        )
        .with_rules(BookingRules::from_config(config)))
    }

    pub fn with_rules(mut self, rules: BookingRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn execute(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let CreateAppointmentRequest { provider_id, user_id, date } = request;

        let appointment_date = self.rules.truncate_to_hour(date);
        let cache_key = self
            .rules
            .provider_appointments_cache_key(&provider_id, appointment_date);

        debug!("Booking request of user {} with provider {} at {}",
               user_id, provider_id, appointment_date);

        if appointment_date < self.clock.now() {
            warn!("Rejected booking at {}: date is in the past", appointment_date);
            return Err(AppointmentError::PastDate);
        }

        if user_id == provider_id {
            warn!("Rejected booking of user {} with themselves", user_id);
            return Err(AppointmentError::SelfBooking);
        }

        if !self.rules.is_within_business_hours(appointment_date) {
            warn!("Rejected booking at {}: outside business hours", appointment_date);
            return Err(AppointmentError::OutsideBusinessHours);
        }

        let existing = self
            .appointments
            .find_by_date(appointment_date, &provider_id)
            .await
            .inspect_err(|e| error!("Slot lookup failed for provider {}: {:#}", provider_id, e))?;

        if let Some(existing) = existing {
            warn!("Slot {} of provider {} already taken by appointment {}",
                  appointment_date, provider_id, existing.id);
            return Err(AppointmentError::SlotTaken);
        }

        let appointment = self
            .appointments
            .create(CreateAppointmentData {
                provider_id: provider_id.clone(),
                user_id,
                date: appointment_date,
            })
            .await
            .inspect_err(|e| error!("Failed to store appointment: {:#}", e))?;

        self.notifications
            .create(CreateNotificationData {
                recipient_id: provider_id,
                content: self.rules.notification_content(appointment_date),
            })
            .await
            .inspect_err(|e| {
                error!("Appointment {} stored but provider notification failed: {:#}",
                       appointment.id, e)
            })?;

        self.cache
            .invalidate(&cache_key)
            .await
            .inspect_err(|e| {
                error!("Appointment {} stored but cache key {} was not invalidated: {:#}",
                       appointment.id, cache_key, e)
            })?;

        info!("Appointment {} booked with provider {} at {}",
              appointment.id, appointment.provider_id, appointment.date);

        Ok(appointment)
    }
}
