use chrono::{DateTime, Duration, FixedOffset, Offset, Timelike, Utc};
use tracing::warn;

use shared_config::AppConfig;

pub const DEFAULT_OPENING_HOUR: u32 = 8;
/// Last bookable hour. A slot starting at 17:00 is still accepted.
pub const DEFAULT_CLOSING_HOUR: u32 = 17;

const CACHE_KEY_PREFIX: &str = "provider-appointments";

/// Calendar rules applied to a booking: slot granularity, opening hours and the
/// clinic's local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub utc_offset: FixedOffset,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
            utc_offset: Utc.fix(),
        }
    }
}

impl BookingRules {
    pub fn from_config(config: &AppConfig) -> Self {
        let utc_offset = FixedOffset::east_opt(config.business_utc_offset_minutes * 60)
            .unwrap_or_else(|| {
                warn!(
                    "Business UTC offset of {} minutes is out of range, using UTC",
                    config.business_utc_offset_minutes
                );
                Utc.fix()
            });

        Self {
            utc_offset,
            ..Self::default()
        }
    }

    pub fn local(&self, date: DateTime<Utc>) -> DateTime<FixedOffset> {
        date.with_timezone(&self.utc_offset)
    }

    /// Rounds down to the start of the local hour.
    pub fn truncate_to_hour(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.local(date);
        date - Duration::minutes(i64::from(local.minute()))
            - Duration::seconds(i64::from(local.second()))
            - Duration::nanoseconds(i64::from(local.nanosecond()))
    }

    pub fn is_within_business_hours(&self, appointment_date: DateTime<Utc>) -> bool {
        let hour = self.local(appointment_date).hour();
        hour >= self.opening_hour && hour <= self.closing_hour
    }

    /// Key of the cached agenda of `provider_id` for the local day of
    /// `appointment_date`, e.g. `provider-appointments:P1:2025-6-10`.
    pub fn provider_appointments_cache_key(
        &self,
        provider_id: &str,
        appointment_date: DateTime<Utc>,
    ) -> String {
        format!(
            "{}:{}:{}",
            CACHE_KEY_PREFIX,
            provider_id,
            self.local(appointment_date).format("%Y-%-m-%-d")
        )
    }

    pub fn notification_content(&self, appointment_date: DateTime<Utc>) -> String {
        format!(
            "New appointment scheduled for {}",
            self.local(appointment_date).format("%d/%m/%Y at %H:%M")
        )
    }
}
