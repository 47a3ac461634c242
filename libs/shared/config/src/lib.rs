use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub redis_url: Option<String>,
    /// Offset of the clinic's local time from UTC, in minutes.
    pub business_utc_offset_minutes: i32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            business_utc_offset_minutes: parse_offset_minutes(
                env::var("BUSINESS_UTC_OFFSET_MINUTES").ok().as_deref(),
            ),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        if config.redis_url.is_none() {
            warn!("REDIS_URL not set, cache invalidation will use the in-memory provider");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }

    pub fn is_cache_configured(&self) -> bool {
        self.redis_url.is_some()
    }
}

/// Offsets are bounded to +/- 23:59 like any real time zone.
fn parse_offset_minutes(raw: Option<&str>) -> i32 {
    match raw {
        None => 0,
        Some(value) => match value.trim().parse::<i32>() {
            Ok(minutes) if minutes.abs() < 24 * 60 => minutes,
            _ => {
                warn!("BUSINESS_UTC_OFFSET_MINUTES has invalid value '{}', using UTC", value);
                0
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_defaults_to_utc() {
        assert_eq!(parse_offset_minutes(None), 0);
    }

    #[test]
    fn test_offset_parses_negative_minutes() {
        assert_eq!(parse_offset_minutes(Some("-180")), -180);
        assert_eq!(parse_offset_minutes(Some(" 330 ")), 330);
    }

    #[test]
    fn test_offset_rejects_garbage_and_out_of_range() {
        assert_eq!(parse_offset_minutes(Some("three hours")), 0);
        assert_eq!(parse_offset_minutes(Some("1440")), 0);
    }

    #[test]
    fn test_is_configured_requires_supabase_settings() {
        let config = AppConfig {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            supabase_jwt_secret: "secret".to_string(),
            redis_url: None,
            business_utc_offset_minutes: 0,
        };

        assert!(!config.is_configured());
        assert!(!config.is_cache_configured());
    }
}
