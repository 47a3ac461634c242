// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: String,
    pub user_id: String,
    /// Always the start of an hour.
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input of [`crate::services::create_appointment::CreateAppointmentService::execute`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub provider_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
}

/// What the appointments store is asked to persist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAppointmentData {
    pub provider_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
}

// ==============================================================================
// HTTP REQUEST MODELS
// ==============================================================================

/// Body of `POST /appointments`. The booking user is the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentBody {
    pub provider_id: String,
    pub date: DateTime<Utc>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("You can't create an appointment on a past date")]
    PastDate,

    #[error("You can't create an appointment with yourself")]
    SelfBooking,

    #[error("You can only create appointments between 8 AM and 5 PM")]
    OutsideBusinessHours,

    #[error("This appointment slot is already booked")]
    SlotTaken,

    #[error(transparent)]
    Infrastructure(#[from] anyhow::Error),
}

impl AppointmentError {
    /// Rule violations are caused by the request and safe to show to the caller.
    pub fn is_business_rule(&self) -> bool {
        !matches!(self, AppointmentError::Infrastructure(_))
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        if err.is_business_rule() {
            AppError::BadRequest(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}
