// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{Appointment, BookAppointmentBody, CreateAppointmentRequest};
use crate::services::create_appointment::CreateAppointmentService;

/// Books `body.date` with `body.provider_id` on behalf of the authenticated user.
#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<CreateAppointmentService>>,
    Extension(user): Extension<User>,
    Json(body): Json<BookAppointmentBody>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service
        .execute(CreateAppointmentRequest {
            provider_id: body.provider_id,
            user_id: user.id,
            date: body.date,
        })
        .await?;

    Ok(Json(appointment))
}
