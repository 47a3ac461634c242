use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::appointment_routes;
use appointment_cell::services::CreateAppointmentService;
use shared_config::AppConfig;

pub fn create_router(
    config: Arc<AppConfig>,
    create_appointment: Arc<CreateAppointmentService>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/appointments", appointment_routes(config, create_appointment))
}
