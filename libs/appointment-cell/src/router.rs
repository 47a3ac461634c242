// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::create_appointment::CreateAppointmentService;

pub fn appointment_routes(config: Arc<AppConfig>, service: Arc<CreateAppointmentService>) -> Router {
    // All appointment operations require authentication
    Router::new()
        .route("/", post(handlers::create_appointment))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(service)
}
