pub mod clock;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod router;
pub mod rules;
pub mod services;

pub use router::appointment_routes;
