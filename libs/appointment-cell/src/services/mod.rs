pub mod create_appointment;

pub use create_appointment::CreateAppointmentService;
