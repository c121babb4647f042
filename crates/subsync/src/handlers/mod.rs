pub mod dashboard;
pub mod error;
pub mod health;
pub mod members;
pub mod payments;
pub mod reminders;

pub use error::AppError;

/// Response body for successful writes.
#[derive(Debug, serde::Serialize)]
pub struct WriteResponse {
    pub id: String,
}
