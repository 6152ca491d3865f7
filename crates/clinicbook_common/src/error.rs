// --- File: crates/clinicbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type handlers return.
///
/// Crate-specific errors convert into this via `From` where they need to
/// cross a crate boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClinicbookError {
    /// The request was incomplete or malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A downstream service failed. The message is what the client sees, so
    /// it must not carry the underlying cause.
    #[error("Service error: {0}")]
    ServiceError(String),
}

impl ClinicbookError {
    /// Message that is safe to hand to a client.
    pub fn public_message(&self) -> &str {
        match self {
            ClinicbookError::ValidationError(msg) | ClinicbookError::ServiceError(msg) => msg,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ClinicbookError {
    fn status_code(&self) -> u16 {
        match self {
            ClinicbookError::ValidationError(_) => 400,
            ClinicbookError::ServiceError(_) => 500,
        }
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> ClinicbookError {
    ClinicbookError::ValidationError(message.to_string())
}

pub fn service_error<T: fmt::Display>(message: T) -> ClinicbookError {
    ClinicbookError::ServiceError(message.to_string())
}
