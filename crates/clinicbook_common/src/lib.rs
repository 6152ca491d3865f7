// --- File: crates/clinicbook_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{service_error, validation_error, ClinicbookError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, error_response, ErrorBody, IntoHttpResponse};

pub use models::ContactRecord;
pub use services::{boxed_sink, BoxedError, ContactSink, DynContactSink, ServiceFactory};
