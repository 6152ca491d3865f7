//! Google Sheets contact relay for Clinicbook
//!
//! Appends `[name, phone]` rows to a spreadsheet using a service account.
//!
//! # Features
//!
//! - Credential bootstrap from `GOOGLE_SERVICE_ACCOUNT_JSON`
//! - Service account OAuth2 tokens via `yup-oauth2`
//! - `spreadsheets.values.append` over `reqwest`
//! - Axum route `POST /add-contact`
//! - OpenAPI documentation (with the `openapi` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use clinicbook_config::AppConfig;
//! use clinicbook_sheets::{bootstrap_credentials, routes};
//! use std::sync::Arc;
//!
//! fn setup_app() -> axum::Router {
//!     let config = Arc::new(AppConfig::default());
//!     let _ = bootstrap_credentials(&config.sheets);
//!     routes(config)
//! }
//! ```

pub mod auth;
pub mod bootstrap;
pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod routes;
pub mod service;

pub use bootstrap::{bootstrap_credentials, BootstrapError, BootstrapOutcome};
pub use client::{SheetsClient, SheetsError};
pub use routes::{routes, routes_with_sink};
pub use service::SheetsServiceFactory;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::SheetsApiDoc;
}
