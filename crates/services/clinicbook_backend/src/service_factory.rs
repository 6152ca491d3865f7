// --- File: crates/services/clinicbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Collects the services enabled by features and runtime flags so routers
//! receive them through the `ServiceFactory` trait.

use clinicbook_common::services::{DynContactSink, ServiceFactory};
use clinicbook_config::AppConfig;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "sheets")]
use clinicbook_sheets::SheetsServiceFactory;

pub struct ClinicbookServiceFactory {
    contact_sink: Option<DynContactSink>,
}

impl ClinicbookServiceFactory {
    /// Create a new service factory.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[cfg(feature = "sheets")]
        let contact_sink = SheetsServiceFactory::new(config).contact_sink();
        #[cfg(not(feature = "sheets"))]
        let contact_sink = {
            let _ = config;
            None
        };

        info!(
            "Contact sink: {}",
            if contact_sink.is_some() { "google sheets" } else { "none" }
        );
        Self { contact_sink }
    }

    /// A factory around an explicit sink.
    pub fn with_contact_sink(contact_sink: Option<DynContactSink>) -> Self {
        Self { contact_sink }
    }
}

impl ServiceFactory for ClinicbookServiceFactory {
    fn contact_sink(&self) -> Option<DynContactSink> {
        self.contact_sink.clone()
    }
}
