//! Google Sheets service factory implementation.
//!
//! Exposes the [`SheetsClient`] as a [`ContactSink`] so handlers and the
//! booking driver only ever see the trait.

use std::sync::Arc;

use clinicbook_common::services::{boxed_sink, BoxFuture, ContactSink, DynContactSink, ServiceFactory};
use clinicbook_common::ContactRecord;
use clinicbook_config::AppConfig;
use tracing::warn;

use crate::client::{SheetsClient, SheetsError};

impl ContactSink for SheetsClient {
    type Error = SheetsError;

    fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            self.append_row(&record.as_row()).await?;
            Ok(())
        })
    }
}

/// Builds the Sheets-backed services from configuration.
pub struct SheetsServiceFactory {
    config: Arc<AppConfig>,
}

impl SheetsServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn client(&self) -> Result<SheetsClient, SheetsError> {
        SheetsClient::from_config(&self.config.sheets)
    }
}

impl ServiceFactory for SheetsServiceFactory {
    /// `None` when Sheets is switched off or no spreadsheet id is configured.
    fn contact_sink(&self) -> Option<DynContactSink> {
        if !self.config.use_sheets {
            return None;
        }
        match self.client() {
            Ok(client) => Some(boxed_sink(client)),
            Err(e) => {
                warn!("Google Sheets contact sink unavailable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinicbook_config::SheetsConfig;

    fn config(use_sheets: bool, spreadsheet_id: Option<&str>) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            use_sheets,
            sheets: SheetsConfig {
                spreadsheet_id: spreadsheet_id.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_sink_requires_spreadsheet_id() {
        assert!(SheetsServiceFactory::new(config(true, None))
            .contact_sink()
            .is_none());
        assert!(SheetsServiceFactory::new(config(true, Some("  ")))
            .contact_sink()
            .is_none());
        assert!(SheetsServiceFactory::new(config(true, Some("sheet-123")))
            .contact_sink()
            .is_some());
    }

    #[test]
    fn test_sink_disabled_by_flag() {
        assert!(SheetsServiceFactory::new(config(false, Some("sheet-123")))
            .contact_sink()
            .is_none());
    }
}
