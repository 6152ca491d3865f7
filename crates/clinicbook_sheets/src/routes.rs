use axum::{routing::post, Router};
use clinicbook_common::{DynContactSink, ServiceFactory};
use clinicbook_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{add_contact_handler, SheetsState};
use crate::service::SheetsServiceFactory;

/// Create the contact relay routes
///
/// Builds the Sheets-backed sink from `config`. Run the credential bootstrap
/// before calling this.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let sink = SheetsServiceFactory::new(config).contact_sink();
    info!(
        "Contact relay routes initialized (sheets {})",
        if sink.is_some() { "enabled" } else { "unavailable" }
    );
    routes_with_sink(sink)
}

/// Same routes over an explicit sink.
pub fn routes_with_sink(sink: Option<DynContactSink>) -> Router {
    let state = Arc::new(SheetsState { sink });
    Router::new()
        .route("/add-contact", post(add_contact_handler))
        .with_state(state)
}
