// --- File: crates/clinicbook_booking/src/routes.rs ---
use std::sync::Arc;

use axum::{routing::get, Router};
use clinicbook_config::AppConfig;

use crate::handlers::{
    get_calendar_handler, get_card_brand_handler, get_expiry_options_handler,
    get_phone_format_handler, get_providers_handler, get_slots_handler, BookingState,
};

/// Routes for the booking resolver, relative to `/api`.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let state = Arc::new(BookingState { config });

    Router::new()
        .route("/booking/slots", get(get_slots_handler))
        .route("/booking/providers", get(get_providers_handler))
        .route("/booking/calendar", get(get_calendar_handler))
        .route("/booking/card-brand", get(get_card_brand_handler))
        .route("/booking/phone-format", get(get_phone_format_handler))
        .route("/booking/expiry-options", get(get_expiry_options_handler))
        .with_state(state)
}
