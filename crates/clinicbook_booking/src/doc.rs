// --- File: crates/clinicbook_booking/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::calendar::{CalendarDay, MonthGrid};
use crate::handlers::{
    CardBrandResponse, ExpiryOptionsResponse, PhoneFormatResponse, ProvidersResponse,
    SlotsResponse,
};
use crate::models::{Provider, UserType, VisitType};
use crate::payment::CardBrand;
use crate::slots::TimeSlot;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_slots_handler,
        crate::handlers::get_providers_handler,
        crate::handlers::get_calendar_handler,
        crate::handlers::get_card_brand_handler,
        crate::handlers::get_phone_format_handler,
        crate::handlers::get_expiry_options_handler
    ),
    components(
        schemas(
            SlotsResponse,
            TimeSlot,
            UserType,
            VisitType,
            Provider,
            ProvidersResponse,
            MonthGrid,
            CalendarDay,
            CardBrand,
            CardBrandResponse,
            PhoneFormatResponse,
            ExpiryOptionsResponse,
            clinicbook_common::ErrorBody
        )
    ),
    tags(
        (name = "Booking", description = "Slot, provider, calendar and form helpers for the booking flow")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
