// --- File: crates/clinicbook_booking/src/handlers.rs ---
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{Datelike, NaiveDate};
use clinicbook_common::{validation_error, ClinicbookError};
use clinicbook_config::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calendar::{month_grid, today_at_offset, MonthCursor, MonthGrid};
use crate::models::{Provider, UserType, VisitType};
use crate::payment::{
    detect_card_brand, expiry_month_options, expiry_year_options, format_card_number,
    max_card_digits, CardBrand,
};
use crate::phone::format_phone_number;
use crate::providers::eligible_providers;
use crate::slots::{appointment_duration_minutes, find_slot, generate_slots, TimeSlot};

#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
}

impl BookingState {
    fn today(&self) -> NaiveDate {
        today_at_offset(self.config.booking.utc_offset_hours)
    }
}

// Query values arrive as strings so a bad value produces our own JSON error
// instead of the extractor's plain-text rejection.

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    /// `new` or `returning`
    pub user_type: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    pub user_type: UserType,
    #[cfg_attr(feature = "openapi", schema(example = 90))]
    pub duration_minutes: u32,
    pub slots: Vec<TimeSlot>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ProvidersQuery {
    /// Date in YYYY-MM-DD format
    pub date: Option<String>,
    pub user_type: Option<String>,
    pub visit_type: Option<String>,
    /// Optional `HH:MM` slot label
    pub slot: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProvidersResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2026-10-20"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(example = "Tue"))]
    pub weekday: String,
    pub providers: Vec<Provider>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    pub year: Option<String>,
    /// 1 to 12
    pub month: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CardBrandQuery {
    #[serde(default)]
    pub number: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CardBrandResponse {
    pub brand: Option<CardBrand>,
    #[cfg_attr(feature = "openapi", schema(example = "4111 1111 1111 1111"))]
    pub formatted: String,
    pub max_length: usize,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct PhoneFormatQuery {
    #[serde(default)]
    pub value: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PhoneFormatResponse {
    #[cfg_attr(feature = "openapi", schema(example = "(555) 123-4567"))]
    pub formatted: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExpiryOptionsResponse {
    pub months: Vec<String>,
    pub years: Vec<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ClinicbookError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| validation_error(format!("Missing query parameter '{}'", name)))
}

/// Only new and returning patients book appointments.
fn bookable_user_type(value: &str) -> Result<UserType, ClinicbookError> {
    match UserType::from_str(value)? {
        UserType::Question => Err(validation_error(
            "Questions are not booked; use new or returning",
        )),
        user_type => Ok(user_type),
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Bookable slots and appointment length", body = SlotsResponse),
        (status = 400, description = "Missing or unknown user type", body = clinicbook_common::ErrorBody)
    ),
    tag = "Booking"
))]
pub async fn get_slots_handler(
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, ClinicbookError> {
    let user_type = bookable_user_type(required(&query.user_type, "user_type")?)?;
    Ok(Json(SlotsResponse {
        user_type,
        duration_minutes: appointment_duration_minutes(user_type),
        slots: generate_slots(),
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/providers",
    params(ProvidersQuery),
    responses(
        (status = 200, description = "Providers eligible on that date", body = ProvidersResponse),
        (status = 400, description = "Invalid query", body = clinicbook_common::ErrorBody)
    ),
    tag = "Booking"
))]
pub async fn get_providers_handler(
    Query(query): Query<ProvidersQuery>,
) -> Result<Json<ProvidersResponse>, ClinicbookError> {
    let date = NaiveDate::parse_from_str(required(&query.date, "date")?, "%Y-%m-%d")
        .map_err(|_| validation_error("Invalid date format (YYYY-MM-DD)"))?;
    let user_type = bookable_user_type(required(&query.user_type, "user_type")?)?;
    let visit_type = match query.visit_type.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(VisitType::from_str(v)?),
        _ => None,
    };
    if let Some(label) = query.slot.as_deref() {
        find_slot(label).ok_or_else(|| validation_error(format!("Unknown time slot '{}'", label)))?;
    }

    let providers = eligible_providers(user_type, visit_type, date.weekday());
    debug!(
        "Providers for {} {:?} on {}: {:?}",
        user_type, visit_type, date, providers
    );
    Ok(Json(ProvidersResponse {
        date,
        weekday: date.weekday().to_string(),
        providers,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month grid; defaults to the current month", body = MonthGrid),
        (status = 400, description = "Invalid year or month", body = clinicbook_common::ErrorBody)
    ),
    tag = "Booking"
))]
pub async fn get_calendar_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>, ClinicbookError> {
    let today = state.today();
    let current = MonthCursor::containing(today);

    let year = match query.year.as_deref() {
        Some(v) => v
            .trim()
            .parse::<i32>()
            .map_err(|_| validation_error(format!("Invalid year '{}'", v)))?,
        None => current.year,
    };
    let month = match query.month.as_deref() {
        Some(v) => v
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| validation_error(format!("Invalid month '{}'", v)))?,
        None => current.month,
    };

    info!("Building calendar for {}-{:02} (today {})", year, month, today);
    Ok(Json(month_grid(year, month, today)?))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/card-brand",
    params(CardBrandQuery),
    responses(
        (status = 200, description = "Detected brand and display grouping", body = CardBrandResponse)
    ),
    tag = "Booking"
))]
pub async fn get_card_brand_handler(Query(query): Query<CardBrandQuery>) -> Json<CardBrandResponse> {
    let brand = detect_card_brand(&query.number);
    Json(CardBrandResponse {
        brand,
        formatted: format_card_number(&query.number),
        max_length: max_card_digits(brand),
    })
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/phone-format",
    params(PhoneFormatQuery),
    responses(
        (status = 200, description = "Progressively formatted phone number", body = PhoneFormatResponse)
    ),
    tag = "Booking"
))]
pub async fn get_phone_format_handler(
    Query(query): Query<PhoneFormatQuery>,
) -> Json<PhoneFormatResponse> {
    Json(PhoneFormatResponse {
        formatted: format_phone_number(&query.value),
    })
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/expiry-options",
    responses(
        (status = 200, description = "Card expiry selector values", body = ExpiryOptionsResponse)
    ),
    tag = "Booking"
))]
pub async fn get_expiry_options_handler(
    State(state): State<Arc<BookingState>>,
) -> Json<ExpiryOptionsResponse> {
    Json(ExpiryOptionsResponse {
        months: expiry_month_options(),
        years: expiry_year_options(state.today().year()),
    })
}
