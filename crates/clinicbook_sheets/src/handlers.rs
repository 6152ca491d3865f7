//! HTTP handler for the contact relay
//!
//! `POST /add-contact` validates two fields and appends them as one row. The
//! response bodies are fixed strings; downstream details only go to the log.

use axum::extract::{rejection::JsonRejection, Json, State};
use clinicbook_common::{
    service_error, validation_error, ClinicbookError, ContactRecord, DynContactSink,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const MISSING_FIELDS_MESSAGE: &str = "Name and phone are required.";
pub const APPEND_FAILED_MESSAGE: &str = "Failed to add contact to Google Sheets.";

/// Shared state for the relay handler
#[derive(Clone)]
pub struct SheetsState {
    /// `None` when Sheets is not configured; every valid request then fails.
    pub sink: Option<DynContactSink>,
}

/// Request body for adding a contact
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddContactRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "(555) 123-4567"))]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddContactResponse {
    pub success: bool,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/add-contact",
    request_body = AddContactRequest,
    responses(
        (status = 200, description = "Row appended", body = AddContactResponse,
         example = json!({ "success": true })),
        (status = 400, description = "Name or phone missing", body = clinicbook_common::ErrorBody,
         example = json!({ "error": "Name and phone are required." })),
        (status = 500, description = "Append failed", body = clinicbook_common::ErrorBody,
         example = json!({ "error": "Failed to add contact to Google Sheets." }))
    ),
    tag = "Contacts"
))]
pub async fn add_contact_handler(
    State(state): State<Arc<SheetsState>>,
    payload: Result<Json<AddContactRequest>, JsonRejection>,
) -> Result<Json<AddContactResponse>, ClinicbookError> {
    // An unreadable body has no usable fields either.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected contact body: {}", rejection);
            AddContactRequest::default()
        }
    };

    let record = match (request.name, request.phone) {
        (Some(name), Some(phone)) => ContactRecord::new(name, phone),
        _ => None,
    };
    let record = record.ok_or_else(|| validation_error(MISSING_FIELDS_MESSAGE))?;

    let Some(sink) = state.sink.as_ref() else {
        error!("Cannot add contact: Google Sheets is not configured");
        return Err(service_error(APPEND_FAILED_MESSAGE));
    };

    sink.append_contact(record).await.map_err(|e| {
        error!("Error adding contact to Google Sheets: {}", e);
        service_error(APPEND_FAILED_MESSAGE)
    })?;
    info!("Contact added to Google Sheets");
    Ok(Json(AddContactResponse { success: true }))
}
