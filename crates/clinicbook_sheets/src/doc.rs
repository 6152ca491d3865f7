#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{AddContactRequest, AddContactResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::add_contact_handler),
    components(schemas(AddContactRequest, AddContactResponse, clinicbook_common::ErrorBody)),
    tags(
        (name = "Contacts", description = "Contact relay to Google Sheets")
    ),
    servers(
        (url = "/api", description = "Contact relay server")
    )
)]
pub struct SheetsApiDoc;
