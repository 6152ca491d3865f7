// --- File: crates/services/clinicbook_backend/src/app.rs ---
use axum::{routing::get, Router};
use clinicbook_common::services::ServiceFactory;
use clinicbook_config::AppConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const WELCOME_MESSAGE: &str = "Welcome to the Clinicbook API!";

/// Builds the full application: every enabled feature router nested under
/// `/api`, plus Swagger UI at `/api/docs` with the `openapi` feature.
#[allow(unused_variables)] // config and services are only read by some features
pub fn build_router(config: Arc<AppConfig>, services: &dyn ServiceFactory) -> Router {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut router = Router::new().route("/", get(|| async { WELCOME_MESSAGE }));

    #[cfg(feature = "sheets")]
    {
        router = router.merge(clinicbook_sheets::routes_with_sink(services.contact_sink()));
    }
    #[cfg(feature = "booking")]
    {
        router = router.merge(clinicbook_booking::routes::routes(config.clone()));
    }

    #[allow(unused_mut)]
    let mut app = Router::new().nest("/api", router);

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
    }

    app.layer(TraceLayer::new_for_http())
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    #[cfg(feature = "booking")]
    use clinicbook_booking::doc::BookingApiDoc;
    #[cfg(feature = "sheets")]
    use clinicbook_sheets::openapi::SheetsApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Clinicbook API",
            version = "0.1.0",
            description = "Appointment booking helpers and contact relay"
        ),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    #[allow(unused_mut)]
    let mut openapi_doc = ApiDoc::openapi();
    #[cfg(feature = "booking")]
    openapi_doc.merge(BookingApiDoc::openapi());
    #[cfg(feature = "sheets")]
    openapi_doc.merge(SheetsApiDoc::openapi());

    tracing::info!("Adding Swagger UI at /api/docs");
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
