// File: services/clinicbook_backend/src/main.rs
use clinicbook_backend::app::build_router;
use clinicbook_backend::service_factory::ClinicbookServiceFactory;
use clinicbook_common::logging;
use clinicbook_config::load_config;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(load_config()?);
    let _log_guard = logging::init_from_config(&config.logging);

    // The credential file has to exist before the Sheets client is built.
    #[cfg(feature = "sheets")]
    if config.use_sheets {
        clinicbook_sheets::bootstrap_credentials(&config.sheets)?;
    }

    let services = ClinicbookServiceFactory::new(config.clone());
    let app = build_router(config.clone(), &services);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
