// --- File: crates/services/clinicbook_backend/src/lib.rs ---
pub mod app;
#[cfg(test)]
mod app_test;
pub mod relay_sink;
pub mod service_factory;
#[cfg(feature = "booking")]
pub mod wizard;
