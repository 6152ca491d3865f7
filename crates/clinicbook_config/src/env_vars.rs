//! Environment variable handling for the Clinicbook services.
//!
//! Two naming schemes are understood: the structured
//! `CLINICBOOK__SECTION__KEY` form handled by the `config` crate, and a small
//! set of plain variables (`PORT`, `SHEET_ID`) that deployment platforms set
//! directly.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "CLINICBOOK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Raw service account JSON. Never part of the config tree.
pub const SERVICE_ACCOUNT_JSON_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

/// Plain variables and the configuration path each one overrides.
pub const PLAIN_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("SHEET_ID", "sheets.spreadsheet_id"),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"CLINICBOOK__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Reads a plain override, treating empty values as unset.
pub fn get_plain_env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Reads the raw service account JSON, if provided.
pub fn service_account_json() -> Option<String> {
    get_plain_env_var(SERVICE_ACCOUNT_JSON_ENV)
}
