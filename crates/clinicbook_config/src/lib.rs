// --- File: crates/clinicbook_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning: `config/default.*`, `config/<RUN_ENV>.*`,
/// `CLINICBOOK__*` environment variables, then the plain `PORT` and
/// `SHEET_ID` variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    load_config_with(&config_dir(), &run_env, env_vars::get_plain_env_var)
}

/// Same as [`load_config`] with an explicit directory and plain-variable lookup.
pub fn load_config_with<F>(
    config_dir: &Path,
    run_env: &str,
    plain_lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let mut builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&env_vars::get_config_prefix())
                .separator(env_vars::CONFIG_SEPARATOR),
        );

    for (name, path) in env_vars::PLAIN_OVERRIDES {
        builder = builder.set_override_option(*path, plain_lookup(name))?;
    }

    builder.build()?.try_deserialize()
}

/// Directory holding `default.toml` and the per-environment files.
///
/// `CONFIG_DIR` wins; otherwise `./config` if present, else the workspace's
/// `config/` directory.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let local = PathBuf::from("config");
    if local.is_dir() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2) // crates/clinicbook_config -> workspace root
        .map(|root| root.join("config"))
        .unwrap_or(local)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment exactly once.
///
/// `DOTENV_OVERRIDE` selects the file; defaults to `.env`. A missing file is
/// not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config_dir(default_toml: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("clinicbook-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create temp config dir");
        fs::write(dir.join("default.toml"), default_toml).expect("write default.toml");
        dir
    }

    #[test]
    fn test_defaults_without_any_file() {
        let dir = env::temp_dir().join(format!("clinicbook-missing-{}", uuid::Uuid::new_v4()));
        let config = load_config_with(&dir, "debug", |_| None).expect("config loads");

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.use_sheets);
        assert_eq!(config.sheets.range, "Sheet1!A:B");
        assert_eq!(config.sheets.value_input_option, "USER_ENTERED");
        assert_eq!(config.sheets.spreadsheet_id, None);
        assert_eq!(config.booking.question_redirect, "/chatbot");
        assert_eq!(config.booking.confirmation_delay_ms, 1000);
        assert_eq!(config.booking.utc_offset_hours, -4);
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = temp_config_dir(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8088

            [sheets]
            spreadsheet_id = "from-file"
            "#,
        );
        let config = load_config_with(&dir, "debug", |_| None).expect("config loads");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.sheets.spreadsheet_id.as_deref(), Some("from-file"));
        assert_eq!(config.sheets.key_path, DEFAULT_KEY_PATH);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_run_env_file_overrides_default() {
        let dir = temp_config_dir("[server]\nport = 8088\n");
        fs::write(dir.join("production.toml"), "[server]\nport = 9099\n").expect("write env file");

        let config = load_config_with(&dir, "production", |_| None).expect("config loads");
        assert_eq!(config.server.port, 9099);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_plain_overrides_win() {
        let dir = temp_config_dir("[server]\nport = 8088\n[sheets]\nspreadsheet_id = \"file\"\n");
        let config = load_config_with(&dir, "debug", |name| match name {
            "PORT" => Some("4040".to_string()),
            "SHEET_ID" => Some("sheet-from-env".to_string()),
            _ => None,
        })
        .expect("config loads");

        assert_eq!(config.server.port, 4040);
        assert_eq!(
            config.sheets.spreadsheet_id.as_deref(),
            Some("sheet-from-env")
        );
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let dir = temp_config_dir("");
        let result = load_config_with(&dir, "debug", |name| {
            (name == "PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err(), "non-numeric PORT must be rejected");
        let _ = fs::remove_dir_all(dir);
    }
}
