// --- File: crates/clinicbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A:B";
pub const DEFAULT_VALUE_INPUT_OPTION: &str = "USER_ENTERED";
pub const DEFAULT_KEY_PATH: &str = "credentials/service-account.json";
pub const DEFAULT_SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_QUESTION_REDIRECT: &str = "/chatbot";
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 1000;
/// Fixed offset used to decide what "today" is for the calendar.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -4;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
        }
    }
}

// --- Google Sheets Config ---
// Holds non-secret Sheets config. The service account JSON itself is read from
// GOOGLE_SERVICE_ACCOUNT_JSON at startup and written to `key_path`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>, // Loaded via SHEET_ID
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
    #[serde(default = "default_key_path")]
    pub key_path: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: default_range(),
            value_input_option: default_value_input_option(),
            key_path: default_key_path(),
            api_base_url: default_api_base_url(),
        }
    }
}

// --- Booking Flow Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BookingConfig {
    /// Where the "I have a question" choice sends the visitor.
    #[serde(default = "default_question_redirect")]
    pub question_redirect: String,
    /// Delay between "booking confirmed" and the thank-you step.
    #[serde(default = "default_confirmation_delay_ms")]
    pub confirmation_delay_ms: u64,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            question_redirect: default_question_redirect(),
            confirmation_delay_ms: DEFAULT_CONFIRMATION_DELAY_MS,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags ---
    #[serde(default = "default_true")]
    pub use_sheets: bool,

    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            use_sheets: true,
            sheets: SheetsConfig::default(),
            booking: BookingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_range() -> String {
    DEFAULT_SHEET_RANGE.to_string()
}

fn default_value_input_option() -> String {
    DEFAULT_VALUE_INPUT_OPTION.to_string()
}

fn default_key_path() -> String {
    DEFAULT_KEY_PATH.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_SHEETS_API_BASE_URL.to_string()
}

fn default_question_redirect() -> String {
    DEFAULT_QUESTION_REDIRECT.to_string()
}

fn default_confirmation_delay_ms() -> u64 {
    DEFAULT_CONFIRMATION_DELAY_MS
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
