//! Google Sheets REST client
//!
//! Only the one call the relay needs: `spreadsheets.values.append`, which adds
//! a row after the last non-empty row of a range.

use std::sync::Arc;

use clinicbook_common::HTTP_CLIENT;
use clinicbook_config::SheetsConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::{ServiceAccountTokenProvider, TokenProvider};

/// Errors that can occur when talking to the Sheets API
#[derive(Error, Debug)]
pub enum SheetsError {
    /// Error obtaining an access token
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during the HTTP request
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Non-success response from the API
    #[error("Sheets API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct ValueRange<'a> {
    values: [&'a [String]; 1],
}

/// Response of a successful append.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    pub spreadsheet_id: Option<String>,
    pub table_range: Option<String>,
    pub updates: Option<UpdateSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub updated_range: Option<String>,
    pub updated_rows: Option<u32>,
    pub updated_cells: Option<u32>,
}

/// Client for appending rows to one spreadsheet range.
pub struct SheetsClient {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    value_input_option: String,
}

impl SheetsClient {
    /// Builds a client from configuration, authenticating with the service
    /// account key at `key_path`.
    ///
    /// Fails with [`SheetsError::ConfigError`] when no spreadsheet id is set.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SheetsError> {
        let tokens = Arc::new(ServiceAccountTokenProvider::new(&config.key_path));
        Self::with_token_provider(config, tokens)
    }

    pub fn with_token_provider(
        config: &SheetsConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, SheetsError> {
        let spreadsheet_id = config
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SheetsError::ConfigError("spreadsheet id (SHEET_ID)".to_string()))?;

        Ok(Self {
            http: HTTP_CLIENT.clone(),
            tokens,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: config.range.clone(),
            value_input_option: config.value_input_option.clone(),
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url, self.spreadsheet_id, self.range
        )
    }

    /// Appends one row. Not retried; calling twice appends twice.
    pub async fn append_row(&self, row: &[String]) -> Result<AppendResponse, SheetsError> {
        let token = self.tokens.access_token().await?;
        let url = self.append_url();
        debug!("Appending {} cell(s) to {}", row.len(), self.range);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", self.value_input_option.as_str())])
            .json(&ValueRange { values: [row] })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let appended: AppendResponse = response.json().await?;
        info!(
            "Row appended to {}",
            appended
                .updates
                .as_ref()
                .and_then(|u| u.updated_range.as_deref())
                .unwrap_or(&self.range)
        );
        Ok(appended)
    }
}
