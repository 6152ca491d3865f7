//! Authentication module for the Google Sheets API
//!
//! Reads a service account key file and exchanges it for an OAuth2 access
//! token scoped to spreadsheets. The [`TokenProvider`] trait sits in front of
//! this so the client can be exercised without talking to Google.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clinicbook_common::services::BoxFuture;
use tokio::sync::OnceCell;
use tracing::debug;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

use crate::client::SheetsError;

/// Scope needed to append values to a spreadsheet.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Fetches a token from an authenticator built once per key file.
type TokenSource = Arc<dyn Fn() -> BoxFuture<'static, String, SheetsError> + Send + Sync>;

/// Builds a service account authenticator for the Sheets API
///
/// # Arguments
///
/// * `key_path` - Path to the service account key file
///
/// # Errors
///
/// Returns [`SheetsError::AuthError`] if the key file cannot be read or the
/// authenticator cannot be built.
async fn build_token_source(key_path: &Path) -> Result<TokenSource, SheetsError> {
    let sa_key = read_service_account_key(key_path).await.map_err(|e| {
        SheetsError::AuthError(format!(
            "Failed to read service account key {}: {}",
            key_path.display(),
            e
        ))
    })?;

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|e| SheetsError::AuthError(format!("Failed to build authenticator: {}", e)))?;
    debug!("Built service account authenticator from {}", key_path.display());

    // The authenticator keeps its tokens in memory and refreshes them on expiry.
    Ok(Arc::new(move || {
        let auth = auth.clone();
        Box::pin(async move {
            let access_token = auth
                .token(&[SHEETS_SCOPE])
                .await
                .map_err(|e| SheetsError::AuthError(format!("Token request failed: {}", e)))?;

            match access_token.token() {
                Some(token) => Ok(token.to_string()),
                None => Err(SheetsError::AuthError("No token available".to_string())),
            }
        })
    }))
}

/// Source of bearer tokens for Sheets requests.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> BoxFuture<'_, String, SheetsError>;
}

/// Tokens from a service account key file on disk.
///
/// The authenticator is built on first use and reused afterwards. A failed
/// build is not cached, so a credential file written after startup is picked
/// up without a restart.
pub struct ServiceAccountTokenProvider {
    key_path: PathBuf,
    source: OnceCell<TokenSource>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            source: OnceCell::new(),
        }
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    pub fn is_initialized(&self) -> bool {
        self.source.initialized()
    }
}

impl TokenProvider for ServiceAccountTokenProvider {
    fn access_token(&self) -> BoxFuture<'_, String, SheetsError> {
        Box::pin(async move {
            let source = self
                .source
                .get_or_try_init(|| build_token_source(&self.key_path))
                .await?;
            source().await
        })
    }
}
