// --- File: crates/services/clinicbook_backend/src/relay_sink.rs ---
//! A contact sink that goes through a running server's `/api/add-contact`.

use clinicbook_common::http::client::post;
use clinicbook_common::services::{BoxFuture, ContactSink};
use clinicbook_common::ContactRecord;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const ADD_CONTACT_PATH: &str = "/api/add-contact";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Relay rejected contact ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: String,
}

pub struct HttpContactSink {
    add_contact_url: String,
}

impl HttpContactSink {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3001`.
    pub fn new(base_url: &str) -> Self {
        Self {
            add_contact_url: format!("{}{}", base_url.trim_end_matches('/'), ADD_CONTACT_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.add_contact_url
    }
}

impl ContactSink for HttpContactSink {
    type Error = RelayError;

    fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            debug!("Posting contact to {}", self.add_contact_url);
            let response = post(&self.add_contact_url, &record).await?;
            let status = response.status();
            if status.is_success() {
                return Ok(());
            }

            let message = match response.json::<RelayErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            Err(RelayError::Rejected {
                status: status.as_u16(),
                message,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_posts_name_and_phone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ADD_CONTACT_PATH))
            .and(body_json(json!({ "name": "Jane Doe", "phone": "(555) 123-4567" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let sink = HttpContactSink::new(&format!("{}/", server.uri()));
        sink.append_contact(ContactRecord::new("Jane Doe", "(555) 123-4567").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_relay_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ADD_CONTACT_PATH))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "error": "Failed to add contact to Google Sheets." })),
            )
            .mount(&server)
            .await;

        let err = HttpContactSink::new(&server.uri())
            .append_contact(ContactRecord::new("A", "1").unwrap())
            .await
            .unwrap_err();
        match err {
            RelayError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to add contact to Google Sheets.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
