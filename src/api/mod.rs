//! HTTP access to the advisory backend.
//!
//! Only the farm-save endpoint is called from this crate; the wizard talks to
//! it through the [`FarmStore`] seam so tests and offline front-ends can
//! substitute their own store.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::errors::SubmitError;
use crate::wizard::FieldMap;

pub const SAVE_FARM_PATH: &str = "/api/farm/save";

/// Receives the collected farm profile.
pub trait FarmStore {
    fn save_farm_details(&self, fields: &FieldMap) -> Result<(), SubmitError>;
}

/// Connection settings derived from the user configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    status: String,
}

/// Blocking client for the advisory backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, SubmitError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &settings.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| SubmitError::Request("auth token contains invalid characters".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| SubmitError::Request(err.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl FarmStore for ApiClient {
    fn save_farm_details(&self, fields: &FieldMap) -> Result<(), SubmitError> {
        let url = self.endpoint(SAVE_FARM_PATH);
        tracing::debug!(url = %url, "posting farm details");

        let response = self
            .client
            .post(&url)
            .json(fields)
            .send()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // The backend answers `{"status": "success", "data": {...}}`; an
        // unparseable body after a 2xx still counts as saved.
        match response.json::<SaveResponse>() {
            Ok(ack) if ack.status != "success" => Err(SubmitError::Rejected {
                status: status.as_u16(),
                body: format!("unexpected status `{}`", ack.status),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    use crate::wizard::FieldValue;

    fn settings(base_url: &str) -> ApiSettings {
        ApiSettings {
            base_url: base_url.to_string(),
            auth_token: None,
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let client = ApiClient::new(&settings("http://127.0.0.1:8000/")).unwrap();
        assert_eq!(
            client.endpoint(SAVE_FARM_PATH),
            "http://127.0.0.1:8000/api/farm/save"
        );
        assert_eq!(client.endpoint("health"), "http://127.0.0.1:8000/health");
    }

    #[test]
    fn invalid_token_is_reported() {
        let mut bad = settings("http://127.0.0.1:8000");
        bad.auth_token = Some("line\nbreak".into());
        assert!(matches!(ApiClient::new(&bad), Err(SubmitError::Request(_))));
    }

    #[test]
    fn unreachable_backend_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = ApiClient::new(&settings(&format!("http://127.0.0.1:{}", port))).unwrap();
        let mut fields = FieldMap::new();
        fields.insert("state".into(), FieldValue::from("Goa"));
        let err = client.save_farm_details(&fields).unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
        assert!(err.is_retryable());
    }
}
