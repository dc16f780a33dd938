use std::time::Duration;

use serde_json::{Map, Value};

use placeaudit_recon::{LookupError, RecordStore};

/// Canonical record-store client (blocking).
///
/// Looks up one place record per call: GET `{base_url}{document_id}`.
/// The store authenticates with a raw `Authorization` header value, not a
/// bearer scheme.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("paudit/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

impl RecordStore for StoreClient {
    fn fetch(&self, document_id: &str) -> Result<Option<Map<String, Value>>, LookupError> {
        let url = format!("{}{}", self.base_url, document_id);
        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.token)
            .send()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LookupError::Http(status, body));
        }

        let payload: Value = response
            .json()
            .map_err(|e| LookupError::Parse(e.to_string()))?;
        match payload {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            Value::Object(map) => Ok(Some(map)),
            other => Err(LookupError::Parse(format!(
                "expected object payload, got {other}"
            ))),
        }
    }
}
