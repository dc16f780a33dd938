use std::time::Duration;

use placeaudit_recon::{DeliveryError, Report, ReportSink};

/// Webhook delivery sink: POSTs the final report as JSON, once per run.
#[derive(Clone)]
pub struct WebhookSink {
    http: reqwest::blocking::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("paudit/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            url: url.into(),
        }
    }
}

impl ReportSink for WebhookSink {
    fn deliver(&self, report: &Report) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(&self.url)
            .json(report)
            .send()
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DeliveryError::Http(status, body));
        }

        Ok(())
    }
}
