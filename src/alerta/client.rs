//! HTTP client for the Alerta API

use super::AlertSource;
use super::ledger::{notification_attribute, notification_timestamp};
use super::types::{Alert, AlertsResponse};
use crate::config::AlertaConfig;
use crate::utils::error::{NotifierError, Result};
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use tracing::{debug, info};

/// Alerta API client
///
/// Every request carries the configured timeout, which validation keeps
/// below the polling interval so one slow poll cannot overlap the next tick.
#[derive(Debug, Clone)]
pub struct AlertaClient {
    client: reqwest::Client,
    endpoint: String,
    webui: String,
    api_key: Option<String>,
    dry_run: bool,
}

impl AlertaClient {
    /// Create a new client from configuration
    pub fn new(config: &AlertaConfig, dry_run: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("alerta-notifications/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            webui: config.webui.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            dry_run,
        })
    }

    /// URL of the alert search for a rule filter
    pub fn alerts_url(&self, filter: &str) -> String {
        let filter = filter.trim_start_matches('?');
        if filter.is_empty() {
            format!("{}/alerts", self.endpoint)
        } else {
            format!("{}/alerts?{}", self.endpoint, filter)
        }
    }

    /// Web UI link for an alert
    pub fn alert_link(&self, alert_id: &str) -> String {
        format!("{}/#/alert/{}", self.webui, alert_id)
    }

    fn attributes_url(&self, alert_id: &str) -> String {
        format!("{}/alert/{}/attributes", self.endpoint, alert_id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("> [{}] {}", method, url);

        let request = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");

        match &self.api_key {
            Some(key) => request.header("X-API-Key", key),
            None => request,
        }
    }

    async fn check_status(response: Response, url: &str) -> Result<Response> {
        let status = response.status();
        debug!("< {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifierError::alerta(format!(
            "{} returned status {}: {}",
            url,
            status,
            body.trim()
        )))
    }
}

#[async_trait::async_trait]
impl AlertSource for AlertaClient {
    async fn fetch(&self, filter: &str) -> Result<Vec<Alert>> {
        let url = self.alerts_url(filter);

        let response = self.request(Method::GET, &url).send().await?;
        let response = Self::check_status(response, &url).await?;
        let body = response.text().await?;

        let parsed: AlertsResponse = serde_json::from_str(&body).map_err(|e| {
            NotifierError::alerta(format!("Malformed alerts response from {}: {}", url, e))
        })?;

        let alerts = parsed
            .alerts
            .into_iter()
            .map(|mut alert| {
                alert.url = self.alert_link(&alert.id);
                alert
            })
            .collect();

        Ok(alerts)
    }

    async fn update_notification_attribute(
        &self,
        alert_id: &str,
        rule_id: &str,
        notified_at: DateTime<Utc>,
    ) -> Result<()> {
        let url = self.attributes_url(alert_id);
        let mut attributes = serde_json::Map::new();
        attributes.insert(
            notification_attribute(rule_id),
            serde_json::Value::String(notification_timestamp(notified_at)),
        );
        let body = serde_json::json!({ "attributes": attributes });

        if self.dry_run {
            info!("-- DryRun is active: not really updating alert attributes --");
            info!(
                "Generated attribute update request for Alerta API: [{}]\n{}",
                url,
                serde_json::to_string(&body)?
            );
            return Ok(());
        }

        debug!("> {}", body);
        let response = self.request(Method::PUT, &url).json(&body).send().await?;
        Self::check_status(response, &url).await?;

        Ok(())
    }
}
