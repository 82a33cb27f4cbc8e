//! MediaWiki Action API Client
//!
//! A thin session wrapper over the `/w/api.php` endpoint of a single wiki,
//! plus the query helpers built on top of it (global user info, category
//! membership, contribution surveys).
//!
//! Every response is checked for the API-level `error` envelope before the
//! caller sees it; `warnings` are logged and otherwise ignored.

pub mod category;
pub mod globaluser;
pub mod surveyor;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::types::{Result, SurveyError};

/// An open API session against one wiki host.
pub struct Session {
    host: String,
    api_url: String,
    client: reqwest::Client,
}

impl Session {
    /// Open a session against `host` (e.g. `en.wikipedia.org`).
    ///
    /// No request is sent here; MediaWiki needs no handshake for read
    /// queries, so "opening" only builds the HTTP client.
    pub fn open(host: &str, api: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(api.user_agent.as_str())
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        let api_url = format!("https://{}{}", host, api.path);
        debug!("Opened API session for {}", api_url);

        Ok(Self {
            host: host.to_string(),
            api_url,
            client,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Run a GET query. `format=json&formatversion=2` is always added, so
    /// callers only pass the module parameters.
    pub async fn get(&self, params: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SurveyError::bad_response(
                &self.host,
                format!("HTTP {}", status),
            ));
        }

        let body: Value = response.json().await?;
        self.check_envelope(&body)?;

        Ok(body)
    }

    /// Reject API-level errors and log API-level warnings.
    fn check_envelope(&self, body: &Value) -> Result<()> {
        if let Some(error) = body.get("error") {
            let code = error
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            let info = error
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or("no details provided");
            return Err(SurveyError::api(&self.host, code, info));
        }

        if let Some(warnings) = body.get("warnings").and_then(Value::as_object) {
            for (module, warning) in warnings {
                warn!("API warning from {} ({}): {}", self.host, module, warning);
            }
        }

        Ok(())
    }
}

/// Extract the `continue` parameters from a query response, ready to be
/// merged into the follow-up request. Empty when the result set is complete.
pub(crate) fn continuation(body: &Value) -> Vec<(String, String)> {
    body.get("continue")
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}
