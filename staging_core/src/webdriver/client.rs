//! Minimal W3C WebDriver client: just enough of the protocol to open a
//! session, navigate, read the page and close it again.

use crate::config::WebDriverConfig;
use crate::error::{Result, SmokeError};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub browser_name: String,
    pub browser_version: String,
    pub platform_name: String,
}

impl Capabilities {
    pub fn from_config(config: &WebDriverConfig) -> Self {
        Self {
            browser_name: config.browser_name.clone(),
            browser_version: config.browser_version.clone(),
            platform_name: config.platform_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebDriverClient {
    http: Client,
    base_url: String,
}

impl WebDriverClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn new_session(&self, capabilities: &Capabilities) -> Result<Session> {
        let body = json!({
            "capabilities": {
                "alwaysMatch": capabilities,
            }
        });

        let response = self
            .send(self.http.post(format!("{}/session", self.base_url)).json(&body))
            .await?;

        // W3C puts the id under `value`, the legacy wire protocol at the top level.
        let id = response
            .get("value")
            .and_then(|v| v.get("sessionId"))
            .or_else(|| response.get("sessionId"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SmokeError::Browser("New session response did not contain a sessionId".to_string())
            })?
            .to_string();

        info!("Opened WebDriver session {} on {}", id, self.base_url);

        Ok(Session {
            client: self.clone(),
            id,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| SmokeError::Browser(format!("WebDriver request failed: {}", e)))?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            SmokeError::Browser(format!("Invalid WebDriver response ({}): {}", status, e))
        })?;

        if !status.is_success() {
            let value = body.get("value");
            let error = value
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            let message = value
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("");
            return Err(SmokeError::Browser(format!(
                "WebDriver {} ({}): {}",
                error, status, message
            )));
        }

        Ok(body)
    }

    async fn value(&self, request: RequestBuilder) -> Result<Value> {
        let mut body = self.send(request).await?;
        Ok(body.get_mut("value").map(Value::take).unwrap_or(Value::Null))
    }
}

/// An open remote browser session. Call [`Session::quit`] to release it.
#[derive(Debug)]
pub struct Session {
    client: WebDriverClient,
    id: String,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}/session/{}{}", self.client.base_url, self.id, command)
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!("Session {} navigating to {}", self.id, url);
        self.client
            .value(self.client.http.post(self.endpoint("/url")).json(&json!({ "url": url })))
            .await?;
        Ok(())
    }

    pub async fn page_source(&self) -> Result<String> {
        let value = self.client.value(self.client.http.get(self.endpoint("/source"))).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SmokeError::Browser("Page source was not a string".to_string()))
    }

    pub async fn execute(&self, script: &str) -> Result<Value> {
        self.client
            .value(
                self.client
                    .http
                    .post(self.endpoint("/execute/sync"))
                    .json(&json!({ "script": script, "args": [] })),
            )
            .await
    }

    pub async fn ready_state(&self) -> Result<String> {
        let value = self.execute("return document.readyState").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn quit(self) -> Result<()> {
        self.client
            .value(self.client.http.delete(self.endpoint("")))
            .await?;
        info!("Closed WebDriver session {}", self.id);
        Ok(())
    }
}
