use super::SmokeCheck;
use crate::config::{HarnessConfig, StagingConfig};
use crate::error::{Result, SmokeError};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// A single GET that passes iff the endpoint answers `200 OK`.
pub struct HttpStatusCheck {
    class_name: String,
    name: String,
    url: String,
    status_message: String,
    error_context: String,
    client: Client,
}

impl HttpStatusCheck {
    pub fn new(
        class_name: &str,
        name: &str,
        url: String,
        status_message: &str,
        error_context: &str,
    ) -> Self {
        Self {
            class_name: class_name.to_string(),
            name: name.to_string(),
            url,
            status_message: status_message.to_string(),
            error_context: error_context.to_string(),
            client: Client::new(),
        }
    }

    pub fn frontend(staging: &StagingConfig) -> Self {
        Self::new(
            "FrontendCheckTestCase",
            "test_frontend",
            staging.frontend_url.clone(),
            "Frontend returned an error.",
            "An error occurred for the Frontend",
        )
    }

    pub fn backend(staging: &StagingConfig, harness: &HarnessConfig) -> Self {
        Self::new(
            "BackendCheckTestCase",
            "test_backend",
            harness.backend_endpoint(&staging.backend_url, "/python"),
            "Backend returned an error.",
            "An error occurred for the Backend",
        )
    }

    pub fn backend_db(staging: &StagingConfig, harness: &HarnessConfig) -> Self {
        Self::new(
            "BackendDBCheckTestCase",
            "test_backend_db",
            harness.backend_endpoint(&staging.backend_url, "/recipes/num/1"),
            "Backend-DB returned an error.",
            "An error occurred for the Backend-DB connection",
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl SmokeCheck for HttpStatusCheck {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<()> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| SmokeError::Network {
                context: self.error_context.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SmokeError::Assertion(format!(
                "{} Expected status 200, got {}",
                self.status_message,
                status.as_u16()
            )));
        }

        Ok(())
    }
}
