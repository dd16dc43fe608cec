use super::SmokeCheck;
use crate::config::{HarnessConfig, StagingConfig};
use crate::error::{Result, SmokeError};
use crate::webdriver::{Capabilities, Session, WebDriverClient};
use tracing::warn;

const ERROR_CONTEXT: &str = "An error occurred for the Frontend-Backend connection";

/// Loads `{frontend}/pythontest` in a remote browser and expects a fully
/// loaded page saying hello. The session is opened once and deleted once,
/// whatever happens in between.
pub struct FrontendBackendCheck {
    client: WebDriverClient,
    capabilities: Capabilities,
    warmup_url: String,
    target_url: String,
}

impl FrontendBackendCheck {
    pub fn new(staging: &StagingConfig, harness: &HarnessConfig) -> Self {
        Self {
            client: WebDriverClient::new(&harness.webdriver.url),
            capabilities: Capabilities::from_config(&harness.webdriver),
            warmup_url: harness.webdriver.warmup_url.clone(),
            target_url: format!("{}/pythontest", staging.frontend_url),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    async fn with_session(&self) -> Result<()> {
        let session = self.client.new_session(&self.capabilities).await?;

        let outcome = self.exercise(&session).await;
        let teardown = session.quit().await;

        match (outcome, teardown) {
            (Ok(()), teardown) => teardown,
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(quit_err)) => {
                warn!("Failed to close WebDriver session after error: {}", quit_err);
                Err(e)
            }
        }
    }

    async fn exercise(&self, session: &Session) -> Result<()> {
        if !self.warmup_url.is_empty() {
            session.goto(&self.warmup_url).await?;
        }

        session.goto(&self.target_url).await?;
        let source = session.page_source().await?;

        let ready_state = session.ready_state().await?;
        if ready_state != "complete" {
            return Err(SmokeError::Assertion(format!(
                "Frontend-Backend connection error. Expected readyState 'complete', got '{}'",
                ready_state
            )));
        }

        if !source.contains("Hello") {
            return Err(SmokeError::Assertion(
                "Server returned an error or 'Hello world' was not returned.".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl SmokeCheck for FrontendBackendCheck {
    fn class_name(&self) -> &str {
        "FrontendBackendCheckTestCase"
    }

    fn name(&self) -> &str {
        "test_frontend_backend"
    }

    async fn run(&self) -> Result<()> {
        self.with_session()
            .await
            .map_err(|e| e.in_context(ERROR_CONTEXT))
    }
}
