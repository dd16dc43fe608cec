use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub staging_config_path: PathBuf,
    pub report_dir: PathBuf,
    pub backend_port: u16,
    pub webdriver: WebDriverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebDriverConfig {
    pub url: String,
    pub browser_name: String,
    pub browser_version: String,
    pub platform_name: String,
    pub warmup_url: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            staging_config_path: PathBuf::from("staging_test_config.xml"),
            report_dir: PathBuf::from("test-reports"),
            backend_port: 7200,
            webdriver: WebDriverConfig::default(),
        }
    }
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: "http://192.168.2.130:4444/".to_string(),
            browser_name: "chrome".to_string(),
            browser_version: "67".to_string(),
            platform_name: "Windows XP".to_string(),
            warmup_url: "http://www.google.com".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Defaults, then `smoke.toml` in the working directory if present, then
    /// `SMOKE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let file = Path::new("smoke.toml");
        Self::build(file.exists().then_some(file))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(Some(path))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&HarnessConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SMOKE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?;
        let harness_config: HarnessConfig = config.try_deserialize()?;

        harness_config.validate()?;

        Ok(harness_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_port == 0 {
            return Err(ConfigError::Message("Backend port cannot be 0".to_string()));
        }

        if self.webdriver.url.is_empty() {
            return Err(ConfigError::Message(
                "WebDriver URL cannot be empty".to_string(),
            ));
        }

        if self.report_dir.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "Report directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// `{backend_url}:{backend_port}{path}`
    pub fn backend_endpoint(&self, backend_url: &str, path: &str) -> String {
        format!("{}:{}{}", backend_url, self.backend_port, path)
    }
}
