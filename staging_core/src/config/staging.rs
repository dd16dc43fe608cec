//! Staging environment endpoints and credentials, read from an XML file
//! whose root holds one element per field:
//!
//! ```xml
//! <config>
//!   <frontendurl>http://frontend.example</frontendurl>
//!   <backendurl>http://backend.example</backendurl>
//!   <dbHost>db.example</dbHost>
//!   <dbPort>3306</dbPort>
//!   <dbName>recipes</dbName>
//!   <dbUser>smoke</dbUser>
//!   <dbPassword>secret</dbPassword>
//! </config>
//! ```

use crate::error::{Result, SmokeError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::info;

#[derive(Clone, Deserialize, PartialEq)]
pub struct StagingConfig {
    #[serde(rename = "frontendurl")]
    pub frontend_url: String,
    #[serde(rename = "backendurl")]
    pub backend_url: String,
    #[serde(rename = "dbHost")]
    pub db_host: String,
    #[serde(rename = "dbPort")]
    pub db_port: String,
    #[serde(rename = "dbName")]
    pub db_name: String,
    #[serde(rename = "dbUser")]
    pub db_user: String,
    #[serde(rename = "dbPassword")]
    pub db_password: String,
}

impl StagingConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| {
            SmokeError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let config = Self::from_xml(&xml)?;
        info!(
            "Loaded staging config from {} (frontend: {}, backend: {}, database: {}:{}/{})",
            path.display(),
            config.frontend_url,
            config.backend_url,
            config.db_host,
            config.db_port,
            config.db_name
        );

        Ok(config)
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

impl fmt::Debug for StagingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagingConfig")
            .field("frontend_url", &self.frontend_url)
            .field("backend_url", &self.backend_url)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<config>
    <frontendurl>http://ok.example</frontendurl>
    <backendurl>http://api.example</backendurl>
    <dbHost>db.example</dbHost>
    <dbPort>3306</dbPort>
    <dbName>recipes</dbName>
    <dbUser>smoke</dbUser>
    <dbPassword>hunter2</dbPassword>
</config>"#;

    #[test]
    fn test_parse_all_fields() {
        let config = StagingConfig::from_xml(SAMPLE).unwrap();
        assert_eq!(config.frontend_url, "http://ok.example");
        assert_eq!(config.backend_url, "http://api.example");
        assert_eq!(config.db_host, "db.example");
        assert_eq!(config.db_port, "3306");
        assert_eq!(config.db_name, "recipes");
        assert_eq!(config.db_user, "smoke");
        assert_eq!(config.db_password, "hunter2");
    }

    #[test]
    fn test_missing_element_is_config_error() {
        let xml = SAMPLE.replace("<dbName>recipes</dbName>", "");
        let err = StagingConfig::from_xml(&xml).unwrap_err();
        assert_eq!(err.kind(), "ConfigurationFailure");
        assert!(err.to_string().contains("dbName"));
    }

    #[test]
    fn test_malformed_xml_is_config_error() {
        let err = StagingConfig::from_xml("<config><frontendurl>").unwrap_err();
        assert!(matches!(err, SmokeError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = StagingConfig::from_xml(SAMPLE).unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("db.example"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = StagingConfig::load(file.path()).unwrap();
        assert_eq!(config.frontend_url, "http://ok.example");
    }

    #[test]
    fn test_load_missing_file() {
        let err = StagingConfig::load(Path::new("./does-not-exist/staging_test_config.xml"))
            .unwrap_err();
        assert!(matches!(err, SmokeError::Config(_)));
    }
}
