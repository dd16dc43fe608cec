//! Error taxonomy shared by the loader, the checks and the report writer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmokeError>;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Network {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    Assertion(String),

    #[error("{context}: {source}")]
    Database {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{0}")]
    DatabaseSetup(String),

    #[error("{0}")]
    Browser(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SmokeError {
    /// Name written as the `type` attribute of a JUnit failure.
    pub fn kind(&self) -> &'static str {
        match self {
            SmokeError::Config(_) => "ConfigurationFailure",
            SmokeError::Network { .. } => "NetworkFailure",
            SmokeError::Assertion(_) => "AssertionFailure",
            SmokeError::Database { .. } | SmokeError::DatabaseSetup(_) => {
                "DatabaseConnectionFailure"
            }
            SmokeError::Browser(_) => "BrowserAutomationFailure",
            SmokeError::IoError(_) | SmokeError::XmlError(_) => "ReportFailure",
            SmokeError::Other(_) => "UnexpectedFailure",
        }
    }

    /// Prefixes the message with `context`, keeping assertion failures
    /// distinguishable from automation failures.
    pub fn in_context(self, context: &str) -> Self {
        match self {
            SmokeError::Assertion(msg) => SmokeError::Assertion(format!("{}: {}", context, msg)),
            other => SmokeError::Browser(format!("{}: {}", context, other)),
        }
    }
}

impl From<config::ConfigError> for SmokeError {
    fn from(err: config::ConfigError) -> Self {
        SmokeError::Config(err.to_string())
    }
}

impl From<quick_xml::DeError> for SmokeError {
    fn from(err: quick_xml::DeError) -> Self {
        SmokeError::Config(err.to_string())
    }
}
