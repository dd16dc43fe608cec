pub mod settings;
pub mod staging;

pub use settings::{HarnessConfig, WebDriverConfig};
pub use staging::StagingConfig;
