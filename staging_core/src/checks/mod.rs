//! The individual staging smoke checks

pub mod browser;
pub mod database;
pub mod http;

pub use browser::FrontendBackendCheck;
pub use database::DatabaseCheck;
pub use http::HttpStatusCheck;

use crate::Result;

/// One named test case. `class_name` and `name` end up as the JUnit
/// `classname` and `name` attributes.
#[async_trait::async_trait]
pub trait SmokeCheck {
    fn class_name(&self) -> &str;
    fn name(&self) -> &str;
    async fn run(&self) -> Result<()>;
}
