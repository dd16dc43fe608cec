//! Core library for the staging smoke harness: configuration, the checks,
//! the runner and the JUnit report writer.

pub mod checks;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod webdriver;

pub use checks::{DatabaseCheck, FrontendBackendCheck, HttpStatusCheck, SmokeCheck};
pub use config::{HarnessConfig, StagingConfig, WebDriverConfig};
pub use error::{Result, SmokeError};
pub use report::{CaseFailure, CaseReport, CaseStatus, JunitWriter, SuiteReport};
pub use runner::SmokeSuite;
pub use webdriver::{Capabilities, Session, WebDriverClient};
