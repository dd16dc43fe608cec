//! Ordered, sequential execution of the registered smoke checks

use crate::checks::{DatabaseCheck, FrontendBackendCheck, HttpStatusCheck, SmokeCheck};
use crate::config::{HarnessConfig, StagingConfig};
use crate::report::{CaseReport, SuiteReport};
use std::time::Instant;
use tracing::{error, info};

pub struct SmokeSuite {
    checks: Vec<Box<dyn SmokeCheck + Send + Sync>>,
}

impl SmokeSuite {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// The five staging checks, in reporting order.
    pub fn staging(staging: &StagingConfig, harness: &HarnessConfig) -> Self {
        SmokeSuite::new()
            .add_check(HttpStatusCheck::frontend(staging))
            .add_check(HttpStatusCheck::backend(staging, harness))
            .add_check(DatabaseCheck::new(staging))
            .add_check(FrontendBackendCheck::new(staging, harness))
            .add_check(HttpStatusCheck::backend_db(staging, harness))
    }

    pub fn add_check<T: SmokeCheck + Send + Sync + 'static>(mut self, check: T) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub async fn run(&self) -> SuiteReport {
        let mut report = SuiteReport::new();

        info!("Running {} staging smoke checks", self.checks.len());

        for check in &self.checks {
            let timestamp = chrono::Utc::now();
            let start = Instant::now();

            let result = check.run().await;
            let duration = start.elapsed();

            let case = match result {
                Ok(()) => {
                    info!("{}.{} passed in {:?}", check.class_name(), check.name(), duration);
                    CaseReport::passed(check.class_name(), check.name(), duration, timestamp)
                }
                Err(e) => {
                    error!("{}.{} failed in {:?}: {}", check.class_name(), check.name(), duration, e);
                    CaseReport::failed(check.class_name(), check.name(), &e, duration, timestamp)
                }
            };

            report.add_case(case);
        }

        info!(
            "Smoke run completed - {} passed, {} failed",
            report.passed(),
            report.failed()
        );
        report
    }
}

impl Default for SmokeSuite {
    fn default() -> Self {
        Self::new()
    }
}
