//! Per-check results and the JUnit XML writer

pub mod junit;

pub use junit::JunitWriter;

use crate::error::SmokeError;
use chrono::{DateTime, Utc};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed,
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::Passed => write!(f, "passed"),
            CaseStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseFailure {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub class_name: String,
    pub name: String,
    pub status: CaseStatus,
    pub failure: Option<CaseFailure>,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
}

impl CaseReport {
    pub fn passed(class_name: &str, name: &str, duration: Duration, timestamp: DateTime<Utc>) -> Self {
        Self {
            class_name: class_name.to_string(),
            name: name.to_string(),
            status: CaseStatus::Passed,
            failure: None,
            duration,
            timestamp,
        }
    }

    pub fn failed(
        class_name: &str,
        name: &str,
        error: &SmokeError,
        duration: Duration,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            class_name: class_name.to_string(),
            name: name.to_string(),
            status: CaseStatus::Failed,
            failure: Some(CaseFailure {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
            duration,
            timestamp,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_case(&mut self, case: CaseReport) {
        self.cases.push(case);
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.cases.iter().all(CaseReport::is_passed)
    }

    pub fn total_duration(&self) -> Duration {
        self.cases.iter().map(|c| c.duration).sum()
    }
}
