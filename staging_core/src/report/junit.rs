use super::{CaseReport, SuiteReport};
use crate::error::{Result, SmokeError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes one `TEST-<class>-<timestamp>.xml` file per test case.
pub struct JunitWriter {
    output_dir: PathBuf,
}

impl JunitWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write(&self, report: &SuiteReport) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(report.cases.len());
        for case in &report.cases {
            let path = self.output_dir.join(file_name(case));
            std::fs::write(&path, render_case(case)?)?;
            written.push(path);
        }

        info!("Wrote {} JUnit reports to {}", written.len(), self.output_dir.display());
        Ok(written)
    }
}

fn suite_name(case: &CaseReport) -> String {
    format!("{}-{}", case.class_name, case.timestamp.format("%Y%m%d%H%M%S"))
}

pub fn file_name(case: &CaseReport) -> String {
    format!("TEST-{}.xml", suite_name(case))
}

pub fn render_case(case: &CaseReport) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let time = format!("{:.3}", case.duration.as_secs_f64());
    let timestamp = case.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string();
    let name = suite_name(case);
    let failures = if case.failure.is_some() { "1" } else { "0" };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut suite = BytesStart::new("testsuite");
    suite.push_attribute(("name", name.as_str()));
    suite.push_attribute(("tests", "1"));
    suite.push_attribute(("errors", "0"));
    suite.push_attribute(("failures", failures));
    suite.push_attribute(("skipped", "0"));
    suite.push_attribute(("time", time.as_str()));
    suite.push_attribute(("timestamp", timestamp.as_str()));
    writer.write_event(Event::Start(suite))?;

    let mut testcase = BytesStart::new("testcase");
    testcase.push_attribute(("classname", case.class_name.as_str()));
    testcase.push_attribute(("name", case.name.as_str()));
    testcase.push_attribute(("time", time.as_str()));
    testcase.push_attribute(("timestamp", timestamp.as_str()));

    match &case.failure {
        None => writer.write_event(Event::Empty(testcase))?,
        Some(failure) => {
            writer.write_event(Event::Start(testcase))?;

            let mut element = BytesStart::new("failure");
            element.push_attribute(("type", failure.kind.as_str()));
            element.push_attribute(("message", failure.message.as_str()));
            writer.write_event(Event::Start(element))?;
            writer.write_event(Event::Text(BytesText::new(&failure.message)))?;
            writer.write_event(Event::End(BytesEnd::new("failure")))?;

            writer.write_event(Event::End(BytesEnd::new("testcase")))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| SmokeError::Other(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CaseReport;
    use chrono::TimeZone;
    use std::time::Duration;
    use tempfile::TempDir;

    fn timestamp() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 5).unwrap()
    }

    #[test]
    fn test_file_name() {
        let case = CaseReport::passed(
            "FrontendCheckTestCase",
            "test_frontend",
            Duration::from_millis(5),
            timestamp(),
        );
        assert_eq!(file_name(&case), "TEST-FrontendCheckTestCase-20261019083005.xml");
    }

    #[test]
    fn test_render_passed_case() {
        let case = CaseReport::passed(
            "BackendCheckTestCase",
            "test_backend",
            Duration::from_millis(1250),
            timestamp(),
        );
        let xml = render_case(&case).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"tests="1" errors="0" failures="0""#));
        assert!(xml.contains(r#"<testcase classname="BackendCheckTestCase" name="test_backend" time="1.250""#));
        assert!(!xml.contains("<failure"));
    }

    #[test]
    fn test_render_failed_case_escapes_message() {
        let err = SmokeError::Assertion("Server returned <b>\"oops\"</b> & more".to_string());
        let case = CaseReport::failed(
            "FrontendBackendCheckTestCase",
            "test_frontend_backend",
            &err,
            Duration::from_millis(10),
            timestamp(),
        );
        let xml = render_case(&case).unwrap();

        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"<failure type="AssertionFailure""#));
        assert!(xml.contains("&lt;b&gt;"));
        assert!(xml.contains("&amp; more"));
        assert!(!xml.contains("<b>"));
    }

    #[test]
    fn test_write_creates_one_file_per_case() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("test-reports");

        let mut report = SuiteReport::new();
        report.add_case(CaseReport::passed("A", "test_a", Duration::ZERO, timestamp()));
        let err = SmokeError::Browser("no session".to_string());
        report.add_case(CaseReport::failed("B", "test_b", &err, Duration::ZERO, timestamp()));

        let written = JunitWriter::new(&output).write(&report).unwrap();

        assert_eq!(written.len(), 2);
        assert!(output.join("TEST-A-20261019083005.xml").exists());
        let failed = std::fs::read_to_string(output.join("TEST-B-20261019083005.xml")).unwrap();
        assert!(failed.contains("BrowserAutomationFailure"));
        assert!(failed.contains("no session"));
    }
}
