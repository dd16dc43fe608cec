//! Main entry point for the staging smoke test binary

use anyhow::Result;
use clap::Parser;
use staging_core::{HarnessConfig, JunitWriter, SmokeSuite, StagingConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Smoke-tests a deployed staging environment and writes JUnit reports.
#[derive(Parser, Debug)]
#[command(name = "staging-smoke", version, about)]
struct Cli {
    /// Staging endpoints and credentials (XML)
    #[arg(long, env = "SMOKE_STAGING_CONFIG")]
    staging_config: Option<PathBuf>,

    /// Directory for the JUnit XML reports
    #[arg(long, env = "SMOKE_REPORT_DIR")]
    report_dir: Option<PathBuf>,

    /// Runner settings file (defaults to ./smoke.toml when present)
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let mut harness = match &cli.settings {
        Some(path) => HarnessConfig::load_from(path),
        None => HarnessConfig::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load runner settings: {}", e))?;

    if let Some(path) = cli.staging_config {
        harness.staging_config_path = path;
    }
    if let Some(dir) = cli.report_dir {
        harness.report_dir = dir;
    }

    let staging = StagingConfig::load(&harness.staging_config_path)
        .map_err(|e| anyhow::anyhow!("Failed to load staging configuration: {}", e))?;

    info!("WebDriver endpoint: {}", harness.webdriver.url);
    info!("Reports will be written to: {}", harness.report_dir.display());

    let suite = SmokeSuite::staging(&staging, &harness);
    let report = suite.run().await;

    JunitWriter::new(&harness.report_dir)
        .write(&report)
        .map_err(|e| anyhow::anyhow!("Failed to write JUnit reports: {}", e))?;

    info!(
        "Ran {} checks in {:.3}s: {} passed, {} failed",
        report.cases.len(),
        report.total_duration().as_secs_f64(),
        report.passed(),
        report.failed()
    );

    Ok(report.is_success())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "staging_smoke=info,staging_core=info".into());

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "staging-smoke",
            "--staging-config",
            "conf/staging.xml",
            "--report-dir",
            "out",
        ]);
        assert_eq!(cli.staging_config, Some(PathBuf::from("conf/staging.xml")));
        assert_eq!(cli.report_dir, Some(PathBuf::from("out")));
        assert!(cli.settings.is_none());
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn test_missing_staging_config_aborts_before_checks() {
        let dir = tempfile::TempDir::new().unwrap();
        let report_dir = dir.path().join("test-reports");
        let settings = dir.path().join("smoke.toml");
        std::fs::write(&settings, "backend_port = 7200\n").unwrap();

        let cli = Cli {
            staging_config: Some(dir.path().join("missing.xml")),
            report_dir: Some(report_dir.clone()),
            settings: Some(settings),
        };

        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load staging configuration"));
        assert!(!report_dir.exists());
    }

    #[tokio::test]
    async fn test_all_checks_down_reports_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let report_dir = dir.path().join("test-reports");
        let down = format!("http://127.0.0.1:{}", closed_port());

        let settings = dir.path().join("smoke.toml");
        std::fs::write(
            &settings,
            format!(
                "backend_port = {}\n\n[webdriver]\nurl = \"{}\"\n",
                closed_port(),
                down
            ),
        )
        .unwrap();

        let staging_config = dir.path().join("staging_test_config.xml");
        std::fs::write(
            &staging_config,
            format!(
                "<config><frontendurl>{}</frontendurl><backendurl>http://127.0.0.1</backendurl>\
                 <dbHost>127.0.0.1</dbHost><dbPort>{}</dbPort><dbName>recipes</dbName>\
                 <dbUser>smoke</dbUser><dbPassword>secret</dbPassword></config>",
                down,
                closed_port()
            ),
        )
        .unwrap();

        let cli = Cli {
            staging_config: Some(staging_config),
            report_dir: Some(report_dir.clone()),
            settings: Some(settings),
        };

        let passed = run(cli).await.expect("run should complete");
        assert!(!passed);

        let reports = std::fs::read_dir(&report_dir).unwrap().count();
        assert_eq!(reports, 5);
    }
}
