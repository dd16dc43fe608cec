use super::SmokeCheck;
use crate::config::StagingConfig;
use crate::error::{Result, SmokeError};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::{info, warn};

const ERROR_CONTEXT: &str = "An error occurred while connecting to the database";

/// Opens one MySQL connection with the staging credentials and closes it.
pub struct DatabaseCheck {
    host: String,
    port: String,
    database: String,
    user: String,
    password: String,
}

impl DatabaseCheck {
    pub fn new(staging: &StagingConfig) -> Self {
        Self {
            host: staging.db_host.clone(),
            port: staging.db_port.clone(),
            database: staging.db_name.clone(),
            user: staging.db_user.clone(),
            password: staging.db_password.clone(),
        }
    }

    fn connect_options(&self) -> Result<MySqlConnectOptions> {
        let port: u16 = self.port.trim().parse().map_err(|_| {
            SmokeError::DatabaseSetup(format!("{}: invalid port '{}'", ERROR_CONTEXT, self.port))
        })?;

        Ok(MySqlConnectOptions::new()
            .host(&self.host)
            .port(port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password))
    }
}

#[async_trait::async_trait]
impl SmokeCheck for DatabaseCheck {
    fn class_name(&self) -> &str {
        "DBCheckTestCase"
    }

    fn name(&self) -> &str {
        "test_db"
    }

    async fn run(&self) -> Result<()> {
        let options = self.connect_options()?;

        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|source| SmokeError::Database {
                context: ERROR_CONTEXT.to_string(),
                source,
            })?;

        info!("Connected to database {} on {}:{}", self.database, self.host, self.port);

        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }

        Ok(())
    }
}
