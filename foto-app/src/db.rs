//! Database handle, built once in `main` and injected through the container.
//! Controllers that need it take an `Arc<Database>` from their factory.

use crate::config::DatabaseConfig;

#[derive(Debug)]
pub struct Database {
    config: DatabaseConfig,
    dsn: String,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        let dsn = config.dsn();
        tracing::debug!(host = %config.host, port = config.port, database = %config.database, "database configured");
        Self { config, dsn }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Data source name for the driver.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn name(&self) -> &str {
        &self.config.database
    }
}
