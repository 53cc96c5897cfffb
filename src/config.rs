use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://jobtrack.db";

/// Application configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Database connection URL
    /// Format: sqlite://PATH or sqlite::memory:
    pub database_url: String,

    /// Directory for daily-rotated log files. No file logging when unset.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Optional environment variables:
    /// - DATABASE_URL: SQLite connection string (default: sqlite://jobtrack.db)
    /// - LOG_DIR: directory for log files
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        check_database_url(&database_url)?;

        let log_dir = lookup("LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            database_url,
            log_dir,
        })
    }

    /// Replace the database URL, e.g. from the `--database` flag
    pub fn with_database_url(mut self, database_url: Option<String>) -> Result<Self, String> {
        if let Some(url) = database_url {
            check_database_url(&url)?;
            self.database_url = url;
        }
        Ok(self)
    }
}

fn check_database_url(url: &str) -> Result<(), String> {
    if url.starts_with("sqlite:") {
        Ok(())
    } else {
        Err(format!("DATABASE_URL must be a sqlite: URL, got `{}`", url))
    }
}
