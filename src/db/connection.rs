use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::db::error::StoreError;

/// Open the SQLite database
///
/// # Parameters
/// - `database_url`: SQLite connection string, e.g. `sqlite://jobtrack.db` or
///   `sqlite::memory:`. The file is created if it does not exist.
///
/// # Returns
/// A pool holding a single long-lived connection. One connection keeps an
/// in-memory database alive for the whole process.
pub async fn get_connection(database_url: &str) -> Result<Pool<Sqlite>, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(StoreError::NotConnected)?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(Option::<Duration>::None)
        .max_lifetime(Option::<Duration>::None)
        .connect_with(options)
        .await
        .map_err(StoreError::NotConnected)
}
