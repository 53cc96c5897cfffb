pub mod connection;
pub mod error;
pub mod job_repository;
pub mod migrations;
pub mod models;

pub use error::StoreError;
pub use job_repository::JobRepository;

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::Pool<sqlx::Sqlite> {
    let pool = connection::get_connection("sqlite::memory:")
        .await
        .expect("open in-memory database");
    migrations::run_migrations(&pool)
        .await
        .expect("apply migrations");
    pool
}
