use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::db::error::StoreError;
use crate::db::models::JobRow;
use crate::job::nullable;
use crate::job::time;
use crate::job::{DeletedJob, Job, JobPatch, JobStatus, NewJob};

const JOB_COLUMNS: &str = "id, company, position, status, location, salary_range, \
                           job_posting_url, applied_at, created_at, updated_at";

/// Repository for Job database operations
pub struct JobRepository;

impl JobRepository {
    /// Check that the database answers
    pub async fn ping(pool: &Pool<Sqlite>) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(StoreError::NotConnected)?;
        Ok(())
    }

    /// Insert a job and return its new id. `applied_at` defaults to today;
    /// both stamps are set to now.
    pub async fn insert(pool: &Pool<Sqlite>, job: &NewJob) -> Result<i64, StoreError> {
        debug!(
            "Creating job: company={}, position={}, status={}",
            job.company, job.position, job.status
        );

        let applied_at = time::format_date(&job.applied_at.unwrap_or_else(time::today));
        let now = time::format_date_time(&time::now());

        let result = sqlx::query(
            r#"
            INSERT INTO jobs
                (company, position, status, location, applied_at, salary_range,
                 job_posting_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.status.as_str())
        .bind(nullable::to_sql(&job.location))
        .bind(&applied_at)
        .bind(nullable::to_sql(&job.salary_range))
        .bind(nullable::to_sql(&job.job_posting_url))
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Job created with id={}", id);
        Ok(id)
    }

    /// Point lookup. `Ok(None)` when no row has this id.
    pub async fn get_by_id(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Job>, StoreError> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?");
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        row.map(Job::try_from).transpose()
    }

    /// Every job, unordered. `include_timestamps` only records whether the
    /// caller needs the stamps; the same columns are read either way.
    pub async fn list_all(
        pool: &Pool<Sqlite>,
        include_timestamps: bool,
    ) -> Result<Vec<Job>, StoreError> {
        debug!("Listing all jobs (include_timestamps={})", include_timestamps);
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs");
        let rows = sqlx::query_as::<_, JobRow>(&query).fetch_all(pool).await?;
        Self::into_jobs(rows)
    }

    /// Jobs with the given status, oldest application first
    pub async fn list_by_status(
        pool: &Pool<Sqlite>,
        status: JobStatus,
    ) -> Result<Vec<Job>, StoreError> {
        debug!("Listing jobs with status={}", status);
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE status = ? ORDER BY applied_at ASC");
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await?;
        Self::into_jobs(rows)
    }

    /// Jobs applied for between `after` and `before`, both inclusive
    pub async fn list_by_date_range(
        pool: &Pool<Sqlite>,
        after: NaiveDate,
        before: NaiveDate,
    ) -> Result<Vec<Job>, StoreError> {
        if after > before {
            return Err(StoreError::InvalidRange { after, before });
        }
        debug!("Listing jobs applied between {} and {}", after, before);

        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE applied_at >= ? AND applied_at <= ? ORDER BY applied_at ASC"
        );
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(time::format_date(&after))
            .bind(time::format_date(&before))
            .fetch_all(pool)
            .await?;
        Self::into_jobs(rows)
    }

    /// Apply the fields present in `patch` and refresh `updated_at`.
    /// `Ok(None)` when no row has this id.
    pub async fn update(
        pool: &Pool<Sqlite>,
        id: i64,
        patch: &JobPatch,
    ) -> Result<Option<Job>, StoreError> {
        debug!("Updating job id={} with {:?}", id, patch);

        let query = format!(
            r#"
            UPDATE jobs SET
                company = COALESCE(?, company),
                position = COALESCE(?, position),
                status = COALESCE(?, status),
                location = COALESCE(?, location),
                salary_range = COALESCE(?, salary_range),
                job_posting_url = COALESCE(?, job_posting_url),
                applied_at = COALESCE(?, applied_at),
                updated_at = ?
            WHERE id = ?
            RETURNING {JOB_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(nullable::to_sql(&patch.company))
            .bind(nullable::to_sql(&patch.position))
            .bind(patch.status.map(|status| status.as_str()))
            .bind(nullable::to_sql(&patch.location))
            .bind(nullable::to_sql(&patch.salary_range))
            .bind(nullable::to_sql(&patch.job_posting_url))
            .bind(patch.applied_at.as_ref().map(time::format_date))
            .bind(time::format_date_time(&time::now()))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        row.map(Job::try_from).transpose()
    }

    /// Delete by id and return what was deleted. `Ok(None)` when no row matched.
    pub async fn delete_by_id(
        pool: &Pool<Sqlite>,
        id: i64,
    ) -> Result<Option<DeletedJob>, StoreError> {
        debug!("Deleting job id={}", id);

        let deleted = sqlx::query_as::<_, (String, String)>(
            "DELETE FROM jobs WHERE id = ? RETURNING company, position",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(deleted.map(|(company, position)| DeletedJob { company, position }))
    }

    /// Whether a job with the same company, position and application date exists
    pub async fn exists(
        pool: &Pool<Sqlite>,
        company: &str,
        position: &str,
        applied_at: NaiveDate,
    ) -> Result<bool, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jobs WHERE company = ? AND position = ? AND applied_at = ?",
        )
        .bind(company)
        .bind(position)
        .bind(time::format_date(&applied_at))
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    fn into_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, StoreError> {
        debug!("Fetched {} job rows", rows.len());
        rows.into_iter().map(Job::try_from).collect()
    }
}
