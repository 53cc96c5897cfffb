use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use super::dto::{ImportSummary, RecordError};
use super::models::{validation_messages, DeletedJob, Job, JobPatch, NewJob};
use super::status::JobStatus;
use super::time;
use crate::codec::DecodedRecords;
use crate::db::{JobRepository, StoreError};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] StoreError),

    /// Validation failed
    #[error("{}", .0.join("\n"))]
    ValidationError(Vec<String>),
}

/// Job service containing business logic. Holds the one store handle the
/// process opens and is passed to every command.
pub struct JobService {
    pool: Pool<Sqlite>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Fail fast when the database is unreachable
    pub async fn ping(&self) -> Result<(), ServiceError> {
        Ok(JobRepository::ping(&self.pool).await?)
    }

    /// Create a single job
    ///
    /// # Business Logic
    /// - Validates required fields and the application date
    /// - Inserts the job, defaulting `applied_at` to today
    ///
    /// # Returns
    /// - `Ok(id)` - Job created successfully
    /// - `Err(ServiceError)` - Validation or insert failed
    pub async fn create_job(&self, job: &NewJob) -> Result<i64, ServiceError> {
        info!("Service: Creating job company={} position={}", job.company, job.position);

        if let Err(errors) = job.validate() {
            let messages = validation_messages(&errors);
            warn!("Service: Validation failed: {:?}", messages);
            return Err(ServiceError::ValidationError(messages));
        }

        let id = JobRepository::insert(&self.pool, job).await?;
        info!("Service: Job created successfully with id={}", id);
        Ok(id)
    }

    pub async fn get_job(&self, id: i64) -> Result<Option<Job>, ServiceError> {
        Ok(JobRepository::get_by_id(&self.pool, id).await?)
    }

    pub async fn list_jobs(&self, include_timestamps: bool) -> Result<Vec<Job>, ServiceError> {
        Ok(JobRepository::list_all(&self.pool, include_timestamps).await?)
    }

    pub async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, ServiceError> {
        Ok(JobRepository::list_by_status(&self.pool, status).await?)
    }

    pub async fn list_jobs_by_date(
        &self,
        after: NaiveDate,
        before: NaiveDate,
    ) -> Result<Vec<Job>, ServiceError> {
        if after > before {
            return Err(ServiceError::ValidationError(vec![format!(
                "After date {} is later than before date {}",
                time::format_date(&after),
                time::format_date(&before)
            )]));
        }
        Ok(JobRepository::list_by_date_range(&self.pool, after, before).await?)
    }

    /// Apply a patch. `Ok(None)` when the id is unknown.
    pub async fn update_job(&self, id: i64, patch: &JobPatch) -> Result<Option<Job>, ServiceError> {
        if patch.is_empty() {
            warn!("Service: No fields supplied for job {}, only refreshing updated_at", id);
        }

        let job = JobRepository::update(&self.pool, id, patch).await?;
        match &job {
            Some(job) => info!("Service: Job {} updated", job.id),
            None => warn!("Service: No job found with id={}", id),
        }
        Ok(job)
    }

    /// Delete a job. `Ok(None)` when the id is unknown.
    pub async fn delete_job(&self, id: i64) -> Result<Option<DeletedJob>, ServiceError> {
        let deleted = JobRepository::delete_by_id(&self.pool, id).await?;
        if deleted.is_some() {
            info!("Service: Job {} deleted", id);
        }
        Ok(deleted)
    }

    /// Bulk import decoded records
    ///
    /// # Business Logic
    /// - Each record is validated and inserted on its own
    /// - Records already stored (same company, position and application date) are skipped
    /// - Decode, validation and insert failures are collected with the record number
    ///   and never abort the batch
    ///
    /// # Returns
    /// - `Ok(ImportSummary)` - Records processed (may have partial errors)
    /// - `Err(ServiceError)` - The database is unreachable
    pub async fn import_jobs(&self, records: DecodedRecords) -> Result<ImportSummary, ServiceError> {
        info!("Service: Processing import of {} records", records.len());
        self.ping().await?;

        let mut summary = ImportSummary::default();

        for (index, record) in records.into_iter().enumerate() {
            let number = index + 1;
            let fail = |errors: Vec<String>| {
                warn!("Service: Record {} not imported: {:?}", number, errors);
                RecordError {
                    record: number,
                    errors,
                }
            };

            let job = match record {
                Ok(record) => record.into_new_job(),
                Err(e) => {
                    summary.errors.push(fail(vec![e.to_string()]));
                    continue;
                }
            };

            if let Err(errors) = job.validate() {
                summary.errors.push(fail(validation_messages(&errors)));
                continue;
            }

            let applied_at = job.applied_at.unwrap_or_else(time::today);
            match JobRepository::exists(&self.pool, &job.company, &job.position, applied_at).await {
                Ok(true) => {
                    info!("Service: Record {} already stored, skipping", number);
                    summary.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    summary.errors.push(fail(vec![e.to_string()]));
                    continue;
                }
            }

            match JobRepository::insert(&self.pool, &job).await {
                Ok(_) => summary.created += 1,
                Err(e) => summary.errors.push(fail(vec![e.to_string()])),
            }
        }

        if summary.errors.is_empty() {
            info!("Service: Import completed successfully: {}", summary.message());
        } else {
            warn!("Service: Import completed with errors: {}", summary.message());
        }
        Ok(summary)
    }
}
