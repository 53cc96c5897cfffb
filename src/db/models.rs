use sqlx::FromRow;

use crate::db::error::StoreError;
use crate::job::time;
use crate::job::{Job, JobStatus};

/// Database representation of a job with all fields. Dates are stored as text.
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub status: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_posting_url: Option<String>,
    pub applied_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let malformed = |reason: String| StoreError::MalformedRow { id, reason };

        Ok(Job {
            id,
            company: row.company,
            position: row.position,
            status: row
                .status
                .parse::<JobStatus>()
                .map_err(|e| malformed(e.to_string()))?,
            location: row.location,
            salary_range: row.salary_range,
            job_posting_url: row.job_posting_url,
            applied_at: time::parse_date(&row.applied_at).map_err(|e| malformed(e.to_string()))?,
            created_at: time::parse_date_time(&row.created_at)
                .map_err(|e| malformed(e.to_string()))?,
            updated_at: time::parse_date_time(&row.updated_at)
                .map_err(|e| malformed(e.to_string()))?,
        })
    }
}
