use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::status::JobStatus;
use super::time::{self, serde_format};

/// A stored job application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_posting_url: Option<String>,
    #[serde(with = "serde_format::date")]
    pub applied_at: NaiveDate,
    #[serde(with = "serde_format::date_time")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serde_format::date_time")]
    pub updated_at: NaiveDateTime,
}

/// Job model for creating and validating applications
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
#[validate(schema(function = "validate_applied_at", skip_on_field_errors = false))]
pub struct NewJob {
    #[validate(length(min = 1, message = "Company not specified"))]
    pub company: String,
    #[validate(length(min = 1, message = "Position not specified"))]
    pub position: String,
    pub status: JobStatus,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_posting_url: Option<String>,
    /// `None` means today
    pub applied_at: Option<NaiveDate>,
}

fn validate_applied_at(job: &NewJob) -> Result<(), ValidationError> {
    match job.applied_at {
        Some(applied_at) if applied_at > time::today() => {
            let mut error = ValidationError::new("future_date");
            error.message = Some(Cow::from("Applied date cannot be in the future"));
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Partial update. Every `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<JobStatus>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_posting_url: Option<String>,
    pub applied_at: Option<NaiveDate>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self == &JobPatch::default()
    }
}

/// Identifying fields of a deleted row, for confirmation messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedJob {
    pub company: String,
    pub position: String,
}

/// Flatten validator output into readable messages, sorted for stable output.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
            })
        })
        .collect();
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn new_job() -> NewJob {
        NewJob {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            status: JobStatus::Applied,
            location: None,
            salary_range: None,
            job_posting_url: None,
            applied_at: NaiveDate::from_ymd_opt(2024, 1, 10),
        }
    }

    #[test]
    fn accepts_a_complete_job() {
        assert!(new_job().validate().is_ok());
    }

    #[test]
    fn accepts_today_and_a_missing_date() {
        let mut job = new_job();
        job.applied_at = Some(time::today());
        assert!(job.validate().is_ok());
        job.applied_at = None;
        assert!(job.validate().is_ok());
    }

    #[test]
    fn requires_company_and_position() {
        let mut job = new_job();
        job.company.clear();
        job.position.clear();
        let errors = job.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["Company not specified", "Position not specified"]
        );
    }

    #[test]
    fn rejects_future_application_dates() {
        let mut job = new_job();
        job.applied_at = time::today().checked_add_days(Days::new(1));
        let errors = job.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["Applied date cannot be in the future"]
        );
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(JobPatch::default().is_empty());
        let patch = JobPatch {
            status: Some(JobStatus::Interview),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
