//! Bulk export and import of jobs as JSON or CSV.

pub mod csv;
pub mod json;

use std::io::{Read, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use crate::job::nullable;
use crate::job::time::serde_format;
use crate::job::{Job, JobStatus, NewJob};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("file format `{0}` not supported. Use json or csv")]
    UnsupportedFormat(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("unexpected CSV header {found:?}, expected {expected:?}")]
    Header {
        found: Vec<String>,
        expected: [&'static str; 9],
    },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {message}")]
    Field { line: u64, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Exchange file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Pick the format from a file extension (`.json` or `.csv`)
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            _ => Err(CodecError::UnsupportedFormat(format!(".{}", extension))),
        }
    }
}

fn default_status() -> JobStatus {
    JobStatus::Applied
}

/// A job as read from an exchange file. Ids and stamps in the file are kept
/// for inspection but never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobRecord {
    pub company: String,
    pub position: String,
    #[serde(default = "default_status")]
    pub status: JobStatus,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub salary_range: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub job_posting_url: Option<String>,
    #[serde(default, deserialize_with = "serde_format::opt_date::deserialize")]
    pub applied_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_format::opt_date_time::deserialize")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "serde_format::opt_date_time::deserialize")]
    pub updated_at: Option<NaiveDateTime>,
}

impl JobRecord {
    pub fn into_new_job(self) -> NewJob {
        NewJob {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            status: self.status,
            location: self.location,
            salary_range: self.salary_range,
            job_posting_url: self.job_posting_url,
            applied_at: self.applied_at,
        }
    }
}

impl From<&Job> for JobRecord {
    fn from(job: &Job) -> Self {
        JobRecord {
            company: job.company.clone(),
            position: job.position.clone(),
            status: job.status,
            location: job.location.clone(),
            salary_range: job.salary_range.clone(),
            job_posting_url: job.job_posting_url.clone(),
            applied_at: Some(job.applied_at),
            created_at: Some(job.created_at),
            updated_at: Some(job.updated_at),
        }
    }
}

/// Decoded records in file order. A record that failed to decode keeps its slot.
pub type DecodedRecords = Vec<Result<JobRecord, CodecError>>;

pub fn encode<W: Write>(format: Format, jobs: &[Job], writer: W) -> Result<(), CodecError> {
    match format {
        Format::Json => json::encode(jobs, writer),
        Format::Csv => csv::encode(jobs, writer),
    }
}

pub fn decode<R: Read>(format: Format, reader: R) -> Result<DecodedRecords, CodecError> {
    match format {
        Format::Json => json::decode(reader),
        Format::Csv => csv::decode(reader),
    }
}
