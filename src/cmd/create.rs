use std::io::Write;

use chrono::NaiveDate;
use clap::Args;

use super::CommandError;
use crate::job::nullable;
use crate::job::time;
use crate::job::{JobService, JobStatus, NewJob};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name of the company where the job is
    #[arg(long)]
    pub company: String,

    /// Position you are applying to
    #[arg(long)]
    pub position: String,

    /// Stage of the hiring process: Applied, Interview, Offer, Accepted, "Rejected Offer" or Rejected
    #[arg(long, default_value = "applied")]
    pub status: JobStatus,

    /// Location of the job
    #[arg(long)]
    pub location: Option<String>,

    /// Salary range of the job
    #[arg(long)]
    pub salary_range: Option<String>,

    /// URL of the job posting
    #[arg(long)]
    pub job_posting_url: Option<String>,

    /// Date of the application formatted YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = time::parse_date)]
    pub applied: Option<NaiveDate>,
}

impl CreateArgs {
    pub fn into_new_job(self) -> NewJob {
        NewJob {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            status: self.status,
            location: self.location.as_deref().and_then(nullable::from_empty),
            salary_range: self.salary_range.as_deref().and_then(nullable::from_empty),
            job_posting_url: self.job_posting_url.as_deref().and_then(nullable::from_empty),
            applied_at: self.applied,
        }
    }
}

pub async fn execute<W: Write>(
    args: CreateArgs,
    service: &JobService,
    out: &mut W,
) -> Result<(), CommandError> {
    let id = service.create_job(&args.into_new_job()).await?;
    writeln!(out, "New job application (ID: {}) added, good luck!", id)?;
    Ok(())
}
