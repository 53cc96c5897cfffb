use std::io::Write;

use chrono::NaiveDate;
use clap::Args;

use super::CommandError;
use crate::job::nullable;
use crate::job::time;
use crate::job::{JobPatch, JobService, JobStatus};

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// ID of the job to be updated
    #[arg(long)]
    pub id: i64,

    /// Name of the company where the job is
    #[arg(long)]
    pub company: Option<String>,

    /// Position you are applying to
    #[arg(long)]
    pub position: Option<String>,

    /// Stage of the hiring process: Applied, Interview, Offer, Accepted, "Rejected Offer" or Rejected
    #[arg(long)]
    pub status: Option<JobStatus>,

    /// Location of the job
    #[arg(long)]
    pub location: Option<String>,

    /// Salary range of the job
    #[arg(long)]
    pub salary_range: Option<String>,

    /// URL of the job posting
    #[arg(long)]
    pub job_posting_url: Option<String>,

    /// Date of the application formatted YYYY-MM-DD
    #[arg(long, value_parser = time::parse_date)]
    pub applied: Option<NaiveDate>,
}

fn text(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).and_then(nullable::from_empty)
}

impl UpdateArgs {
    /// Only flags given with a non-empty value end up in the patch
    pub fn patch(&self) -> JobPatch {
        JobPatch {
            company: text(&self.company),
            position: text(&self.position),
            status: self.status,
            location: text(&self.location),
            salary_range: text(&self.salary_range),
            job_posting_url: text(&self.job_posting_url),
            applied_at: self.applied,
        }
    }
}

pub async fn execute<W: Write>(
    args: UpdateArgs,
    service: &JobService,
    out: &mut W,
) -> Result<(), CommandError> {
    match service.update_job(args.id, &args.patch()).await? {
        Some(job) => writeln!(out, "Job with id: {} has been updated", job.id)?,
        None => writeln!(out, "No job found with ID: {}", args.id)?,
    }
    Ok(())
}
