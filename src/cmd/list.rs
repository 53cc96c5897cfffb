use std::io::Write;

use chrono::NaiveDate;
use clap::Args;

use super::{printer, CommandError};
use crate::job::time;
use crate::job::{JobService, JobStatus};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// ID of a single job
    #[arg(long)]
    pub id: Option<i64>,

    /// Only jobs with this status
    #[arg(long)]
    pub status: Option<JobStatus>,

    /// Jobs applied on or after this date (default 1970-01-01)
    #[arg(long, value_parser = time::parse_date)]
    pub after: Option<NaiveDate>,

    /// Jobs applied on or before this date (default today)
    #[arg(long, value_parser = time::parse_date)]
    pub before: Option<NaiveDate>,

    /// Newest application first
    #[arg(long)]
    pub latest: bool,
}

/// Which jobs to list. Flags are checked in this order and the first one given wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFilter {
    Id(i64),
    Status(JobStatus),
    DateRange { after: NaiveDate, before: NaiveDate },
    All,
}

impl ListArgs {
    pub fn filter(&self) -> ListFilter {
        if let Some(id) = self.id {
            ListFilter::Id(id)
        } else if let Some(status) = self.status {
            ListFilter::Status(status)
        } else if self.after.is_some() || self.before.is_some() {
            ListFilter::DateRange {
                // NaiveDate's default is 1970-01-01
                after: self.after.unwrap_or_default(),
                before: self.before.unwrap_or_else(time::today),
            }
        } else {
            ListFilter::All
        }
    }
}

pub async fn execute<W: Write>(
    args: ListArgs,
    service: &JobService,
    out: &mut W,
) -> Result<(), CommandError> {
    let (mut jobs, empty_message) = match args.filter() {
        ListFilter::Id(id) => {
            match service.get_job(id).await? {
                Some(job) => writeln!(out, "{}", printer::job_details(&job))?,
                None => writeln!(out, "No job found with ID: {}", id)?,
            }
            return Ok(());
        }
        ListFilter::Status(status) => (
            service.list_jobs_by_status(status).await?,
            "No jobs found with that status",
        ),
        ListFilter::DateRange { after, before } => (
            service.list_jobs_by_date(after, before).await?,
            "No jobs found within the specified date range",
        ),
        ListFilter::All => (
            service.list_jobs(false).await?,
            "No job applications available",
        ),
    };

    if jobs.is_empty() {
        writeln!(out, "{}", empty_message)?;
        return Ok(());
    }
    if args.latest {
        jobs.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then(b.id.cmp(&a.id)));
    }
    writeln!(out, "{}", printer::jobs_table(&jobs))?;
    Ok(())
}
