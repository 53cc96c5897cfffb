use std::io::{BufRead, Write};

use clap::Args;

use super::{printer, CommandError};
use crate::job::{Job, JobService};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the job to delete
    #[arg(long)]
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Show the job and ask. Anything but `n`/`no` confirms.
fn confirm<R: BufRead, W: Write>(job: &Job, input: &mut R, out: &mut W) -> std::io::Result<bool> {
    writeln!(out, "Job to be deleted:")?;
    writeln!(out, "{}", printer::job_details(job))?;
    write!(out, "\nAre you sure? ([Y]/n): ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(!matches!(answer.as_str(), "n" | "no"))
}

pub async fn execute<R: BufRead, W: Write>(
    args: DeleteArgs,
    service: &JobService,
    input: &mut R,
    out: &mut W,
) -> Result<(), CommandError> {
    let Some(job) = service.get_job(args.id).await? else {
        writeln!(out, "No job found with ID: {}", args.id)?;
        return Ok(());
    };

    if !args.force && !confirm(&job, input, out)? {
        writeln!(out, "Deletion cancelled")?;
        return Ok(());
    }

    match service.delete_job(args.id).await? {
        Some(deleted) => writeln!(
            out,
            "Application for {} at {} (ID: {}) deleted",
            deleted.position, deleted.company, args.id
        )?,
        None => writeln!(out, "No job found with ID: {}", args.id)?,
    }
    Ok(())
}
