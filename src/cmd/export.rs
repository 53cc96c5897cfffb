use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::CommandError;
use crate::codec::{self, Format};
use crate::job::JobService;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Format of the export
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Output file (leave empty to print to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn execute<W: Write>(
    args: ExportArgs,
    service: &JobService,
    out: &mut W,
) -> Result<(), CommandError> {
    let jobs = service.list_jobs(true).await?;
    if jobs.is_empty() {
        writeln!(out, "No job applications available")?;
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            codec::encode(args.format, &jobs, BufWriter::new(file))?;
            info!("Exported {} jobs to {}", jobs.len(), path.display());
            writeln!(out, "Exported {} jobs to {}", jobs.len(), path.display())?;
        }
        None => codec::encode(args.format, &jobs, &mut *out)?,
    }
    Ok(())
}
