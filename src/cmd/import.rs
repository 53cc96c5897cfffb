use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use clap::Args;

use super::CommandError;
use crate::codec::{self, Format};
use crate::job::JobService;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a .json or .csv file
    pub file: PathBuf,
}

pub async fn execute<W: Write>(
    args: ImportArgs,
    service: &JobService,
    out: &mut W,
) -> Result<(), CommandError> {
    let format = Format::from_path(&args.file)?;
    let reader = BufReader::new(File::open(&args.file)?);
    let records = codec::decode(format, reader)?;

    let summary = service.import_jobs(records).await?;
    writeln!(
        out,
        "Import from {} complete: {}.",
        args.file.display(),
        summary.message()
    )?;
    for error in &summary.errors {
        writeln!(out, "  record {}: {}", error.record, error.errors.join("; "))?;
    }
    Ok(())
}
