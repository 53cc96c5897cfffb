use std::io::{Read, Write};

use ::csv::{ReaderBuilder, StringRecord, Writer};

use super::{CodecError, DecodedRecords, JobRecord};
use crate::job::nullable;
use crate::job::time;
use crate::job::{Job, JobStatus};

pub const HEADER: [&str; 9] = [
    "Company",
    "Position",
    "Status",
    "Location",
    "SalaryRange",
    "JobPostingURL",
    "AppliedAt",
    "CreatedAt",
    "UpdatedAt",
];

fn to_row(job: &Job) -> [String; 9] {
    [
        job.company.clone(),
        job.position.clone(),
        job.status.to_string(),
        nullable::to_csv_field(&job.location).to_string(),
        nullable::to_csv_field(&job.salary_range).to_string(),
        nullable::to_csv_field(&job.job_posting_url).to_string(),
        time::format_date(&job.applied_at),
        time::format_date_time(&job.created_at),
        time::format_date_time(&job.updated_at),
    ]
}

/// Write the header row, then one row per job
pub fn encode<W: Write>(jobs: &[Job], writer: W) -> Result<(), CodecError> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for job in jobs {
        writer.write_record(to_row(job))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read rows in the fixed column order. The header must match exactly; each
/// data row decodes independently.
pub fn decode<R: Read>(reader: R) -> Result<DecodedRecords, CodecError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.headers()?;
    if header.iter().map(str::trim).ne(HEADER.iter().copied()) {
        return Err(CodecError::Header {
            found: header.iter().map(str::to_string).collect(),
            expected: HEADER,
        });
    }

    Ok(reader
        .records()
        .map(|row| from_row(&row?))
        .collect())
}

fn from_row(row: &StringRecord) -> Result<JobRecord, CodecError> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    if row.len() != HEADER.len() {
        return Err(CodecError::ColumnCount {
            line,
            expected: HEADER.len(),
            found: row.len(),
        });
    }
    let field_error = |message: String| CodecError::Field { line, message };

    let status = match &row[2] {
        "" => JobStatus::Applied,
        text => text
            .parse::<JobStatus>()
            .map_err(|e| field_error(e.to_string()))?,
    };
    let date = |text: &str| match text {
        "" => Ok(None),
        text => time::parse_date(text).map(Some).map_err(|e| field_error(e.to_string())),
    };
    let stamp = |text: &str| match text {
        "" => Ok(None),
        text => time::parse_date_time(text)
            .map(Some)
            .map_err(|e| field_error(e.to_string())),
    };

    Ok(JobRecord {
        company: row[0].to_string(),
        position: row[1].to_string(),
        status,
        location: nullable::from_empty(&row[3]),
        salary_range: nullable::from_empty(&row[4]),
        job_posting_url: nullable::from_empty(&row[5]),
        applied_at: date(&row[6])?,
        created_at: stamp(&row[7])?,
        updated_at: stamp(&row[8])?,
    })
}
