use crate::job::time;
use crate::job::Job;

fn optional(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

/// Labelled block for a single job
pub fn job_details(job: &Job) -> String {
    format!(
        "Job ID: {}\nCompany: {}\nPosition: {}\nStatus: {}\nLocation: {}\nApplied On: {}\nSalary Range: {}\nJob Posting: {}",
        job.id,
        job.company,
        job.position,
        job.status,
        optional(&job.location),
        time::format_date(&job.applied_at),
        optional(&job.salary_range),
        optional(&job.job_posting_url),
    )
}

const COLUMNS: [&str; 7] = [
    "ID",
    "Company",
    "Position",
    "Status",
    "Location",
    "Salary Range",
    "Applied On",
];

/// Column-aligned table, one line per job
pub fn jobs_table(jobs: &[Job]) -> String {
    let rows: Vec<[String; 7]> = jobs
        .iter()
        .map(|job| {
            [
                job.id.to_string(),
                job.company.clone(),
                job.position.clone(),
                job.status.to_string(),
                optional(&job.location).to_string(),
                optional(&job.salary_range).to_string(),
                time::format_date(&job.applied_at),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(COLUMNS.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| render(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}
