pub mod create;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod printer;
pub mod update;

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::codec::CodecError;
use crate::job::{JobService, ServiceError};

#[derive(Debug, Parser)]
#[command(
    name = "jobtrack",
    version,
    about = "A CLI tool to track job applications efficiently."
)]
pub struct Cli {
    /// SQLite database URL, overrides DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a job application with optional details
    Create(create::CreateArgs),
    /// List job applications, by id, status or applied date
    List(list::ListArgs),
    /// Update an existing job application by its ID
    Update(update::UpdateArgs),
    /// Delete a job application by its ID
    Delete(delete::DeleteArgs),
    /// Export job applications as JSON or CSV to a file or standard output
    Export(export::ExportArgs),
    /// Import job applications from a .json or .csv file
    Import(import::ImportArgs),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dispatch one subcommand. Messages for the user go to `out`; the delete
/// confirmation reads its answer from `input`.
pub async fn run<R: BufRead, W: Write>(
    command: Command,
    service: &JobService,
    input: &mut R,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        Command::Create(args) => create::execute(args, service, out).await,
        Command::List(args) => list::execute(args, service, out).await,
        Command::Update(args) => update::execute(args, service, out).await,
        Command::Delete(args) => delete::execute(args, service, input, out).await,
        Command::Export(args) => export::execute(args, service, out).await,
        Command::Import(args) => import::execute(args, service, out).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::job::time;
    use crate::job::JobStatus;
    use chrono::Days;

    async fn service() -> JobService {
        JobService::new(test_pool().await)
    }

    /// Parse `args` like the shell would and run them, returning stdout
    async fn invoke(service: &JobService, args: &[&str], input: &str) -> Result<String, CommandError> {
        let cli = Cli::try_parse_from(std::iter::once("jobtrack").chain(args.iter().copied()))
            .expect("arguments parse");
        let mut out = Vec::new();
        run(cli.command, service, &mut input.as_bytes(), &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn create_list_and_force_delete() {
        let service = service().await;

        let created = invoke(
            &service,
            &["create", "--company", "Acme", "--position", "Engineer", "--applied", "2024-01-10"],
            "",
        )
        .await
        .unwrap();
        assert_eq!(created, "New job application (ID: 1) added, good luck!\n");

        let stored = service.get_job(1).await.unwrap().unwrap();
        assert_eq!(stored.status, JobStatus::Applied);
        assert_eq!(time::format_date(&stored.applied_at), "2024-01-10");

        let listed = invoke(&service, &["list", "--status", "Applied"], "").await.unwrap();
        assert!(listed.contains("Acme"));

        let deleted = invoke(&service, &["delete", "--id", "1", "--force"], "").await.unwrap();
        assert_eq!(deleted, "Application for Engineer at Acme (ID: 1) deleted\n");
        assert!(service.get_job(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_rejects_blank_company_and_future_dates() {
        let service = service().await;
        let tomorrow = time::format_date(&time::today().checked_add_days(Days::new(1)).unwrap());

        let blank = invoke(&service, &["create", "--company", "  ", "--position", "Engineer"], "").await;
        assert!(matches!(
            blank,
            Err(CommandError::Service(ServiceError::ValidationError(_)))
        ));

        let future = invoke(
            &service,
            &["create", "--company", "Acme", "--position", "Engineer", "--applied", &tomorrow],
            "",
        )
        .await;
        assert!(future.is_err());
        assert!(service.list_jobs(false).await.unwrap().is_empty());
    }

    #[test]
    fn invalid_status_and_dates_fail_to_parse() {
        for args in [
            ["jobtrack", "create", "--company", "A", "--position", "B", "--status", "Pending"],
            ["jobtrack", "create", "--company", "A", "--position", "B", "--applied", "10/01/2024"],
        ] {
            assert!(Cli::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn create_and_update_flags_carry_help_text() {
        use clap::CommandFactory;

        let cli = Cli::command();
        for name in ["create", "update"] {
            let subcommand = cli.find_subcommand(name).unwrap();
            for arg in subcommand.get_arguments() {
                if arg.is_global_set() || arg.get_id() == "help" {
                    continue;
                }
                assert!(
                    arg.get_help().is_some(),
                    "{} --{} has no help text",
                    name,
                    arg.get_id()
                );
            }
        }
    }

    #[tokio::test]
    async fn delete_asks_before_removing() {
        let service = service().await;
        invoke(&service, &["create", "--company", "Acme", "--position", "Engineer"], "")
            .await
            .unwrap();

        let cancelled = invoke(&service, &["delete", "--id", "1"], "n\n").await.unwrap();
        assert!(cancelled.contains("Are you sure? ([Y]/n): "));
        assert!(cancelled.ends_with("Deletion cancelled\n"));
        assert!(service.get_job(1).await.unwrap().is_some());

        let confirmed = invoke(&service, &["delete", "--id", "1"], "\n").await.unwrap();
        assert!(confirmed.ends_with("(ID: 1) deleted\n"));
        assert!(service.get_job(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_ids_are_reported_not_failed() {
        let service = service().await;
        for args in [
            &["list", "--id", "9"][..],
            &["update", "--id", "9", "--status", "offer"][..],
            &["delete", "--id", "9", "--force"][..],
        ] {
            let out = invoke(&service, args, "").await.unwrap();
            assert_eq!(out, "No job found with ID: 9\n");
        }
    }

    #[tokio::test]
    async fn update_touches_only_given_flags() {
        let service = service().await;
        invoke(
            &service,
            &["create", "--company", "Acme", "--position", "Engineer", "--location", "Remote"],
            "",
        )
        .await
        .unwrap();

        let out = invoke(
            &service,
            &["update", "--id", "1", "--status", "INTERVIEW", "--location", ""],
            "",
        )
        .await
        .unwrap();
        assert_eq!(out, "Job with id: 1 has been updated\n");

        let job = service.get_job(1).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Interview);
        assert_eq!(job.location.as_deref(), Some("Remote"));
        assert_eq!(job.company, "Acme");
    }

    #[tokio::test]
    async fn list_picks_filters_in_priority_order() {
        let service = service().await;
        for (company, status, applied) in [
            ("Acme", "applied", "2024-01-10"),
            ("Globex", "offer", "2024-02-10"),
            ("Initech", "applied", "2024-03-10"),
        ] {
            invoke(
                &service,
                &["create", "--company", company, "--position", "Dev", "--status", status, "--applied", applied],
                "",
            )
            .await
            .unwrap();
        }

        let by_status = invoke(&service, &["list", "--status", "offer", "--after", "2024-03-01"], "")
            .await
            .unwrap();
        assert!(by_status.contains("Globex"));
        assert!(!by_status.contains("Initech"));

        let by_date = invoke(&service, &["list", "--after", "2024-02-01"], "").await.unwrap();
        assert!(!by_date.contains("Acme"));
        assert!(by_date.contains("Globex") && by_date.contains("Initech"));

        let inverted = invoke(&service, &["list", "--after", "2024-02-01", "--before", "2024-01-01"], "").await;
        assert!(matches!(
            inverted,
            Err(CommandError::Service(ServiceError::ValidationError(_)))
        ));

        let latest = invoke(&service, &["list", "--latest"], "").await.unwrap();
        let initech = latest.find("Initech").unwrap();
        let acme = latest.find("Acme").unwrap();
        assert!(initech < acme);
    }

    #[tokio::test]
    async fn export_to_file_and_import_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let source = service().await;
        invoke(
            &source,
            &["create", "--company", "Acme", "--position", "Engineer", "--salary-range", "$100k"],
            "",
        )
        .await
        .unwrap();

        for name in ["jobs.json", "jobs.csv"] {
            let path = dir.path().join(name);
            let path = path.to_str().unwrap();
            let format = if name.ends_with(".csv") { "csv" } else { "json" };

            let exported = invoke(&source, &["export", "--format", format, "--output", path], "")
                .await
                .unwrap();
            assert_eq!(exported, format!("Exported 1 jobs to {}\n", path));

            let target = service().await;
            let imported = invoke(&target, &["import", path], "").await.unwrap();
            assert!(imported.contains("1 jobs added, 0 skipped as duplicates, 0 failed"));

            let again = invoke(&target, &["import", path], "").await.unwrap();
            assert!(again.contains("0 jobs added, 1 skipped as duplicates, 0 failed"));

            let job = target.get_job(1).await.unwrap().unwrap();
            assert_eq!(job.salary_range.as_deref(), Some("$100k"));
        }
    }

    #[tokio::test]
    async fn export_to_stdout_writes_the_document() {
        let service = service().await;
        let empty = invoke(&service, &["export"], "").await.unwrap();
        assert_eq!(empty, "No job applications available\n");

        invoke(&service, &["create", "--company", "Acme", "--position", "Engineer"], "")
            .await
            .unwrap();
        let csv = invoke(&service, &["export", "-f", "csv"], "").await.unwrap();
        assert!(csv.starts_with("Company,Position,Status,"));
        assert!(csv.lines().nth(1).unwrap().starts_with("Acme,Engineer,Applied,,,,"));
    }

    #[tokio::test]
    async fn import_rejects_unknown_extensions() {
        let service = service().await;
        let result = invoke(&service, &["import", "jobs.xml"], "").await;
        assert!(matches!(
            result,
            Err(CommandError::Codec(CodecError::UnsupportedFormat(_)))
        ));
    }
}
