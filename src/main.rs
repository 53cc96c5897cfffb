use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod cmd;
mod codec;
mod config;
mod db;
mod job;

use crate::cmd::Cli;
use crate::job::JobService;

/// Console logs go to stderr so exports on stdout stay clean. With a log
/// directory, info and error logs are also written to daily-rotated files,
/// e.g. logs/info.log.2024-12-22.
fn init_tracing(log_dir: Option<&Path>) -> io::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    let file_layers = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            let info_layer = tracing_subscriber::fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, "info.log"))
                .with_ansi(false)
                .with_filter(LevelFilter::INFO);

            let error_layer = tracing_subscriber::fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, "error.log"))
                .with_ansi(false)
                .with_filter(LevelFilter::ERROR);

            Some(info_layer.and_then(error_layer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layers)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment, then apply the --database override
    let config = match config::Config::from_env().and_then(|c| c.with_database_url(cli.database.clone())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.log_dir.as_deref()) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    debug!("Using database {}", config.database_url);

    // A store that cannot be opened or migrated is fatal
    let pool = match db::connection::get_connection(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            eprintln!("Couldn't connect to db: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = db::migrations::run_migrations(&pool).await {
        error!("Failed to run database migrations: {}", e);
        eprintln!("Failed to initialise the database: {}", e);
        return ExitCode::FAILURE;
    }

    let service = JobService::new(pool.clone());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = cmd::run(cli.command, &service, &mut stdin.lock(), &mut stdout.lock()).await;

    pool.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
