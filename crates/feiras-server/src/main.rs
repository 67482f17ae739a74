//! Feiras - Main entry point

use std::process;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use feiras_common::logging::{init_logging, LogConfig};
use tracing::{error, info};

use feiras_server::{
    api,
    cli::{Cli, Commands, ImportArgs},
    config::Config,
    db,
    ingest::ImportPipeline,
    repository::PgFeiraLivreRepository,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    if let Err(e) = run(cli).await {
        error!(error = %format!("{e:#}"), "Command failed");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::read_env()?;
    if let Commands::Import(args) = &cli.command {
        args.apply(&mut config)?;
    }
    config.validate()?;

    // LOG_* variables take precedence over the per-environment defaults
    let log_config = LogConfig::for_environment(config.environment).merge_env()?;
    let _guard = init_logging(&log_config)?;

    info!(environment = %config.environment, "Configuration loaded");

    match cli.command {
        Commands::Serve => api::serve(config).await,
        Commands::Import(args) => import(config, args).await,
    }
}

async fn import(config: Config, args: ImportArgs) -> Result<()> {
    let started = Instant::now();

    let pool = db::create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let repository = Arc::new(PgFeiraLivreRepository::new(pool));
    let pipeline = ImportPipeline::new(repository, config.import.clone())?;

    info!(file = %args.file.display(), workers = config.import.workers, "Starting import");
    let summary = pipeline
        .import_file(&args.file)
        .await
        .with_context(|| format!("import of {} failed", args.file.display()))?;

    print!("{summary}");
    println!("Elapsed time: {:.2?}", started.elapsed());

    Ok(())
}
