// ABOUTME: Entry point for the nimbus CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use nimbus::config::{self, Config};
use nimbus::error::Result;
use nimbus::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli, output).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    let cwd = env::current_dir()?;

    if let Commands::Init { region, force } = &cli.command {
        return config::init_config(&cwd, region.as_deref(), *force);
    }

    let config = Config::discover(&cwd)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Images => commands::images(&config, &output).await,
        Commands::ImageFiles { image_id } => {
            commands::image_files(&config, &image_id, &output).await
        }
        Commands::RemoveImage {
            image_id,
            force,
            files_only,
            max_passes,
        } => {
            commands::remove_image(&config, &image_id, force, files_only, max_passes, output).await
        }
        Commands::Instances { running } => commands::instances(&config, running, &output).await,
        Commands::Launch {
            image_id,
            instance_type,
            count,
            key_name,
            group,
            zone,
        } => {
            commands::launch(
                &config,
                &image_id,
                instance_type,
                count,
                key_name,
                group,
                zone,
                output,
            )
            .await
        }
        Commands::Terminate { instance_ids } => {
            commands::terminate(&config, instance_ids, &output).await
        }
        Commands::Groups => commands::groups(&config, &output).await,
        Commands::EnsureGroup {
            name,
            description,
            no_ssh,
            group_traffic,
        } => {
            commands::ensure_group(&config, &name, &description, !no_ssh, group_traffic, &output)
                .await
        }
        Commands::Volumes => commands::volumes(&config, &output).await,
        Commands::Buckets => commands::buckets(&config, &output).await,
        Commands::ShowBucket { bucket } => commands::show_bucket(&config, &bucket, &output).await,
    }
}
