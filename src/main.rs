use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use curata::ai::client::OllamaClient;
use curata::config::{ModelConfig, OrganizeConfig, OrganizeMode, UnclassifiedPolicy};
use curata::pipeline::OrganizePipeline;

/// Organize a folder of files into categorized subfolders using a local model.
#[derive(Parser, Debug)]
#[command(name = "curata", version, about)]
struct Cli {
    /// Directory containing the files to organize (defaults to ~/Downloads)
    source: Option<PathBuf>,

    /// Destination root for the organized folder tree
    #[arg(long, short = 'd')]
    dest: PathBuf,

    /// How files are classified: by content or by filename groups
    #[arg(long, value_enum, default_value = "content")]
    mode: OrganizeMode,

    /// Report the operations that would run without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Suppress per-file progress output
    #[arg(long)]
    silent: bool,

    /// Append progress output to this file in addition to stdout
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Save the planned operations as JSON before executing
    #[arg(long)]
    plan_json: Option<PathBuf>,

    /// Similarity threshold for filename grouping (0.0 - 1.0)
    #[arg(long, default_value_t = OrganizeConfig::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Collision-suffix attempts per file before giving up on it
    #[arg(long, default_value_t = curata::execution::DEFAULT_COLLISION_CAP)]
    collision_cap: u32,

    /// What to do with files the model could not classify
    #[arg(long, value_enum, default_value = "report")]
    unclassified: UnclassifiedPolicy,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let Some(source) = cli.source.or_else(dirs::download_dir) else {
        eprintln!("curata: no source given and no Downloads directory found");
        return ExitCode::FAILURE;
    };
    let config = OrganizeConfig {
        source,
        destination: cli.dest,
        mode: cli.mode,
        dry_run: cli.dry_run,
        silent: cli.silent,
        log_file: cli.log_file,
        plan_json: cli.plan_json,
        threshold: cli.threshold,
        collision_cap: cli.collision_cap,
        unclassified: cli.unclassified,
        text_preview_bytes: OrganizeConfig::DEFAULT_TEXT_PREVIEW_BYTES,
    };

    let client = match OllamaClient::new(&ModelConfig::from_env()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("curata: {err}");
            return ExitCode::FAILURE;
        }
    };

    match OrganizePipeline::new(&config, &client).run().await {
        Ok(summary) => {
            println!(
                "{} scanned, {} planned, {} created, {} would create, {} failed, {} unclassified",
                summary.scanned,
                summary.planned,
                summary.created,
                summary.would_create,
                summary.failed,
                summary.unclassified
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("curata: {err}");
            ExitCode::FAILURE
        }
    }
}
