use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use feedsnap::config::Settings;
use feedsnap::pipeline;

#[derive(Parser, Debug)]
#[command(
    name = "feedsnap",
    about = "Fetch configured RSS/Atom feeds and write the per-locale featured-post snapshot"
)]
struct Args {
    /// Directory containing per-locale i18n JSON files
    #[arg(long, value_name = "DIR")]
    i18n_dir: Option<PathBuf>,

    /// Output path for the JSON snapshot
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Restrict the run to specific locales (repeatable)
    #[arg(long = "locale", value_name = "CODE")]
    locales: Vec<String>,

    /// Per-attempt fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Maximum fetch attempts per feed
    #[arg(long, value_name = "N")]
    retries: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::default();
    if let Some(dir) = args.i18n_dir {
        settings.i18n_dir = dir;
    }
    if let Some(output) = args.output {
        settings.output_path = output;
    }
    if !args.locales.is_empty() {
        settings.locales = args.locales;
    }
    if let Some(secs) = args.timeout {
        settings.fetch_timeout = Duration::from_secs(secs);
    }
    if let Some(retries) = args.retries {
        settings.max_retries = retries;
    }

    let started = Instant::now();
    tracing::info!(locales = ?settings.locales, "Starting RSS snapshot build");

    // Per-feed failures are absorbed inside the pipeline; an error here means
    // the snapshot itself could not be produced.
    pipeline::run(&settings).await?;

    tracing::info!(
        output = %settings.output_path.display(),
        elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
        "Snapshot written"
    );
    Ok(())
}
