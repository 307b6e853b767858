mod args;
mod input;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tds_upload_core::{
    load_config, load_default_config, validate_config, Config, EventBroadcaster,
    ExtractionEndpoint, HttpExtractionEndpoint, UploadOrchestrator,
};

use args::{CliArgs, USAGE};

/// Config file picked up from the working directory when nothing else is given
const DEFAULT_CONFIG_FILE: &str = "tds-upload.toml";

/// Environment variable naming the config file
const CONFIG_ENV: &str = "TDS_UPLOAD_CONFIG";

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run one upload cycle. Returns whether it succeeded.
async fn run() -> Result<bool> {
    // Logs go to stderr; stdout carries the user-facing lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(true);
    }

    let mut config = resolve_config(args.config.clone())?;
    if let Some(dir) = &args.output {
        config.output.directory = dir.clone();
    }
    validate_config(&config).context("Configuration validation failed")?;
    info!("Extraction service: {}", config.endpoint.base_url);

    let endpoint = HttpExtractionEndpoint::new(config.endpoint.clone())
        .context("Failed to create extraction client")?;

    if args.check {
        let health = endpoint
            .health()
            .await
            .context("Extraction service status check failed")?;
        if !health.is_ok() {
            bail!("Extraction service reports status '{}'", health.status);
        }
        info!("Extraction service is up");
    }

    let candidates = input::collect_candidates(&args.paths).await?;

    let events = EventBroadcaster::default();
    let renderer = render::spawn(events.subscribe());

    let mut orchestrator = UploadOrchestrator::new(&config, Arc::new(endpoint)).with_events(events);
    orchestrator.select_files(candidates);

    let outcome = orchestrator.submit().await;
    let saved = if outcome.is_success() {
        Some(
            orchestrator
                .download(None)
                .await
                .context("Failed to save result")?,
        )
    } else {
        None
    };
    let view = orchestrator.view().await;

    // Closes the event channel so the renderer drains and exits
    drop(orchestrator);
    if let Err(e) = renderer.await {
        error!("Event renderer failed: {}", e);
    }

    if let Some(status) = &view.status {
        println!("{}", status.text);
    }
    if let Some(path) = saved {
        println!("Saved {}", path.display());
    }

    Ok(outcome.is_success())
}

/// `--config`, then `$TDS_UPLOAD_CONFIG`, then `./tds-upload.toml` if present,
/// else defaults with environment overrides.
fn resolve_config(explicit: Option<PathBuf>) -> Result<Config> {
    let path = explicit
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
        .or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });

    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => {
            info!("No config file, using defaults");
            load_default_config().context("Failed to load default config")
        }
    }
}
