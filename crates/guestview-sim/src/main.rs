//! guestview-sim: headless host for the guest event router.
//!
//! Builds a registry from config, replays a JSON scenario of guest and
//! embedder actions against the in-memory host runtime, and prints every
//! delivered message as a JSON line on stdout.

mod cli;
mod scenario;

use guestview::GuestRegistry;
use guestview_common::{GuestViewError, Result};
use guestview_config::GuestViewConfig;
use tracing_subscriber::EnvFilter;

use crate::scenario::{parse_scenario, ScenarioRunner};

fn load_config(args: &cli::Args) -> GuestViewConfig {
    let loaded = match &args.config {
        Some(path) => guestview_config::load_from_path(path),
        None => guestview_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("guestview-sim: config load failed, using defaults: {e}");
        GuestViewConfig::default()
    })
}

fn init_logging(args: &cli::Args, config: &GuestViewConfig) {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or_else(|| config.logging.level.as_directive());
    let fallback = format!("guestview={level},guestview_sim={level}");

    let filter = if args.log_level.is_some() {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &cli::Args, config: &GuestViewConfig) -> Result<()> {
    let content = std::fs::read_to_string(&args.scenario)?;
    let steps = parse_scenario(&content)?;
    tracing::info!(steps = steps.len(), path = %args.scenario.display(), "scenario loaded");

    let mut runner = ScenarioRunner::new(GuestRegistry::from_config(config));
    let deliveries = runner.run(&steps)?;
    for delivery in &deliveries {
        let line = serde_json::to_string(delivery)
            .map_err(|e| GuestViewError::Other(format!("failed to encode delivery: {e}")))?;
        println!("{line}");
    }

    tracing::info!(
        delivered = deliveries.len(),
        still_bound = runner.registry().len(),
        "scenario complete"
    );
    runner.registry().deregister_all();
    Ok(())
}

fn main() {
    let args = cli::parse();
    let config = load_config(&args);
    init_logging(&args, &config);

    tracing::debug!(config = %guestview_config::config_to_json(&config), "effective config");

    if let Err(e) = run(&args, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
