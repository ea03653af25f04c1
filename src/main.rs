use anyhow::Context;
use mediaspec::config::Config;
use mediaspec::MediaSpec;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "mediaspec.toml";

#[derive(Serialize)]
struct Negotiated<'a> {
    answerer: &'a MediaSpec,
    offerer: &'a MediaSpec,
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    // Load configuration
    let config = Config::load(&path).with_context(|| format!("loading {}", path))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid logging level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Configuration loaded from {}", path);
    info!("Answerer: {}", config.answerer);
    info!("Offerer: {}", config.offerer);

    let (answerer, offerer) = match MediaSpec::negotiate(&config.answerer, &config.offerer) {
        Ok(pair) => pair,
        Err(e) => {
            warn!("{}", e);
            return Err(e.into());
        }
    };

    let output = serde_json::to_string_pretty(&Negotiated {
        answerer: &answerer,
        offerer: &offerer,
    })?;
    println!("{}", output);

    Ok(())
}
