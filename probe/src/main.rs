//! DisasterScope probe
//!
//! Checks the prediction server and prints the dashboard for one point.
//!
//! Usage:
//!   disasterscope-probe --lat 12.34 --lng 56.78 --base-url http://127.0.0.1:5000

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use disasterscope_probe::{Prediction, Probe, config};
use disasterscope_shared::Hazard;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "disasterscope-probe",
    about = "Query a DisasterScope prediction server from the command line"
)]
struct Args {
    /// Latitude in degrees, -90..=90
    #[arg(long, allow_hyphen_values = true, default_value_t = config::DEFAULT_LATITUDE)]
    lat: f64,

    /// Longitude in degrees, -180..=180
    #[arg(long, allow_hyphen_values = true, default_value_t = config::DEFAULT_LONGITUDE)]
    lng: f64,

    /// Server base URL (falls back to DISASTERSCOPE_API_BASE)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Request timeout in seconds (falls back to PROBE_HTTP_TIMEOUT_SECS)
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Only check /health
    #[arg(long)]
    health_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let base = args
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(config::api_base);
    let timeout = args
        .timeout_secs
        .filter(|secs| *secs > 0)
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(config::http_timeout);

    let probe = Probe::new(base, timeout, config::connect_timeout())
        .context("failed to build HTTP client")?;

    let health = probe.health_status().await;
    if disasterscope_shared::status::probe_is_up(health) {
        info!(base = probe.base(), status = ?health, "server is up");
    } else {
        warn!(base = probe.base(), status = ?health, "server is down");
    }
    if args.health_only {
        anyhow::ensure!(
            disasterscope_shared::status::probe_is_up(health),
            "server at {} is not healthy",
            probe.base()
        );
        return Ok(());
    }

    info!(latitude = args.lat, longitude = args.lng, "requesting prediction");
    let prediction = probe
        .predict(args.lat, args.lng)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message(probe.base())))
        .context("prediction failed")?;

    report(&prediction);
    Ok(())
}

fn report(prediction: &Prediction) {
    let view = &prediction.view;
    for hazard in Hazard::ALL {
        let bar = view.bar(hazard);
        info!(
            hazard = hazard.label(),
            probability = bar.label.as_deref().unwrap_or("-"),
            color = bar.fill_css(),
            glow = bar.state.glow,
            level = bar.badge.as_ref().map(|b| b.text.as_str()).unwrap_or("-"),
            nearby = %bar.count_text,
            "bar"
        );
        if let Some(message) = &bar.message {
            info!(hazard = hazard.label(), "{message}");
        }
    }

    if let Some(summary) = &view.summary {
        if let Some(headline) = &summary.headline {
            info!(class = %headline.class_name, "{}", headline.text);
        }
        if let Some(message) = &summary.message {
            info!("{message}");
        }
    }
    if let Some(location) = &view.location {
        info!("📍 {location}");
    }
    info!(tint = view.tint.css(), "dashboard");
    if let Some(timestamp) = &prediction.result.timestamp {
        info!(timestamp = %timestamp, "server timestamp");
    }
}
