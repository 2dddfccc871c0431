//! Fitness Tracker dashboard
//!
//! Loads configuration, wires the engine against the preview sample source
//! and the configured metric store, refreshes today's totals and prints the
//! dashboard and the current week as JSON.

use anyhow::Result;
use chrono::Local;
use fitness_tracker_engine::{config, sources::FixtureSampleSource, state::AppState, store};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration first, logging settings live there
    let config = config::AppConfig::load()?;
    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Fitness Tracker dashboard"
    );

    let now = Local::now().fixed_offset();
    let store = store::open(&config.store).await?;
    let source = Arc::new(FixtureSampleSource::preview(now.date_naive(), *now.offset()));
    let state = AppState::new(config, store, source).await?;

    if let Err(err) = state.tracker.refresh_today(now).await {
        warn!(error = %err, recovery = ?err.recovery(), "Showing last saved totals");
    }

    let dashboard = state.dashboard_for_user(now).await?;
    let week = state.current_week(now).await?;

    let output = json!({
        "dashboard": dashboard,
        "week": week,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(logging: &config::LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match &logging.filter {
            Some(filter) => filter.as_str().into(),
            None if config::AppConfig::is_production() => "fitness_tracker_engine=info".into(),
            None => "fitness_tracker_engine=debug".into(),
        }
    });

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if logging.json || config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
