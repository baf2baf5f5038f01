use anyhow::{Context, Result};
use contrib_graph::client::GraphQlClient;
use contrib_graph::config::Config;
use contrib_graph::render::render_with_scale;
use contrib_graph::storage::OutputStorage;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // --- CONFIGURATION ---
    // Validation and the token check both happen before any network call
    let config = Config::load().context("loading configuration")?;
    let settings = config.validate()?;
    let token = config.token()?;

    let client = GraphQlClient::new(&config.endpoint, &token)?;
    let calendar = client
        .fetch_calendar(&config.login)
        .await
        .with_context(|| format!("fetching contribution calendar for {}", config.login))?;

    let markup = render_with_scale(&calendar, &settings.palette, &settings.scale, &settings.render);
    OutputStorage::save(&config.output, &markup)
        .with_context(|| format!("writing {}", config.output.display()))?;

    info!(path = %config.output.display(), bytes = markup.len(), "image written");
    println!(
        "Wrote {} ({} contributions)",
        config.output.display(),
        calendar.total
    );
    Ok(())
}
