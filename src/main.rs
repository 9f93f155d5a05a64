//! DigitalOcean Exporter binary.
//!
//! Serves a Prometheus scrape endpoint describing the inventory of one
//! DigitalOcean account.

use anyhow::Context;
use clap::Parser;
use digitalocean_exporter::{
    register_all, start_web_server, BuildInfo, DigitalOceanClient, ExporterConfig, Registry,
    Settings, START_TIME,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    // Pin the start time before anything else runs.
    let start_time = *START_TIME;

    let config = ExporterConfig::parse();

    if let Err(e) = init_logging(config.debug) {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let settings = match config.validate() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(settings, start_time).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    let default_directive = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting global tracing subscriber")?;

    Ok(())
}

async fn run(settings: Settings, start_time: chrono::DateTime<chrono::Utc>) -> anyhow::Result<()> {
    let build = BuildInfo::current();
    info!(
        version = %build.version,
        revision = %build.revision,
        build_date = %build.build_date,
        rust_version = %build.rust_version,
        "starting digitalocean_exporter"
    );

    let api = Arc::new(
        DigitalOceanClient::new(settings.token).context("creating DigitalOcean API client")?,
    );

    let mut registry = Registry::new();
    register_all(&mut registry, api, settings.timeout, build, start_time)
        .context("registering collectors")?;
    info!(
        collectors = ?registry.collector_names(),
        timeout_ms = settings.timeout.as_millis() as u64,
        "collectors registered"
    );

    start_web_server(settings.web, Arc::new(registry))
        .await
        .context("running web server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitalocean_exporter::{DEFAULT_TIMEOUT_MS, DEFAULT_WEB_PATH};

    #[test]
    fn test_cli_parsing() {
        let config = ExporterConfig::try_parse_from([
            "digitalocean_exporter",
            "--digitalocean-token",
            "abc",
            "--web-path",
            "/scrape",
        ])
        .unwrap();
        assert_eq!(config.digitalocean_token, "abc");
        assert_eq!(config.web_path, "/scrape");
    }

    #[test]
    fn test_default_values() {
        let config =
            ExporterConfig::try_parse_from(["digitalocean_exporter", "--digitalocean-token", "abc"])
                .unwrap();
        assert_eq!(config.http_timeout, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.web_path, DEFAULT_WEB_PATH);
    }
}
