//! One-shot scan runner for local use.
//!
//! Usage: `cargo run --bin scan -- <snyk|deepsource> [project|--all]`
//!
//! Reads the same environment configuration as the API server (including
//! .env) and prints the outcome as pretty JSON.

use anyhow::{anyhow, bail, Context};
use scanmetrics::config::AppConfig;
use scanmetrics::models::tool::ScannerTool;
use scanmetrics::routes::scans::DEFAULT_PROJECT;
use scanmetrics::services::scan::ScanOrchestrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "scanmetrics=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let tool: ScannerTool = args
        .next()
        .ok_or_else(|| anyhow!("usage: scan <snyk|deepsource> [project|--all]"))?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let target = args.next();
    if args.next().is_some() {
        bail!("usage: scan <snyk|deepsource> [project|--all]");
    }

    let orchestrator = ScanOrchestrator::from_config(tool, &AppConfig::from_env());

    let success = match target.as_deref() {
        Some("--all") => {
            let report = orchestrator.scan_all().await;
            print_json(&report)?;
            report.is_success()
        }
        project => {
            let outcome = orchestrator
                .scan_project(project.unwrap_or(DEFAULT_PROJECT))
                .await;
            print_json(&outcome)?;
            outcome.success
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize scan output")?;
    println!("{text}");
    Ok(())
}
