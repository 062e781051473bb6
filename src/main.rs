use mimalloc::MiMalloc;
use scanmetrics::config::AppConfig;
use scanmetrics::{routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanmetrics=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(
        host = %listener.local_addr()?,
        projects = ?config.projects,
        results_dir = %config.results_dir.display(),
        stand_in_enabled = config.stand_in_enabled,
        "Starting scanmetrics API server"
    );

    let app = routes::router(AppState::from_config(config));

    axum::serve(listener, app).await?;

    Ok(())
}
