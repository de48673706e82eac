use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cervihope::config::Config;
use cervihope::db::RecordStore;
use cervihope::service::credential_loader;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        secrets_path = %cfg.basic.secrets_path.display(),
        records_path = %cfg.storage.records_path.display(),
        upload_dir = %cfg.storage.upload_dir.display(),
        loglevel = %cfg.basic.loglevel,
    );

    // Both are fatal when unreadable.
    let credentials = credential_loader::load_secrets(&cfg.basic.secrets_path)?;
    let records = RecordStore::load_all(cfg.storage.records_path.clone())?;
    tokio::fs::create_dir_all(&cfg.storage.upload_dir).await?;

    let state = cervihope::AppState::new(&cfg, credentials, records)?;
    let app = cervihope::cervihope_router(state, cfg.storage.max_upload_bytes);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
