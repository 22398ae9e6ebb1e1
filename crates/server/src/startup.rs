use std::{future::Future, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StoreConfig};
use service::toys::{InMemoryToyStore, ToyRepository};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the store once for the process; seeded unless the config opts out.
pub fn build_store(cfg: &StoreConfig) -> Arc<InMemoryToyStore> {
    let store = if cfg.seed {
        InMemoryToyStore::seeded(cfg.id_strategy)
    } else {
        InMemoryToyStore::new(cfg.id_strategy)
    };
    info!(id_strategy = ?store.strategy(), seeded = cfg.seed, "toy store ready");
    store
}

/// Router with a freshly built store.
pub fn build_app(cfg: &AppConfig) -> Router {
    let toys: Arc<dyn ToyRepository> = build_store(&cfg.store);
    routes::build_router(AppState::new(toys), build_cors())
}

/// Bind `host:port`; host may be a name (`localhost`) or a bare IPv4/IPv6 literal.
pub async fn bind_listener(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind {}: {e}", cfg.bind_addr()))?;
    Ok(listener)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = bind_listener(&cfg.server).await?;
    serve_until(listener, build_app(&cfg), shutdown).await
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "toy store listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
