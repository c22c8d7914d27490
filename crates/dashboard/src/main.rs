//! BizPub Dashboard
//!
//! Serves the exploration page and its JSON/SVG endpoints.
//! Handles:
//! - Dataset loading and caching
//! - Exploration and chart rendering
//! - Observability (logging, metrics)

mod handlers;
mod render;

use axum::{routing::get, Router};
use bizpub_common::{
    config::AppConfig,
    metrics::{self, LATENCY_BUCKETS},
    DatasetCache,
};
use bizpub_explore::ExploreOptions;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub datasets: Arc<DatasetCache>,
    pub options: Arc<ExploreOptions>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let datasets = DatasetCache::new(&config.dataset);
        let options = ExploreOptions::from(&config.charts);
        Self {
            config: Arc::new(config),
            datasets: Arc::new(datasets),
            options: Arc::new(options),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(&config);

    info!(
        service = %config.observability.service_name,
        "Starting BizPub Dashboard v{}",
        bizpub_common::VERSION
    );

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .set_buckets_for_metric(Matcher::Suffix("duration_seconds".to_string()), LATENCY_BUCKETS)?
            .with_http_listener(metrics_addr)
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    let state = AppState::new(config);

    // Warm the dataset cache; a missing file is reported by /ready
    match state.datasets.get().await {
        Ok(dataset) => info!(
            path = %state.datasets.path().display(),
            rows = dataset.len(),
            journals = dataset.journals().len(),
            "Dataset ready"
        ),
        Err(e) => warn!(
            path = %state.datasets.path().display(),
            error = %e,
            "Dataset not loaded at startup"
        ),
    }

    let addr = state.config.bind_address();
    let app = create_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Create the main application router
pub(crate) fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/options", get(handlers::options::options))
        .route("/explore", get(handlers::explore::explore))
        .route("/explore/chart.svg", get(handlers::explore::chart_svg));

    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CompressionLayer::new());

    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .nest("/api", api_routes)
        .layer(layers)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
