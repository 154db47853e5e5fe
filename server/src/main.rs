//! Page server for the racing frontend.
//!
//! Serves the built wasm bundle and the page shell for `/` and `/race`. Races
//! themselves are run by the separate race service the frontend talks to.

mod config;

use axum::{routing::get, Router};
use config::ServerConfig;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn router(config: &ServerConfig) -> Router {
    let shell = ServeFile::new(config.index_file());
    Router::new()
        .route("/health", get(health))
        .route_service("/", shell.clone())
        .route_service("/race", shell.clone())
        // Built assets; unknown paths get the page shell.
        .fallback_service(ServeDir::new(&config.assets_dir).fallback(shell))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!(
        "Serving {} on http://{}",
        config.assets_dir.display(),
        config.addr()
    );

    axum::serve(listener, router(&config)).await?;
    Ok(())
}
