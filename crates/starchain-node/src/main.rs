//! Application entrypoint and state wiring.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use starchain_ledger::{Registrar, RegistrarConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
struct NodeConfig {
    /// Socket to listen on (`STARCHAIN_ADDR`).
    bind_addr: SocketAddr,
    /// Challenge validity window (`STARCHAIN_CHALLENGE_WINDOW_SECS`).
    validity_window_secs: i64,
}

impl NodeConfig {
    fn from_env() -> anyhow::Result<Self> {
        let bind_addr = match std::env::var("STARCHAIN_ADDR") {
            Ok(raw) => raw
                .parse()
                .context("STARCHAIN_ADDR is not a socket address")?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        let validity_window_secs = match std::env::var("STARCHAIN_CHALLENGE_WINDOW_SECS") {
            Ok(raw) => raw
                .parse()
                .context("STARCHAIN_CHALLENGE_WINDOW_SECS is not a number")?,
            Err(_) => RegistrarConfig::default().validity_window_secs,
        };

        Ok(Self {
            bind_addr,
            validity_window_secs,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NodeConfig::from_env()?;
    let registrar = Arc::new(Registrar::new(RegistrarConfig {
        validity_window_secs: config.validity_window_secs,
    }));

    let app = routes::router(registrar);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "star registry listening");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
