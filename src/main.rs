//! kube-cert-ingress
//!
//! Keeps a single ingress routing `/.well-known/acme-challenge` of every
//! kube-cert-manager handled ingress to the kube-cert-manager service.
//!
//! ```bash
//! kube-cert-ingress --namespace kube-certificates --interval 10s
//! RUST_LOG=debug kube-cert-ingress
//! ```

use clap::Parser;
use kube_cert_ingress::config::{Config, VERSION};
use kube_cert_ingress::server::Server;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        class = %config.kube_cert_class,
        class_label = %config.class_label(),
        provider = %config.kube_cert_provider_annotation,
        namespace = %config.namespace,
        version = VERSION,
        "starting the kube-cert-ingress controller"
    );

    let server = Server::new(config)
        .await
        .map_err(|e| anyhow::anyhow!("unable to create controller: {e}"))?;

    tokio::select! {
        result = server.serve() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("received shutdown signal");
        }
    }

    Ok(())
}
