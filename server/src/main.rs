use anyhow::Result;
use axum::Router;
use clap::Parser;
use engine::Config;
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// JSON settings file (defaults to $CONF_JSON_PATH, then built-in defaults)
    #[arg(long)]
    config: Option<String>,
    /// Directory of CSV data files
    #[arg(long)]
    data_dir: Option<String>,
    /// Address to bind, e.g. 0.0.0.0:8080
    #[arg(long)]
    addr: Option<String>,
    /// Maximum documents returned per search
    #[arg(long)]
    max_results: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = args.data_dir {
        config.engine.index_data_dir = dir.into();
    }
    if let Some(addr) = args.addr {
        config.server_address = addr;
    }
    if let Some(max) = args.max_results {
        config.engine.max_search_results = max;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(filter).init();

    let app: Router = build_app(&config)?;
    let addr: SocketAddr = config.server_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
