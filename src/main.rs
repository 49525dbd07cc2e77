// src/main.rs
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod charts;
mod config;
mod csv_handler;
mod data_provider;
mod data_types;
mod server;
mod ui;
mod view;
mod workbook_handler;

use config::Config;
use data_provider::DataProvider;
use data_types::DataSource;
use server::AppContext;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let source = DataSource::from_path(&config.data_path);
    if !source.path().exists() {
        warn!(
            path = %source.path().display(),
            "cost data not found, built-in figures will be shown"
        );
    }
    info!(version = VERSION, source = ?source, "starting cost dashboard");

    let app = server::router(AppContext::new(DataProvider::new(source)));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
