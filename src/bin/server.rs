use minibank::{Ledger, server::{self, AppConfig}};

use std::{path::PathBuf, sync::Arc};
use anyhow::Context;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// Path to a TOML config file; built-in defaults are used without one
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[clap(long, value_parser)]
    host: Option<String>,

    /// Port to bind, overriding the config file
    #[clap(short, long, value_parser)]
    port: Option<u16>,
}

impl Cli {
    fn app_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::read(path)?,
            None => AppConfig::default(),
        };
        if let Some(host) = &self.host {
            config.bind.host = host.clone();
        }
        if let Some(port) = self.port {
            config.bind.port = port;
        }
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // also installs the bridge that forwards `log` records
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Cli::parse();
    let config = args.app_config()?;
    let addr = config.socket_addr()?;

    let ledger = Arc::new(Ledger::from_seeds(config.accounts.clone()));
    info!("seeded {} accounts: {}", ledger.usernames().len(), ledger.usernames().join(", "));

    let app = server::router(ledger, &config.cors);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await
        .with_context(|| "server stopped unexpectedly")?;

    Ok(())
}
