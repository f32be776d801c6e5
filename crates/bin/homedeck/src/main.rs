//! # homedeck: terminal dashboard
//!
//! Composition root for the client side: polls the API server, prints the
//! dashboard on every change, and sends the commands typed on stdin.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber (on stderr, so it does not garble the
//!   dashboard)
//! - Build the remote source, the terminal view and the synchronizer
//! - Poll in the background until `quit`, end of input, or Ctrl-C
//!
//! ## Dependency rule
//! Wiring only. Device semantics live in `homedeck-domain` and the
//! synchronizer in `homedeck-app`.

mod config;
mod dispatch;

use std::sync::Arc;

use homedeck_adapter_dashboard_terminal::{DashboardCommand, HELP, TerminalView};
use homedeck_adapter_http_reqwest::Config as RemoteConfig;
use homedeck_app::sync::{DeviceStore, Synchronizer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::dispatch::dispatch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    let source = RemoteConfig {
        base_url: config.remote.api_url.clone(),
        timeout: config.request_timeout(),
    }
    .build()?;
    tracing::info!(api = %source.base_url(), "starting dashboard");

    let sync = Arc::new(Synchronizer::new(
        source,
        TerminalView::stdout(),
        DeviceStore::new(),
    ));
    let poll = sync.schedule_refresh(config.poll_interval());

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<DashboardCommand>() {
            Ok(DashboardCommand::Quit) => break,
            Ok(command) => {
                if let Some(reply) = dispatch(&sync, command).await {
                    println!("{reply}");
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    poll.cancel().await;
    tracing::info!("dashboard stopped");
    Ok(())
}
