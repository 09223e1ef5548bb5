mod app;
mod catalog;
mod commands;
mod config;
mod event;
mod logging;
mod store;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::catalog::ApiClient;
use crate::store::ProductStore;

#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(about = "A terminal storefront manager for a product catalog API")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./shelf.yaml or $XDG_CONFIG_HOME/shelf/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the API, overrides config and SHELF_API_URL
  #[arg(long)]
  api_url: Option<String>,

  /// Run one operation and exit instead of opening the UI
  #[command(subcommand)]
  command: Option<commands::Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration, then apply flag and environment overrides
  let config = config::Config::load(args.config.as_deref())?
    .with_overrides(args.api_url, |name| std::env::var(name).ok())?;

  let _log_guard = logging::init(&config.logging)?;

  let client = ApiClient::new(&config)?;
  let title = config.title.clone().unwrap_or_else(|| client.host());
  info!(api = %config.api.url, "starting shelf");

  let store = Arc::new(ProductStore::new(client));

  match args.command {
    Some(command) => {
      let mut stdout = std::io::stdout().lock();
      commands::run(command, &store, &mut stdout).await
    }
    None => {
      let events = event::EventHandler::new(Duration::from_millis(250));
      let mut app = app::App::new(store, title, events.sender());
      app.run(events).await
    }
  }
}
