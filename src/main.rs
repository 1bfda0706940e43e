use std::sync::Arc;

use catalog::{
  config::Config,
  plugins::{self, server},
  prelude::*,
  state::AppState,
};
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "catalog=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;
  info!(
    "Starting OTA catalog v{} in {} mode",
    env!("CARGO_PKG_VERSION"),
    config.environment
  );

  let app = Arc::new(AppState::new(config).await?);

  let handles =
    plugins::App::new().register(server::Plugin).run(app.clone());

  tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
  info!("Shutting down...");

  for handle in handles {
    handle.abort();
    let _ = handle.await;
  }

  app.close().await
}
