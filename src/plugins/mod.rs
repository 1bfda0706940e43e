pub mod server;

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::sleep};
use tracing::{error, info, warn};

use crate::state::AppState;

#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct App {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  /// Spawns a supervisor per plugin that restarts it after a crash. Abort the
  /// returned handles to stop them.
  pub fn run(self, app: Arc<AppState>) -> Vec<JoinHandle<()>> {
    self
      .plugins
      .into_iter()
      .map(|plugin| tokio::spawn(supervise(plugin, app.clone())))
      .collect()
  }
}

/// Aborts the plugin task when the supervisor itself is aborted.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
  fn drop(&mut self) {
    self.0.abort();
  }
}

async fn supervise(plugin: Arc<dyn Plugin>, app: Arc<AppState>) {
  let name = plugin.name();
  info!("SYSTEM: Service `{name}` initialized");

  loop {
    let app = app.clone();
    let plugin = plugin.clone();

    let mut handle =
      AbortOnDrop(tokio::spawn(async move { plugin.start(app).await }));

    match (&mut handle.0).await {
      Ok(Ok(())) => {
        warn!("Service `{name}` stopped unexpectedly (Ok).");
      }
      Ok(Err(err)) => {
        error!("Service `{name}` crashed with error: {err:#}.");
      }
      Err(join_err) => {
        if join_err.is_cancelled() {
          info!("Service `{name}` shutdown.");
          break;
        } else {
          error!("Service `{name}` PANICKED!");
        }
      }
    }

    sleep(Duration::from_secs(5)).await;
    info!("SYSTEM: Restarting service `{name}`...");
  }
}
