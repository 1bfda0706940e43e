//! Fills the catalog with sample launcher builds. Re-running it refreshes
//! the rows in place instead of duplicating them.

use catalog::{
  config::Config, model::NewOta, prelude::*, repo::Store, state::AppState,
};
use tracing_subscriber::EnvFilter;

fn sample(
  app_id: &str,
  version_name: &str,
  version_code: i32,
  release_notes: &str,
  path: &str,
) -> NewOta {
  NewOta {
    id: None,
    app_id: app_id.into(),
    version_name: version_name.into(),
    version_code,
    release_notes: Some(release_notes.into()),
    url: format!("https://storage.example.com/yapindo/{path}/app.apk"),
  }
}

fn samples() -> Vec<NewOta> {
  const LAUNCHER: &str = "com.yapindo.launcher";
  const PRO: &str = "com.yapindo.launcher.pro";

  vec![
    sample(
      LAUNCHER,
      "1.0.0",
      100,
      "Initial release of the Yapindo Launcher app",
      "launcher/v1.0.0",
    ),
    sample(
      LAUNCHER,
      "1.1.0",
      110,
      "Bug fixes and performance improvements",
      "launcher/v1.1.0",
    ),
    sample(
      LAUNCHER,
      "1.2.0",
      120,
      "Added new features:\n- Dark mode\n- Push notifications\n- Improved UI",
      "launcher/v1.2.0",
    ),
    sample(
      PRO,
      "1.0.0",
      100,
      "Initial release of the Yapindo Launcher Pro app",
      "launcher-pro/v1.0.0",
    ),
    sample(
      PRO,
      "1.0.1",
      101,
      "Hotfix for authentication issues",
      "launcher-pro/v1.0.1",
    ),
  ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seed=info,catalog=info,sea_orm=warn".into()),
    )
    .init();

  let app = AppState::new(Config::from_env()?).await?;
  let store = Store::new(&app.db);

  info!("Connected to database, starting seeding...");
  for new in samples() {
    let label = format!("{} (v{})", new.app_id, new.version_name);
    match store.upsert(new).await {
      Ok(ota) => info!("Seeded {label} with ID: {}", ota.id),
      Err(err) => warn!("Failed to seed {label}: {err}"),
    }
  }
  info!("Seeding completed!");

  app.close().await
}
