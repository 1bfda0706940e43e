use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;

use crate::{config::Config, prelude::*, repo, sv};

pub struct Services<'a> {
  pub ota: sv::Catalog<repo::Store<'a>>,
}

/// Process-wide resources. The connection pool is created once here and
/// lent to every repository for the lifetime of the process.
pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
      .max_connections(config.db_max_connections)
      .connect_timeout(config.db_connect_timeout)
      .acquire_timeout(config.db_acquire_timeout)
      .sqlx_logging(false);

    let db = Database::connect(options)
      .await
      .context("Failed to connect to database")?;

    info!("Running migrations...");
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    Ok(Self { db, config })
  }

  pub fn sv(&self) -> Services<'_> {
    Services { ota: sv::Catalog::new(repo::Store::new(&self.db)) }
  }

  /// Releases the pool; in-flight requests holding a clone fail afterwards.
  pub async fn close(&self) -> anyhow::Result<()> {
    self.db.clone().close().await.context("Failed to close database")?;
    info!("Database connection closed");
    Ok(())
  }
}
