//! Process configuration read from the environment

use std::{env, net::SocketAddr, str::FromStr};

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub host: String,
  pub port: u16,
  pub environment: String,
  /// Upper bound the HTTP layer applies to `limit`
  pub max_page_size: i64,
  pub db_max_connections: u32,
  pub db_connect_timeout: Duration,
  pub db_acquire_timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: String::from("sqlite:catalog.db?mode=rwc"),
      host: String::from("0.0.0.0"),
      port: 8080,
      environment: String::from("development"),
      max_page_size: 100,
      db_max_connections: 10,
      db_connect_timeout: Duration::from_secs(5),
      db_acquire_timeout: Duration::from_secs(5),
    }
  }
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match env::var(key) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .with_context(|| format!("invalid {key}: `{raw}`")),
    Err(_) => Ok(default),
  }
}

fn duration(key: &str, default: Duration) -> anyhow::Result<Duration> {
  match env::var(key) {
    Ok(raw) => humantime::parse_duration(raw.trim())
      .with_context(|| format!("invalid {key}: `{raw}`")),
    Err(_) => Ok(default),
  }
}

impl Config {
  /// Reads `.env` (if any) and then the process environment.
  pub fn from_env() -> anyhow::Result<Self> {
    dotenvy::dotenv().ok();

    let default = Self::default();
    let config = Self {
      database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),
      host: env::var("HOST").unwrap_or(default.host),
      port: parsed("PORT", default.port)?,
      environment: env::var("ENVIRONMENT").unwrap_or(default.environment),
      max_page_size: parsed("MAX_PAGE_SIZE", default.max_page_size)?,
      db_max_connections: parsed(
        "DB_MAX_CONNECTIONS",
        default.db_max_connections,
      )?,
      db_connect_timeout: duration(
        "DB_CONNECT_TIMEOUT",
        default.db_connect_timeout,
      )?,
      db_acquire_timeout: duration(
        "DB_ACQUIRE_TIMEOUT",
        default.db_acquire_timeout,
      )?,
    };

    if config.max_page_size <= 0 {
      anyhow::bail!("MAX_PAGE_SIZE must be positive");
    }

    Ok(config)
  }

  pub fn addr(&self) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", self.host, self.port);
    addr.parse().with_context(|| format!("invalid listen address `{addr}`"))
  }
}
