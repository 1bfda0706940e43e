mod handlers;
pub mod response;

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
  Router,
  routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

/// Catalog routes without rate limiting.
pub fn router(app: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/v1/otas", post(handlers::create).get(handlers::list))
    .route("/api/v1/otas/get", get(handlers::get))
    .route("/api/v1/otas/latest", get(handlers::latest))
    .route(
      "/api/v1/otas/{id}",
      put(handlers::update).delete(handlers::delete),
    )
    .with_state(app)
}

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let limiter = governor_conf.limiter().clone();
    let addr = app.config.addr()?;

    let router = router(app)
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP Server listening on {addr}");

    let limiter = async {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        limiter.retain_recent();
      }
    };

    let server = async {
      axum::serve(listener, router).await.context("Axum server error")
    };

    tokio::select! {
      result = server => {
        match &result {
          Ok(_) => info!("Server stopped gracefully"),
          Err(err) => error!("Server stopped with error: {err}"),
        }
        result
      }
      _ = limiter => {
        error!("Rate limiter cleaner stopped unexpectedly!");
        Ok(())
      }
    }
  }
}
