use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::response::{Envelope, Pagination};
use crate::{
  entity::Ota,
  model::{Lookup, NewOta, OtaUpdate},
  prelude::*,
  state::AppState,
};

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>)>;

fn ok<T>(message: &str, data: T) -> Reply<T> {
  Ok((StatusCode::OK, Json(Envelope::success(StatusCode::OK, message, data))))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T> {
  match payload {
    Ok(Json(body)) => Ok(body),
    Err(rejection) => {
      debug!("Rejected request body: {rejection}");
      Err(Error::validation("invalid request body"))
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct OtaBody {
  pub app_id: String,
  pub version_name: String,
  pub version_code: i32,
  #[serde(default)]
  pub release_notes: Option<String>,
  pub url: String,
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  payload: Result<Json<NewOta>, JsonRejection>,
) -> Reply<Ota> {
  let ota = app.sv().ota.create(body(payload)?).await?;

  let envelope =
    Envelope::success(StatusCode::CREATED, "OTA created successfully", ota);
  Ok((StatusCode::CREATED, Json(envelope)))
}

#[derive(Debug, Default, Deserialize)]
pub struct GetQuery {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub app_id: String,
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  Query(query): Query<GetQuery>,
) -> Reply<Lookup> {
  let found = app.sv().ota.get_by_identifier(&query.id, &query.app_id).await?;
  ok("OTA retrieved successfully", found)
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestQuery {
  #[serde(default)]
  pub app_id: String,
}

pub async fn latest(
  State(app): State<Arc<AppState>>,
  Query(query): Query<LatestQuery>,
) -> Reply<Ota> {
  let ota = app.sv().ota.latest(&query.app_id).await?;
  ok("Latest OTA retrieved successfully", ota)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
  #[serde(default)]
  pub cursor: String,
  pub limit: Option<String>,
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  Query(query): Query<ListQuery>,
) -> Reply<Vec<Ota>> {
  // garbage falls through to the service default
  let limit = query
    .limit
    .as_deref()
    .and_then(|limit| limit.trim().parse::<i64>().ok())
    .unwrap_or(0)
    .min(app.config.max_page_size);

  let page = app.sv().ota.list_all(&query.cursor, limit).await?;
  let pagination = Pagination::of(&page, &query.cursor);

  let envelope = Envelope::success(
    StatusCode::OK,
    "OTAs retrieved successfully",
    page.entries,
  )
  .paginated(pagination);
  Ok((StatusCode::OK, Json(envelope)))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Path(id): Path<String>,
  payload: Result<Json<OtaBody>, JsonRejection>,
) -> Reply<Ota> {
  let req = body(payload)?;
  let update = OtaUpdate {
    id,
    app_id: req.app_id,
    version_name: req.version_name,
    version_code: req.version_code,
    release_notes: req.release_notes,
    url: req.url,
  };

  let ota = app.sv().ota.update(update).await?;
  ok("OTA updated successfully", ota)
}

pub async fn delete(
  State(app): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Reply<()> {
  app.sv().ota.delete(&id).await?;
  ok("OTA deleted successfully", ())
}

#[derive(Debug, Serialize)]
pub struct Health {
  pub status: &'static str,
}

pub async fn health() -> Json<Health> {
  Json(Health { status: "ok" })
}
