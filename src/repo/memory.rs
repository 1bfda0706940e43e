use std::{cmp::Reverse, collections::BTreeMap, ops::Bound};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Repository, check_limit, fetch_size, paginate};
use crate::{
  entity::Ota,
  model::{NewOta, OtaUpdate, Page},
  prelude::*,
};

/// In-process repository keyed by `id`, with the same ordering and
/// uniqueness rules as the SQL schema.
#[derive(Default)]
pub struct Memory {
  otas: RwLock<BTreeMap<String, Ota>>,
}

impl Memory {
  pub fn new() -> Self {
    Self::default()
  }
}

fn version_taken(
  otas: &BTreeMap<String, Ota>,
  app_id: &str,
  version_code: i32,
  except: Option<&str>,
) -> bool {
  otas.values().any(|ota| {
    ota.app_id == app_id
      && ota.version_code == version_code
      && Some(ota.id.as_str()) != except
  })
}

fn conflict() -> Error {
  Error::Conflict(String::from(
    "an ota with this id or version code already exists",
  ))
}

#[async_trait]
impl Repository for Memory {
  async fn create(&self, new: NewOta) -> Result<Ota> {
    let mut otas = self.otas.write().await;

    let id = new
      .id
      .filter(|id| !id.is_empty())
      .unwrap_or_else(|| Uuid::new_v4().to_string());

    if otas.contains_key(&id)
      || version_taken(&otas, &new.app_id, new.version_code, None)
    {
      return Err(conflict());
    }

    let now = Utc::now().naive_utc();
    let ota = Ota {
      id: id.clone(),
      app_id: new.app_id,
      version_name: new.version_name,
      version_code: new.version_code,
      release_notes: new.release_notes,
      url: new.url,
      created_at: now,
      updated_at: now,
    };

    otas.insert(id, ota.clone());
    Ok(ota)
  }

  async fn get_by_id(&self, id: &str) -> Result<Ota> {
    self.otas.read().await.get(id).cloned().ok_or(Error::NotFound)
  }

  async fn get_by_app_id(&self, app_id: &str) -> Result<Vec<Ota>> {
    let mut otas: Vec<_> = self
      .otas
      .read()
      .await
      .values()
      .filter(|ota| ota.app_id == app_id)
      .cloned()
      .collect();

    // ids are already ascending, the sort is stable
    otas.sort_by_key(|ota| Reverse(ota.version_code));
    Ok(otas)
  }

  async fn latest(&self, app_id: &str) -> Result<Ota> {
    self
      .otas
      .read()
      .await
      .values()
      .filter(|ota| ota.app_id == app_id)
      .max_by_key(|ota| ota.version_code)
      .cloned()
      .ok_or(Error::NotFound)
  }

  async fn list_all(&self, cursor: &str, limit: u64) -> Result<Page> {
    check_limit(limit)?;

    let total = self.otas.read().await.len() as u64;

    let lower = if cursor.is_empty() {
      Bound::Unbounded
    } else {
      Bound::Excluded(cursor)
    };
    let take = usize::try_from(fetch_size(limit)).unwrap_or(usize::MAX);

    let rows: Vec<_> = self
      .otas
      .read()
      .await
      .range::<str, _>((lower, Bound::Unbounded))
      .take(take)
      .map(|(_, ota)| ota.clone())
      .collect();

    Ok(paginate(rows, limit, total))
  }

  async fn update(&self, update: OtaUpdate) -> Result<Ota> {
    let mut otas = self.otas.write().await;

    let Some(app_id) = otas.get(&update.id).map(|ota| ota.app_id.clone())
    else {
      return Err(Error::NotFound);
    };

    if version_taken(&otas, &app_id, update.version_code, Some(&update.id)) {
      return Err(conflict());
    }

    let ota = otas.get_mut(&update.id).ok_or(Error::NotFound)?;
    ota.version_name = update.version_name;
    ota.version_code = update.version_code;
    ota.release_notes = update.release_notes;
    ota.url = update.url;
    ota.updated_at = Utc::now().naive_utc();

    Ok(ota.clone())
  }

  async fn delete(&self, id: &str) -> Result<()> {
    self.otas.write().await.remove(id).map(drop).ok_or(Error::NotFound)
  }
}
