//! Catalog storage backends

mod memory;
mod store;

use async_trait::async_trait;

pub use memory::Memory;
pub use store::Store;

use crate::{
  entity::Ota,
  model::{Lookup, NewOta, OtaUpdate, Page},
  prelude::*,
};

/// Durable storage of catalog entries.
///
/// Implementations assign identities, classify store failures into
/// [`Error`] kinds and serve `id`-ordered cursor pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
  /// Persists a new entry, generating a v4 UUID `id` when none is given and
  /// stamping `created_at == updated_at`. Fails with [`Error::Conflict`] when
  /// the `id` or the `(app_id, version_code)` pair is taken.
  async fn create(&self, ota: NewOta) -> Result<Ota>;

  async fn get_by_id(&self, id: &str) -> Result<Ota>;

  /// All entries of one application, highest `version_code` first. An
  /// unknown application yields an empty list.
  async fn get_by_app_id(&self, app_id: &str) -> Result<Vec<Ota>>;

  /// Entry with the highest `version_code` for an application.
  async fn latest(&self, app_id: &str) -> Result<Ota>;

  /// Up to `limit` entries with `id > cursor` in ascending `id` order; an
  /// empty cursor starts from the first entry.
  ///
  /// `total` is counted by a separate statement, not in the snapshot of the
  /// page scan, so under concurrent writes it may disagree with the pages
  /// a caller walks through.
  async fn list_all(&self, cursor: &str, limit: u64) -> Result<Page>;

  /// Replaces the mutable fields of the entry with `update.id` and refreshes
  /// `updated_at`.
  async fn update(&self, update: OtaUpdate) -> Result<Ota>;

  /// Hard delete. Deleting an absent `id` is [`Error::NotFound`].
  async fn delete(&self, id: &str) -> Result<()>;

  /// Lookup by exactly one of `id` or `app_id`; empty strings count as
  /// absent.
  async fn get(&self, id: &str, app_id: &str) -> Result<Lookup> {
    match (id.is_empty(), app_id.is_empty()) {
      (false, false) => {
        Err(Error::validation("cannot provide both id and app_id"))
      }
      (true, true) => {
        Err(Error::validation("must provide either id or app_id"))
      }
      (false, true) => self.get_by_id(id).await.map(Lookup::One),
      (true, false) => self.get_by_app_id(app_id).await.map(Lookup::Many),
    }
  }
}

/// Splits an over-fetched scan of `limit + 1` rows into a page and the cursor
/// of its last row. The lookahead row only signals that more rows follow.
pub(crate) fn paginate(mut rows: Vec<Ota>, limit: u64, total: u64) -> Page {
  let limit = usize::try_from(limit).unwrap_or(usize::MAX);

  let next_cursor = if rows.len() > limit {
    rows.truncate(limit);
    rows.last().map(|ota| ota.id.clone())
  } else {
    None
  };

  Page { entries: rows, next_cursor, total }
}

/// Rows to request for a page of `limit`: one lookahead row, bounded so the
/// bound value still fits the signed `LIMIT` parameter stores bind.
pub(crate) fn fetch_size(limit: u64) -> u64 {
  const MAX_FETCH: u64 = i64::MAX as u64;
  limit.min(MAX_FETCH - 1) + 1
}

pub(crate) fn check_limit(limit: u64) -> Result<()> {
  if limit == 0 {
    return Err(Error::validation("limit must be positive"));
  }
  Ok(())
}
