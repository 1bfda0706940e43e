use serde::{Deserialize, Serialize};

use crate::entity::Ota;

/// Caller-supplied fields for a new entry. Timestamps are always stamped by
/// the repository; `id` is generated when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewOta {
  #[serde(default)]
  pub id: Option<String>,
  pub app_id: String,
  pub version_name: String,
  pub version_code: i32,
  #[serde(default)]
  pub release_notes: Option<String>,
  pub url: String,
}

/// Wholesale replacement of an entry's mutable fields, targeted by `id`.
///
/// `app_id` is carried for validation but is never written: identity fields
/// are immutable after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OtaUpdate {
  #[serde(default)]
  pub id: String,
  pub app_id: String,
  pub version_name: String,
  pub version_code: i32,
  #[serde(default)]
  pub release_notes: Option<String>,
  pub url: String,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
  pub entries: Vec<Ota>,
  /// `id` of the last entry on this page when more entries follow.
  pub next_cursor: Option<String>,
  /// Count of all stored entries, taken separately from the page scan.
  pub total: u64,
}

/// Result of a lookup by exactly one of the two alternate keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Lookup {
  One(Ota),
  Many(Vec<Ota>),
}
