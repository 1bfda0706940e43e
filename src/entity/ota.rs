//! OTA entry - one downloadable build of an application

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "otas")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub app_id: String,
  pub version_name: String,
  /// Monotonic build ordinal within one `app_id`
  pub version_code: i32,
  #[sea_orm(column_type = "Text", nullable)]
  pub release_notes: Option<String>,
  pub url: String,
  pub created_at: DateTime,
  pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
