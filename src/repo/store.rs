use async_trait::async_trait;
use sea_orm::{
  ActiveValue::{NotSet, Unchanged},
  sea_query::OnConflict,
};
use uuid::Uuid;

use super::{Repository, check_limit, fetch_size, paginate};
use crate::{
  entity::{Ota, ota},
  model::{NewOta, OtaUpdate, Page},
  prelude::*,
};

/// SeaORM-backed repository borrowing the process-wide connection pool.
pub struct Store<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Store<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Inserts an entry or, when its `(app_id, version_code)` is already
  /// catalogued, replaces that row's descriptive fields in place. The
  /// existing row keeps its `id` and `created_at`.
  pub async fn upsert(&self, new: NewOta) -> Result<Ota> {
    let (app_id, version_code) = (new.app_id.clone(), new.version_code);

    ota::Entity::insert(active_model(new))
      .on_conflict(
        OnConflict::columns([ota::Column::AppId, ota::Column::VersionCode])
          .update_columns([
            ota::Column::VersionName,
            ota::Column::ReleaseNotes,
            ota::Column::Url,
            ota::Column::UpdatedAt,
          ])
          .to_owned(),
      )
      .exec_without_returning(self.db)
      .await?;

    ota::Entity::find()
      .filter(ota::Column::AppId.eq(app_id))
      .filter(ota::Column::VersionCode.eq(version_code))
      .one(self.db)
      .await?
      .ok_or(Error::NotFound)
  }
}

fn active_model(new: NewOta) -> ota::ActiveModel {
  let now = Utc::now().naive_utc();
  let id = new
    .id
    .filter(|id| !id.is_empty())
    .unwrap_or_else(|| Uuid::new_v4().to_string());

  ota::ActiveModel {
    id: Set(id),
    app_id: Set(new.app_id),
    version_name: Set(new.version_name),
    version_code: Set(new.version_code),
    release_notes: Set(new.release_notes),
    url: Set(new.url),
    created_at: Set(now),
    updated_at: Set(now),
  }
}

#[async_trait]
impl Repository for Store<'_> {
  async fn create(&self, new: NewOta) -> Result<Ota> {
    let ota = active_model(new).insert(self.db).await?;
    debug!("Created ota `{}` for `{}`", ota.id, ota.app_id);
    Ok(ota)
  }

  async fn get_by_id(&self, id: &str) -> Result<Ota> {
    ota::Entity::find_by_id(id).one(self.db).await?.ok_or(Error::NotFound)
  }

  async fn get_by_app_id(&self, app_id: &str) -> Result<Vec<Ota>> {
    let otas = ota::Entity::find()
      .filter(ota::Column::AppId.eq(app_id))
      .order_by_desc(ota::Column::VersionCode)
      .order_by_asc(ota::Column::Id)
      .all(self.db)
      .await?;
    Ok(otas)
  }

  async fn latest(&self, app_id: &str) -> Result<Ota> {
    ota::Entity::find()
      .filter(ota::Column::AppId.eq(app_id))
      .order_by_desc(ota::Column::VersionCode)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound)
  }

  async fn list_all(&self, cursor: &str, limit: u64) -> Result<Page> {
    check_limit(limit)?;

    let total = ota::Entity::find().count(self.db).await?;

    let mut query = ota::Entity::find();
    if !cursor.is_empty() {
      query = query.filter(ota::Column::Id.gt(cursor));
    }

    let rows = query
      .order_by_asc(ota::Column::Id)
      .limit(fetch_size(limit))
      .all(self.db)
      .await?;

    Ok(paginate(rows, limit, total))
  }

  async fn update(&self, update: OtaUpdate) -> Result<Ota> {
    let ota = ota::ActiveModel {
      id: Unchanged(update.id),
      app_id: NotSet,
      version_name: Set(update.version_name),
      version_code: Set(update.version_code),
      release_notes: Set(update.release_notes),
      url: Set(update.url),
      created_at: NotSet,
      updated_at: Set(Utc::now().naive_utc()),
    }
    .update(self.db)
    .await?;

    debug!("Updated ota `{}`", ota.id);
    Ok(ota)
  }

  async fn delete(&self, id: &str) -> Result<()> {
    let result = ota::Entity::delete_by_id(id).exec(self.db).await?;
    if result.rows_affected == 0 {
      return Err(Error::NotFound);
    }

    debug!("Deleted ota `{id}`");
    Ok(())
  }
}
