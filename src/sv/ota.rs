use url::Url;

use crate::{
  entity::Ota,
  model::{Lookup, NewOta, OtaUpdate, Page},
  prelude::*,
  repo::Repository,
};

pub const DEFAULT_LIMIT: u64 = 10;

/// Validates catalog intents before handing them to a [`Repository`].
pub struct Catalog<R> {
  repo: R,
}

fn require(value: &str, field: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(format!("{field} is required")));
  }
  Ok(())
}

fn check_fields(
  app_id: &str,
  version_name: &str,
  version_code: i32,
  url: &str,
) -> Result<()> {
  require(app_id, "app_id")?;
  require(version_name, "version_name")?;
  if version_code <= 0 {
    return Err(Error::validation("version_code must be positive"));
  }
  require(url, "url")?;

  Url::parse(url)
    .map_err(|err| Error::validation(format!("url is invalid: {err}")))?;
  Ok(())
}

impl<R: Repository> Catalog<R> {
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  pub async fn create(&self, new: NewOta) -> Result<Ota> {
    check_fields(&new.app_id, &new.version_name, new.version_code, &new.url)?;

    let ota = self.repo.create(new).await?;
    info!("Catalogued {} v{} as `{}`", ota.app_id, ota.version_name, ota.id);
    Ok(ota)
  }

  pub async fn get_by_identifier(
    &self,
    id: &str,
    app_id: &str,
  ) -> Result<Lookup> {
    self.repo.get(id, app_id).await
  }

  pub async fn latest(&self, app_id: &str) -> Result<Ota> {
    require(app_id, "app_id")?;
    self.repo.latest(app_id).await
  }

  /// Non-positive limits fall back to [`DEFAULT_LIMIT`]; no upper bound is
  /// applied here.
  pub async fn list_all(&self, cursor: &str, limit: i64) -> Result<Page> {
    let limit = u64::try_from(limit)
      .ok()
      .filter(|&limit| limit > 0)
      .unwrap_or(DEFAULT_LIMIT);

    self.repo.list_all(cursor, limit).await
  }

  pub async fn update(&self, update: OtaUpdate) -> Result<Ota> {
    require(&update.id, "id")?;
    check_fields(
      &update.app_id,
      &update.version_name,
      update.version_code,
      &update.url,
    )?;

    let ota = self.repo.update(update).await?;
    info!("Updated ota `{}` to v{}", ota.id, ota.version_name);
    Ok(ota)
  }

  pub async fn delete(&self, id: &str) -> Result<()> {
    require(id, "id")?;

    self.repo.delete(id).await?;
    info!("Deleted ota `{id}`");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use mockall::predicate::eq;

  use super::*;
  use crate::repo::{Memory, MockRepository};

  fn new_ota(version_code: i32) -> NewOta {
    NewOta {
      id: None,
      app_id: "com.yapindo.launcher".into(),
      version_name: "1.0.0".into(),
      version_code,
      release_notes: Some("Initial release".into()),
      url: "https://storage.example.com/launcher/v1.0.0/app.apk".into(),
    }
  }

  fn update_for(id: &str) -> OtaUpdate {
    OtaUpdate {
      id: id.into(),
      app_id: "com.yapindo.launcher".into(),
      version_name: "1.0.1".into(),
      version_code: 101,
      release_notes: None,
      url: "https://storage.example.com/launcher/v1.0.1/app.apk".into(),
    }
  }

  /// A repository that fails the test if anything reaches storage.
  fn untouched() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.expect_create().never();
    repo.expect_update().never();
    repo.expect_delete().never();
    repo.expect_list_all().never();
    repo
  }

  #[tokio::test]
  async fn test_create_rejects_invalid_before_storage() {
    let sv = Catalog::new(untouched());

    let cases = [
      NewOta { version_code: 0, ..new_ota(1) },
      NewOta { version_code: -3, ..new_ota(1) },
      NewOta { app_id: String::new(), ..new_ota(1) },
      NewOta { version_name: " ".into(), ..new_ota(1) },
      NewOta { url: String::new(), ..new_ota(1) },
      NewOta { url: "storage/app.apk".into(), ..new_ota(1) },
    ];

    for case in cases {
      assert!(matches!(sv.create(case).await, Err(Error::Validation(_))));
    }
  }

  #[tokio::test]
  async fn test_update_requires_id() {
    let sv = Catalog::new(untouched());

    let err = sv.update(update_for("")).await.unwrap_err();
    assert_eq!(err.to_string(), "id is required");
  }

  #[tokio::test]
  async fn test_delete_requires_id() {
    let sv = Catalog::new(untouched());
    assert!(matches!(sv.delete("").await, Err(Error::Validation(_))));
  }

  #[tokio::test]
  async fn test_list_all_defaults_non_positive_limit() {
    for limit in [0, -5] {
      let mut repo = MockRepository::new();
      repo
        .expect_list_all()
        .with(eq(""), eq(DEFAULT_LIMIT))
        .times(1)
        .returning(|_, _| Ok(Page::default()));

      Catalog::new(repo).list_all("", limit).await.unwrap();
    }
  }

  #[tokio::test]
  async fn test_list_all_passes_large_limit_through() {
    let mut repo = MockRepository::new();
    repo
      .expect_list_all()
      .with(eq("cursor"), eq(5000_u64))
      .times(1)
      .returning(|_, _| Ok(Page::default()));

    Catalog::new(repo).list_all("cursor", 5000).await.unwrap();
  }

  #[tokio::test]
  async fn test_create_then_lookup() {
    let sv = Catalog::new(Memory::new());

    let created = sv.create(new_ota(100)).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    match sv.get_by_identifier(&created.id, "").await.unwrap() {
      Lookup::One(ota) => assert_eq!(ota, created),
      Lookup::Many(_) => panic!("lookup by id returned a list"),
    }

    match sv.get_by_identifier("", "com.yapindo.launcher").await.unwrap() {
      Lookup::Many(otas) => assert_eq!(otas, [created]),
      Lookup::One(_) => panic!("lookup by app_id returned a single entry"),
    }
  }

  #[tokio::test]
  async fn test_lookup_requires_exactly_one_key() {
    let sv = Catalog::new(Memory::new());

    assert!(matches!(
      sv.get_by_identifier("id", "app").await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      sv.get_by_identifier("", "").await,
      Err(Error::Validation(_))
    ));
  }

  #[tokio::test]
  async fn test_update_missing_is_not_found() {
    let sv = Catalog::new(Memory::new());

    assert!(matches!(
      sv.update(update_for("ghost")).await,
      Err(Error::NotFound)
    ));
    assert!(matches!(
      sv.get_by_identifier("ghost", "").await,
      Err(Error::NotFound)
    ));
  }

  #[tokio::test]
  async fn test_delete_twice() {
    let sv = Catalog::new(Memory::new());
    let ota = sv.create(new_ota(100)).await.unwrap();

    sv.delete(&ota.id).await.unwrap();
    assert!(matches!(sv.delete(&ota.id).await, Err(Error::NotFound)));
  }

  #[tokio::test]
  async fn test_latest_requires_app_id() {
    let sv = Catalog::new(Memory::new());
    assert!(matches!(sv.latest("").await, Err(Error::Validation(_))));
  }

  #[tokio::test]
  async fn test_pages_through_twenty_five() {
    let sv = Catalog::new(Memory::new());
    for code in 1..=25 {
      sv.create(new_ota(code)).await.unwrap();
    }

    let first = sv.list_all("", 10).await.unwrap();
    assert_eq!(first.entries.len(), 10);
    assert_eq!(first.total, 25);
    let cursor = first.next_cursor.clone().unwrap();
    assert_eq!(cursor, first.entries[9].id);

    let second = sv.list_all(&cursor, 10).await.unwrap();
    assert_eq!(second.entries.len(), 10);
    assert!(second.entries[0].id > cursor);

    let third =
      sv.list_all(second.next_cursor.as_deref().unwrap(), 10).await.unwrap();
    assert_eq!(third.entries.len(), 5);
    assert!(third.next_cursor.is_none());
  }
}
