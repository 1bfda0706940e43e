use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_otas::Otas;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_index(
        Index::create()
          .name("uq_otas_app_version")
          .table(Otas::Table)
          .col(Otas::AppId)
          .col(Otas::VersionCode)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_index(
        Index::drop().name("uq_otas_app_version").table(Otas::Table).to_owned(),
      )
      .await
  }
}
