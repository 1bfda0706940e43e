use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Otas::Table)
          .if_not_exists()
          .col(id_column(manager.get_database_backend()))
          .col(ColumnDef::new(Otas::AppId).string().not_null())
          .col(ColumnDef::new(Otas::VersionName).string().not_null())
          .col(
            ColumnDef::new(Otas::VersionCode)
              .integer()
              .not_null()
              .check(Expr::col(Otas::VersionCode).gt(0)),
          )
          .col(ColumnDef::new(Otas::ReleaseNotes).text().null())
          .col(ColumnDef::new(Otas::Url).string().not_null())
          .col(ColumnDef::new(Otas::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Otas::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_otas_app_id")
          .table(Otas::Table)
          .col(Otas::AppId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Otas::Table).to_owned()).await
  }
}

/// Cursor pages compare and order `id` bytewise. SQLite's default BINARY
/// collation already does; Postgres needs the "C" collation spelled out.
fn id_column(backend: DbBackend) -> ColumnDef {
  let mut id = ColumnDef::new(Otas::Id);
  id.string().not_null().primary_key();
  if backend == DbBackend::Postgres {
    id.extra("COLLATE \"C\"");
  }
  id
}

#[derive(DeriveIden)]
pub enum Otas {
  Table,
  Id,
  AppId,
  VersionName,
  VersionCode,
  ReleaseNotes,
  Url,
  CreatedAt,
  UpdatedAt,
}
