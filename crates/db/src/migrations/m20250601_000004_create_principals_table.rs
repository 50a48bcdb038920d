//! Create `principals` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Principals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Principals::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Principals::Nama).string_len(255).not_null())
                    .col(ColumnDef::new(Principals::TahunJabatan).string_len(64).not_null())
                    .col(ColumnDef::new(Principals::Foto).text())
                    .col(
                        ColumnDef::new(Principals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Principals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Principals {
    Table,
    Id,
    Nama,
    TahunJabatan,
    Foto,
    CreatedAt,
}
