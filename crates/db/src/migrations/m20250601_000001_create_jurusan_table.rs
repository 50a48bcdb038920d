//! Create `jurusan` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jurusan::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Jurusan::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Jurusan::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Jurusan::Description).text())
                    .col(
                        ColumnDef::new(Jurusan::Icon)
                            .string_len(32)
                            .not_null()
                            .default("Briefcase"),
                    )
                    .col(ColumnDef::new(Jurusan::Image).text())
                    .col(ColumnDef::new(Jurusan::VideoUrl).string_len(512))
                    .col(
                        ColumnDef::new(Jurusan::Color)
                            .string_len(64)
                            .not_null()
                            .default("text-green-500"),
                    )
                    .col(
                        ColumnDef::new(Jurusan::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: name (list ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_jurusan_name")
                    .table(Jurusan::Table)
                    .col(Jurusan::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jurusan::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Jurusan {
    Table,
    Id,
    Name,
    Description,
    Icon,
    Image,
    VideoUrl,
    Color,
    CreatedAt,
}
