//! Create `postingan` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Postingan::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Postingan::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Postingan::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Postingan::Content).text().not_null())
                    .col(ColumnDef::new(Postingan::Image).text())
                    .col(
                        ColumnDef::new(Postingan::Type)
                            .string_len(16)
                            .not_null()
                            .default("berita"),
                    )
                    .col(ColumnDef::new(Postingan::Category).string_len(128))
                    .col(
                        ColumnDef::new(Postingan::Author)
                            .string_len(128)
                            .not_null()
                            .default("Admin"),
                    )
                    .col(ColumnDef::new(Postingan::VideoUrl).string_len(512))
                    .col(
                        ColumnDef::new(Postingan::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: date (feed ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_postingan_date")
                    .table(Postingan::Table)
                    .col(Postingan::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Postingan::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Postingan {
    Table,
    Id,
    Title,
    Content,
    Image,
    Type,
    Category,
    Author,
    VideoUrl,
    Date,
}
