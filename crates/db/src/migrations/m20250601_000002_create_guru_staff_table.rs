//! Create `guru_staff` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuruStaff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuruStaff::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(GuruStaff::Name).string_len(255).not_null())
                    .col(ColumnDef::new(GuruStaff::Email).string_len(255))
                    .col(ColumnDef::new(GuruStaff::Role).string_len(32).not_null())
                    .col(ColumnDef::new(GuruStaff::Type).string_len(32))
                    .col(ColumnDef::new(GuruStaff::Subject).string_len(255))
                    .col(ColumnDef::new(GuruStaff::Expertise).string_len(255))
                    .col(ColumnDef::new(GuruStaff::Position).string_len(255))
                    .col(ColumnDef::new(GuruStaff::Image).text())
                    .col(
                        ColumnDef::new(GuruStaff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: role (directory grouping)
        manager
            .create_index(
                Index::create()
                    .name("idx_guru_staff_role")
                    .table(GuruStaff::Table)
                    .col(GuruStaff::Role)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuruStaff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GuruStaff {
    Table,
    Id,
    Name,
    Email,
    Role,
    Type,
    Subject,
    Expertise,
    Position,
    Image,
    CreatedAt,
}
