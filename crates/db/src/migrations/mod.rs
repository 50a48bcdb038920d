//! Database migrations.
//!
//! Schema migrations for the database. Every table is created with
//! `IF NOT EXISTS`, so pre-existing tables are left untouched.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_jurusan_table;
mod m20250601_000002_create_guru_staff_table;
mod m20250601_000003_create_postingan_table;
mod m20250601_000004_create_principals_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_jurusan_table::Migration),
            Box::new(m20250601_000002_create_guru_staff_table::Migration),
            Box::new(m20250601_000003_create_postingan_table::Migration),
            Box::new(m20250601_000004_create_principals_table::Migration),
        ]
    }
}
