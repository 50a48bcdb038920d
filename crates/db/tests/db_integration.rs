//! Database integration tests.
//!
//! The ignored tests need a running database.
//! Run with: `cargo test -p sekolah-db --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DATABASE_URL` (default: `mysql://root@localhost:3306/sekolah_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::Utc;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use sekolah_db::entities::{DepartmentIcon, department, principal};
use sekolah_db::migrations::Migrator;
use sekolah_db::repositories::{DepartmentRepository, PrincipalRepository};

fn test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "mysql://root@localhost:3306/sekolah_test".to_string())
}

#[test]
fn test_migrations_are_registered_in_order() {
    let names: Vec<String> = Migrator::migrations()
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    assert_eq!(
        names,
        [
            "m20250601_000001_create_jurusan_table",
            "m20250601_000002_create_guru_staff_table",
            "m20250601_000003_create_postingan_table",
            "m20250601_000004_create_principals_table",
        ]
    );
}

#[tokio::test]
#[ignore = "requires running database instance"]
async fn test_department_round_trip() {
    let db = Database::connect(test_database_url())
        .await
        .expect("Failed to connect");
    sekolah_db::migrate(&db).await.unwrap();

    let repo = DepartmentRepository::new(Arc::new(db));
    let id = format!("it-{}", Utc::now().timestamp_micros());

    let created = repo
        .create(department::Model {
            id: id.clone(),
            name: "Teknik Komputer Jaringan".to_string(),
            description: None,
            icon: DepartmentIcon::Cpu,
            image: None,
            video_url: None,
            color: "text-green-500".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    assert_eq!(created.icon, DepartmentIcon::Cpu);

    assert!(repo.find_all().await.unwrap().iter().any(|d| d.id == id));

    assert_eq!(repo.delete(&id).await.unwrap(), 1);
    assert_eq!(repo.delete(&id).await.unwrap(), 0);
    assert!(repo.find_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires running database instance"]
async fn test_update_touches_only_target_row() {
    let db = Database::connect(test_database_url())
        .await
        .expect("Failed to connect");
    sekolah_db::migrate(&db).await.unwrap();

    let repo = PrincipalRepository::new(Arc::new(db));
    let stamp = Utc::now().timestamp_micros();
    let record = |id: String, nama: &str| principal::Model {
        id,
        nama: nama.to_string(),
        tahun_jabatan: "2010-2016".to_string(),
        foto: None,
        created_at: Utc::now(),
    };

    let a = repo.create(record(format!("a-{stamp}"), "Ahmad")).await.unwrap();
    let b = repo.create(record(format!("b-{stamp}"), "Siti")).await.unwrap();

    let updated = repo
        .update(principal::Model {
            nama: "Ahmad Yani".to_string(),
            ..a.clone()
        })
        .await
        .unwrap();
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.nama, "Ahmad Yani");

    let untouched = repo.find_by_id(&b.id).await.unwrap().unwrap();
    assert_eq!(untouched.nama, "Siti");

    repo.delete(&a.id).await.unwrap();
    repo.delete(&b.id).await.unwrap();
}
