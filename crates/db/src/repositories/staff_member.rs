//! Staff member repository.

use std::sync::Arc;

use sekolah_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Order, QueryOrder, Set,
    Unchanged,
};

use crate::entities::{StaffMember, staff_member};

/// Repository for staff directory operations.
#[derive(Clone)]
pub struct StaffMemberRepository {
    db: Arc<DatabaseConnection>,
}

impl StaffMemberRepository {
    /// Create a new staff member repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find staff member by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<staff_member::Model>> {
        StaffMember::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all staff members grouped by role priority, by name within a role.
    pub async fn find_all(&self) -> AppResult<Vec<staff_member::Model>> {
        let mut members = StaffMember::find()
            .order_by(staff_member::Column::Name, Order::Asc)
            .order_by(staff_member::Column::Id, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Stable: keeps the name order inside each role.
        members.sort_by_key(|m| m.role.rank());
        Ok(members)
    }

    /// Insert a staff member.
    pub async fn create(&self, model: staff_member::Model) -> AppResult<staff_member::Model> {
        let active_model = staff_member::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            email: Set(model.email),
            role: Set(model.role),
            staff_type: Set(model.staff_type),
            subject: Set(model.subject),
            expertise: Set(model.expertise),
            position: Set(model.position),
            image: Set(model.image),
            created_at: Set(model.created_at),
        };

        active_model.insert(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Overwrite every writable column of an existing staff member.
    pub async fn update(&self, model: staff_member::Model) -> AppResult<staff_member::Model> {
        let id = model.id.clone();
        let active = staff_member::ActiveModel {
            id: Unchanged(model.id),
            name: Set(model.name),
            email: Set(model.email),
            role: Set(model.role),
            staff_type: Set(model.staff_type),
            subject: Set(model.subject),
            expertise: Set(model.expertise),
            position: Set(model.position),
            image: Set(model.image),
            created_at: NotSet,
        };

        active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(format!("Staff member not found: {id}")),
            other => other.into(),
        })
    }

    /// Delete a staff member. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = StaffMember::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::StaffRole;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_member(id: &str, name: &str, role: StaffRole) -> staff_member::Model {
        staff_member::Model {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            role,
            staff_type: None,
            subject: None,
            expertise: None,
            position: None,
            image: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_all_groups_by_role_priority() {
        // Rows arrive in name order from the database.
        let rows = vec![
            create_test_member("1", "Ani", StaffRole::Staff),
            create_test_member("2", "Budi", StaffRole::Principal),
            create_test_member("3", "Citra", StaffRole::Teacher),
            create_test_member("4", "Dedi", StaffRole::VicePrincipal),
            create_test_member("5", "Eka", StaffRole::Teacher),
            create_test_member("6", "Fajar", StaffRole::ProgramHead),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([rows])
                .into_connection(),
        );

        let repo = StaffMemberRepository::new(Arc::clone(&db));
        let results = repo.find_all().await.unwrap();
        drop(repo);

        let names: Vec<&str> = results.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Budi", "Dedi", "Fajar", "Citra", "Eka", "Ani"]);

        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.ends_with(r#"ORDER BY "guru_staff"."name" ASC, "guru_staff"."id" ASC"#), "{sql}");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<staff_member::Model>::new()])
                .into_connection(),
        );

        let repo = StaffMemberRepository::new(db);
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let mut after = create_test_member("7", "Gita", StaffRole::Teacher);
        after.name = "Gita Permata".to_string();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[after.clone()]])
                .into_connection(),
        );

        let repo = StaffMemberRepository::new(db);
        let updated = repo.update(after).await.unwrap();

        assert_eq!(updated.id, "7");
        assert_eq!(updated.name, "Gita Permata");
    }
}
