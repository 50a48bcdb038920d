//! Staff directory (guru_staff) service.

use chrono::Utc;
use sekolah_common::{AppError, AppResult, id::IdGenerator, validation};
use sekolah_db::entities::{StaffRole, staff_member};
use sekolah_db::repositories::StaffMemberRepository;
use serde::Deserialize;
use validator::ValidateEmail;

use super::media::MediaService;

/// Writable staff fields, shared by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "type")]
    pub staff_type: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

struct StaffFields {
    name: String,
    email: Option<String>,
    role: StaffRole,
    staff_type: Option<String>,
    subject: Option<String>,
    expertise: Option<String>,
    position: Option<String>,
}

impl StaffInput {
    fn validate(&self) -> AppResult<StaffFields> {
        let name = validation::require("name", self.name.as_deref().unwrap_or_default())?;

        let role = validation::require("role", self.role.as_deref().unwrap_or_default())?;
        let role = StaffRole::parse(&role)
            .ok_or_else(|| AppError::Validation(format!("role is not recognised: {role}")))?;

        let email = validation::optional(self.email.clone());
        if let Some(email) = &email {
            if !email.validate_email() {
                return Err(AppError::Validation(format!(
                    "email is not a valid address: {email}"
                )));
            }
        }

        // Legacy `type` column: teachers and staff carry their role there.
        let staff_type = validation::optional(self.staff_type.clone()).or_else(|| {
            matches!(role, StaffRole::Teacher | StaffRole::Staff).then(|| role.as_str().to_string())
        });

        Ok(StaffFields {
            name,
            email,
            role,
            staff_type,
            subject: validation::optional(self.subject.clone())
                .filter(|_| role == StaffRole::Teacher),
            expertise: validation::optional(self.expertise.clone()),
            position: validation::optional(self.position.clone())
                .filter(|_| role == StaffRole::Staff),
        })
    }
}

/// Service for the staff directory.
#[derive(Clone)]
pub struct StaffService {
    staff_repo: StaffMemberRepository,
    media: MediaService,
    id_gen: IdGenerator,
}

impl StaffService {
    /// Create a new staff service.
    #[must_use]
    pub const fn new(staff_repo: StaffMemberRepository, media: MediaService) -> Self {
        Self {
            staff_repo,
            media,
            id_gen: IdGenerator::new(),
        }
    }

    /// List the directory grouped by role priority.
    pub async fn list(&self) -> AppResult<Vec<staff_member::Model>> {
        self.staff_repo.find_all().await
    }

    /// Add a person to the directory.
    pub async fn create(&self, input: StaffInput) -> AppResult<staff_member::Model> {
        let fields = input.validate()?;
        let image = self.media.store_image("guru_staff", "image", input.image).await?;

        let result = self
            .staff_repo
            .create(staff_member::Model {
                id: self.id_gen.generate(),
                name: fields.name,
                email: fields.email,
                role: fields.role,
                staff_type: fields.staff_type,
                subject: fields.subject,
                expertise: fields.expertise,
                position: fields.position,
                image: image.reference(),
                created_at: Utc::now(),
            })
            .await;
        let created = self.media.settle(&image, result).await?;

        tracing::info!(id = %created.id, role = created.role.as_str(), "Created staff member");
        Ok(created)
    }

    /// Replace every writable field of an existing person.
    pub async fn update(&self, id: &str, input: StaffInput) -> AppResult<staff_member::Model> {
        let fields = input.validate()?;
        let previous = self
            .staff_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff member not found: {id}")))?;
        let image = self.media.store_image("guru_staff", "image", input.image).await?;

        let result = self
            .staff_repo
            .update(staff_member::Model {
                id: id.to_string(),
                name: fields.name,
                email: fields.email,
                role: fields.role,
                staff_type: fields.staff_type,
                subject: fields.subject,
                expertise: fields.expertise,
                position: fields.position,
                image: image.reference(),
                created_at: previous.created_at,
            })
            .await;
        let updated = self.media.settle(&image, result).await?;
        self.media
            .release(previous.image.as_deref(), updated.image.as_deref())
            .await;

        tracing::info!(id = %updated.id, "Updated staff member");
        Ok(updated)
    }

    /// Remove a person. Removing an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let Some(existing) = self.staff_repo.find_by_id(id).await? else {
            tracing::info!(id = %id, removed = 0, "Deleted staff member");
            return Ok(());
        };

        let removed = self.staff_repo.delete(id).await?;
        self.media.release(existing.image.as_deref(), None).await;

        tracing::info!(id = %id, removed, "Deleted staff member");
        Ok(())
    }
}
