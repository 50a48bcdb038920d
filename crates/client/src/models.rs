//! Wire models and editable drafts for each entity.

use std::fmt;

use chrono::{DateTime, Utc};
use sekolah_common::validation;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::ValidateEmail;

use crate::error::{ClientError, ClientResult};

/// Form state for creating or editing an entity.
pub trait Draft: Clone + Default + Serialize + Send + Sync + fmt::Debug {
    /// Checks run before any request is issued.
    fn validate(&self) -> ClientResult<()>;

    /// Image reference currently in the form, if any.
    fn image(&self) -> Option<&str>;
}

/// A row served by one of the entity endpoints.
pub trait Entity: Clone + DeserializeOwned + Send + Sync + fmt::Debug + 'static {
    type Draft: Draft;

    /// Endpoint path segment, e.g. `jurusan`.
    const PATH: &'static str;

    fn id(&self) -> &str;

    /// Populate a form from this row.
    fn to_draft(&self) -> Self::Draft;

    /// Client-side ordering applied after every load. Server order by default.
    fn arrange(_rows: &mut [Self]) {}
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn check_video_url(value: &str) -> ClientResult<()> {
    match non_blank(value) {
        Some(url) if !validation::is_video_url(url) => Err(ClientError::Validation(
            "video_url must be a YouTube video URL".to_string(),
        )),
        _ => Ok(()),
    }
}

// === Department ===

/// Department as served by `/jurusan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub image: Option<String>,
    pub video_url: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentDraft {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub image: String,
    pub video_url: String,
    pub color: String,
}

impl Default for DepartmentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            icon: "Briefcase".to_string(),
            image: String::new(),
            video_url: String::new(),
            color: "text-green-500".to_string(),
        }
    }
}

impl Draft for DepartmentDraft {
    fn validate(&self) -> ClientResult<()> {
        validation::require("name", &self.name)?;
        if !matches!(self.icon.as_str(), "Briefcase" | "Cpu" | "Code") {
            return Err(ClientError::Validation(format!(
                "icon must be one of Briefcase, Cpu, Code, got {}",
                self.icon
            )));
        }
        check_video_url(&self.video_url)
    }

    fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }
}

impl Entity for Department {
    type Draft = DepartmentDraft;
    const PATH: &'static str = "jurusan";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            icon: self.icon.clone(),
            image: self.image.clone().unwrap_or_default(),
            video_url: self.video_url.clone().unwrap_or_default(),
            color: self.color.clone(),
        }
    }
}

// === Staff ===

/// Staff member as served by `/guru_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    #[serde(rename = "type")]
    pub staff_type: Option<String>,
    pub subject: Option<String>,
    pub expertise: Option<String>,
    pub position: Option<String>,
    pub image: Option<String>,
}

impl StaffMember {
    /// Directory position of the role; unknown roles sort last.
    #[must_use]
    pub fn role_rank(&self) -> usize {
        STAFF_ROLES
            .iter()
            .position(|r| *r == self.role)
            .unwrap_or(STAFF_ROLES.len())
    }
}

/// Roles in directory order.
pub const STAFF_ROLES: [&str; 5] = ["principal", "vice_principal", "program_head", "teacher", "staff"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub subject: String,
    pub expertise: String,
    pub position: String,
    pub image: String,
}

impl Default for StaffDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: "teacher".to_string(),
            subject: String::new(),
            expertise: String::new(),
            position: String::new(),
            image: String::new(),
        }
    }
}

impl Draft for StaffDraft {
    fn validate(&self) -> ClientResult<()> {
        validation::require("name", &self.name)?;
        if !STAFF_ROLES.contains(&self.role.as_str()) {
            return Err(ClientError::Validation(format!(
                "role is not recognised: {}",
                self.role
            )));
        }
        match non_blank(&self.email) {
            Some(email) if !email.validate_email() => Err(ClientError::Validation(format!(
                "email is not a valid address: {email}"
            ))),
            _ => Ok(()),
        }
    }

    fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }
}

impl Entity for StaffMember {
    type Draft = StaffDraft;
    const PATH: &'static str = "guru_staff";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> StaffDraft {
        StaffDraft {
            name: self.name.clone(),
            email: self.email.clone().unwrap_or_default(),
            role: self.role.clone(),
            subject: self.subject.clone().unwrap_or_default(),
            expertise: self.expertise.clone().unwrap_or_default(),
            position: self.position.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
        }
    }

    /// Group by role priority; the sort is stable so name order survives.
    fn arrange(rows: &mut [Self]) {
        rows.sort_by_key(Self::role_rank);
    }
}

// === Post ===

/// Feed item as served by `/postingan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub post_type: String,
    pub category: Option<String>,
    pub author: String,
    pub video_url: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub category: String,
    pub author: String,
    pub video_url: String,
    /// Empty keeps the server default (now on create, unchanged on update).
    pub date: String,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            image: String::new(),
            post_type: "berita".to_string(),
            category: String::new(),
            author: "Admin".to_string(),
            video_url: String::new(),
            date: String::new(),
        }
    }
}

impl Draft for PostDraft {
    fn validate(&self) -> ClientResult<()> {
        validation::require("title", &self.title)?;
        validation::require("content", &self.content)?;
        check_video_url(&self.video_url)
    }

    fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }
}

impl Entity for Post {
    type Draft = PostDraft;
    const PATH: &'static str = "postingan";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            image: self.image.clone().unwrap_or_default(),
            post_type: self.post_type.clone(),
            category: self.category.clone().unwrap_or_default(),
            author: self.author.clone(),
            video_url: self.video_url.clone().unwrap_or_default(),
            date: self.date.to_rfc3339(),
        }
    }
}

// === Principal ===

/// Principal record as served by `/principals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub nama: String,
    pub tahun_jabatan: String,
    pub foto: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrincipalDraft {
    pub nama: String,
    pub tahun_jabatan: String,
    pub foto: String,
}

impl Draft for PrincipalDraft {
    fn validate(&self) -> ClientResult<()> {
        if non_blank(&self.nama).is_none() || non_blank(&self.tahun_jabatan).is_none() {
            return Err(ClientError::Validation(
                "Nama dan periode harus diisi".to_string(),
            ));
        }
        Ok(())
    }

    fn image(&self) -> Option<&str> {
        non_blank(&self.foto)
    }
}

impl Entity for Principal {
    type Draft = PrincipalDraft;
    const PATH: &'static str = "principals";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> PrincipalDraft {
        PrincipalDraft {
            nama: self.nama.clone(),
            tahun_jabatan: self.tahun_jabatan.clone(),
            foto: self.foto.clone().unwrap_or_default(),
        }
    }
}
