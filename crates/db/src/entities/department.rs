//! Department (`jurusan`) entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Glyph shown next to a department. Rendering happens in the presentation layer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum DepartmentIcon {
    #[default]
    #[sea_orm(string_value = "Briefcase")]
    Briefcase,
    #[sea_orm(string_value = "Cpu")]
    Cpu,
    #[sea_orm(string_value = "Code")]
    Code,
}

impl DepartmentIcon {
    /// Every selectable icon, in display order.
    pub const ALL: [Self; 3] = [Self::Briefcase, Self::Cpu, Self::Code];

    /// Identifier as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Briefcase => "Briefcase",
            Self::Cpu => "Cpu",
            Self::Code => "Code",
        }
    }

    /// Parse an icon identifier.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.as_str() == name)
    }
}

/// A vocational programme offered by the school.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jurusan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub icon: DepartmentIcon,

    /// Image reference (URL or storage path).
    #[sea_orm(nullable)]
    pub image: Option<String>,

    /// Embeddable YouTube URL.
    #[sea_orm(nullable)]
    pub video_url: Option<String>,

    /// Style token, e.g. `text-green-500`.
    pub color: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
