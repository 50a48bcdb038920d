//! Staff member (`guru_staff`) entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a person in the staff directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    #[sea_orm(string_value = "principal")]
    Principal,
    #[sea_orm(string_value = "vice_principal")]
    VicePrincipal,
    #[sea_orm(string_value = "program_head")]
    ProgramHead,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "staff")]
    Staff,
}

impl StaffRole {
    /// Roles in directory order.
    pub const ALL: [Self; 5] = [
        Self::Principal,
        Self::VicePrincipal,
        Self::ProgramHead,
        Self::Teacher,
        Self::Staff,
    ];

    /// Sort key: lower ranks are listed first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Principal => 0,
            Self::VicePrincipal => 1,
            Self::ProgramHead => 2,
            Self::Teacher => 3,
            Self::Staff => 4,
        }
    }

    /// Identifier as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::VicePrincipal => "vice_principal",
            Self::ProgramHead => "program_head",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
        }
    }

    /// Parse a role identifier.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

/// A person in the staff directory.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guru_staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(nullable)]
    pub email: Option<String>,

    pub role: StaffRole,

    /// Legacy column mirroring `role` for teachers and staff.
    #[sea_orm(column_name = "type", nullable)]
    #[serde(rename = "type")]
    pub staff_type: Option<String>,

    /// Subject taught (teachers only).
    #[sea_orm(nullable)]
    pub subject: Option<String>,

    #[sea_orm(nullable)]
    pub expertise: Option<String>,

    /// Job position (general staff only).
    #[sea_orm(nullable)]
    pub position: Option<String>,

    #[sea_orm(nullable)]
    pub image: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
