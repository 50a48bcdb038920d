//! Post (`postingan`) entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of feed item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// News article.
    #[default]
    #[sea_orm(string_value = "berita")]
    Berita,
    /// Photo gallery.
    #[sea_orm(string_value = "foto")]
    Foto,
    /// Video.
    #[sea_orm(string_value = "video")]
    Video,
}

impl PostType {
    /// Every post type.
    pub const ALL: [Self; 3] = [Self::Berita, Self::Foto, Self::Video];

    /// Identifier as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Berita => "berita",
            Self::Foto => "foto",
            Self::Video => "video",
        }
    }

    /// Parse a post type identifier.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// A news, photo or video item in the content feed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "postingan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(nullable)]
    pub image: Option<String>,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub post_type: PostType,

    #[sea_orm(nullable)]
    pub category: Option<String>,

    pub author: String,

    /// Embeddable YouTube URL for video posts.
    #[sea_orm(nullable)]
    pub video_url: Option<String>,

    /// Publication date; the feed is ordered on it.
    pub date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
