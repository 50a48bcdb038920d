//! Public read views with local filtering.

use crate::{
    api::EntityApi,
    models::{Entity, Post, StaffMember},
};

/// State of a public list section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicView<T> {
    Loading,
    Loaded(Vec<T>),
    Error(String),
}

impl<T> Default for PublicView<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T: Entity> PublicView<T> {
    /// Fetch once. Failures become the `Error` state rather than a `Result`.
    pub async fn fetch<A: EntityApi<T>>(api: &A) -> Self {
        match api.list().await {
            Ok(mut rows) => {
                T::arrange(&mut rows);
                Self::Loaded(rows)
            }
            Err(e) => {
                tracing::warn!(entity = T::PATH, error = %e, "Public view failed to load");
                Self::Error(e.to_string())
            }
        }
    }

    /// Loaded rows; empty while loading or after an error.
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Loaded(rows) => rows,
            Self::Loading | Self::Error(_) => &[],
        }
    }

    /// Rows accepted by `keep`. No request is made.
    pub fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<&T> {
        self.rows().iter().filter(|row| keep(row)).collect()
    }
}

/// Feed tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostFilter {
    /// `semua`: everything.
    #[default]
    All,
    Berita,
    Foto,
    Video,
}

impl PostFilter {
    /// Parse a tab identifier (`semua`, `berita`, `foto`, `video`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "semua" | "all" => Some(Self::All),
            "berita" => Some(Self::Berita),
            "foto" => Some(Self::Foto),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Berita => post.post_type == "berita",
            Self::Foto => post.post_type == "foto",
            Self::Video => post.post_type == "video",
        }
    }
}

/// Staff directory tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaffCategory {
    #[default]
    All,
    /// Principal, vice principal and programme heads.
    Leadership,
    Teacher,
    Staff,
}

impl StaffCategory {
    #[must_use]
    pub fn matches(self, member: &StaffMember) -> bool {
        match self {
            Self::All => true,
            Self::Leadership => matches!(
                member.role.as_str(),
                "principal" | "vice_principal" | "program_head"
            ),
            Self::Teacher => member.role == "teacher",
            Self::Staff => member.role == "staff",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use crate::manager::tests::MemoryApi;
    use crate::models::{PostDraft, StaffDraft};
    use async_trait::async_trait;
    use chrono::Utc;

    fn post(id: &str, kind: &str) -> Post {
        Post {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            image: None,
            post_type: kind.to_string(),
            category: None,
            author: "Admin".to_string(),
            video_url: None,
            date: Utc::now(),
        }
    }

    struct Broken;

    #[async_trait]
    impl EntityApi<Post> for Broken {
        async fn list(&self) -> ClientResult<Vec<Post>> {
            Err(ClientError::Api {
                status: 500,
                code: Some("DATABASE_ERROR".to_string()),
                message: "Database error".to_string(),
            })
        }
        async fn create(&self, _draft: &PostDraft) -> ClientResult<Post> {
            unreachable!()
        }
        async fn update(&self, _id: &str, _draft: &PostDraft) -> ClientResult<Post> {
            unreachable!()
        }
        async fn delete(&self, _id: &str) -> ClientResult<()> {
            unreachable!()
        }
    }

    #[test]
    fn test_post_filter() {
        let view = PublicView::Loaded(vec![post("a", "berita"), post("b", "video"), post("c", "foto")]);

        assert_eq!(view.filtered(|p| PostFilter::All.matches(p)).len(), 3);
        let videos = view.filtered(|p| PostFilter::parse("video").unwrap().matches(p));
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "b");
    }

    #[tokio::test]
    async fn test_error_state() {
        let view = PublicView::<Post>::fetch(&Broken).await;
        assert_eq!(view, PublicView::Error("Database error".to_string()));
        assert!(view.rows().is_empty());
    }

    #[tokio::test]
    async fn test_staff_categories_filter_locally() {
        let api = MemoryApi::<StaffMember>::default();
        for (name, role) in [
            ("Ani", "staff"),
            ("Budi", "principal"),
            ("Citra", "teacher"),
            ("Dedi", "program_head"),
        ] {
            api.create(&StaffDraft {
                name: name.to_string(),
                role: role.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let view = PublicView::<StaffMember>::fetch(&api).await;
        let calls = api.calls();

        let leaders: Vec<&str> = view
            .filtered(|m| StaffCategory::Leadership.matches(m))
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(leaders, ["Budi", "Dedi"]);
        assert_eq!(view.filtered(|m| StaffCategory::Staff.matches(m)).len(), 1);
        assert_eq!(api.calls(), calls);
    }
}
