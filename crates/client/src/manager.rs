//! Admin console state machine for one entity.
//!
//! The manager is either idle (showing the list) or editing one draft. Every
//! successful mutation is followed by a full reload so the list always
//! mirrors the server.

use crate::{
    api::EntityApi,
    error::{ClientError, ClientResult},
    models::{Draft, Entity},
    preview::ImagePreview,
};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient notification shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Editing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<D> {
    Idle,
    Editing {
        /// Row being edited; `None` when creating.
        target: Option<String>,
        draft: D,
        preview: Option<ImagePreview>,
    },
}

/// Per-entity admin manager over any [`EntityApi`] backend.
pub struct EntityManager<E: Entity, A: EntityApi<E>> {
    api: A,
    rows: Vec<E>,
    mode: Mode<E::Draft>,
    notice: Option<Notice>,
}

impl<E: Entity, A: EntityApi<E>> EntityManager<E, A> {
    pub const fn new(api: A) -> Self {
        Self {
            api,
            rows: Vec::new(),
            mode: Mode::Idle,
            notice: None,
        }
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub const fn mode(&self) -> &Mode<E::Draft> {
        &self.mode
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    /// Fetch every row.
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list().await {
            Ok(mut rows) => {
                E::arrange(&mut rows);
                self.rows = rows;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Open a blank form.
    pub fn start_create(&mut self) {
        self.mode = Mode::Editing {
            target: None,
            draft: E::Draft::default(),
            preview: None,
        };
    }

    /// Open the form for a loaded row.
    pub fn start_edit(&mut self, id: &str) -> ClientResult<()> {
        let Some(row) = self.rows.iter().find(|row| row.id() == id) else {
            return Err(ClientError::State(format!("{} {id} is not loaded", E::PATH)));
        };

        let draft = row.to_draft();
        let preview = draft.image().and_then(ImagePreview::from_reference);
        self.mode = Mode::Editing {
            target: Some(id.to_string()),
            draft,
            preview,
        };
        Ok(())
    }

    /// Mutable access to the open draft.
    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        match &mut self.mode {
            Mode::Editing { draft, .. } => Some(draft),
            Mode::Idle => None,
        }
    }

    /// Recompute the image preview after the draft's image changed.
    pub fn refresh_preview(&mut self) {
        if let Mode::Editing { draft, preview, .. } = &mut self.mode {
            *preview = draft.image().and_then(ImagePreview::from_reference);
        }
    }

    /// Close the form without saving.
    pub fn cancel(&mut self) {
        self.mode = Mode::Idle;
    }

    /// Validate and save the open draft, then reload.
    ///
    /// On failure the form stays open with the draft untouched.
    pub async fn submit(&mut self) -> ClientResult<()> {
        let (target, draft) = match &self.mode {
            Mode::Editing { target, draft, .. } => (target.clone(), draft.clone()),
            Mode::Idle => return Err(ClientError::State("No form is open".to_string())),
        };

        if let Err(e) = draft.validate() {
            return Err(self.fail(e));
        }

        let saved = match &target {
            None => self.api.create(&draft).await,
            Some(id) => self.api.update(id, &draft).await,
        };
        if let Err(e) = saved {
            return Err(self.fail(e));
        }

        self.mode = Mode::Idle;
        self.notice = Some(Notice {
            kind: NoticeKind::Success,
            message: "Data berhasil disimpan".to_string(),
        });
        self.load().await
    }

    /// Delete a row, then reload.
    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        if let Err(e) = self.api.delete(id).await {
            return Err(self.fail(e));
        }

        self.notice = Some(Notice {
            kind: NoticeKind::Success,
            message: "Data berhasil dihapus".to_string(),
        });
        self.load().await
    }

    /// Clear the current notification.
    pub fn dismiss_error(&mut self) {
        self.notice = None;
    }

    fn fail(&mut self, error: ClientError) -> ClientError {
        tracing::debug!(entity = E::PATH, error = %error, "Admin action failed");
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            message: error.to_string(),
        });
        error
    }
}
