//! Draft session controller.
//!
//! A `DraftSession` is what an editor holds while a user works on drafts of
//! one type. It tracks the "current" draft across a sequence of saves and
//! keeps a cached list of the type's drafts that is refreshed from the
//! service after every mutation.
//!
//! No method returns an error. Failures move the session into
//! [`SessionStatus::Error`] with a readable message and leave the cached
//! list and current id as they were. Mutating methods take `&mut self`, so a
//! save must be awaited before the next save or delete on the same session.
//!
//! Sessions on other threads or processes sharing the same store are not
//! coordinated; concurrent writers to one draft race and the last put wins.

use std::sync::Arc;

use tracing::warn;

use draftbox_types::draft::{DraftId, DraftRecord, NewDraft};
use draftbox_types::error::DraftError;

use crate::repository::draft::DraftEngine;
use crate::service::draft::DraftService;

/// Where the session is in its load/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Initial state, before the first load completes.
    Loading,
    Ready,
    /// The last operation failed. Not terminal: later calls may succeed.
    Error,
}

pub struct DraftSession<E: DraftEngine> {
    service: Arc<DraftService<E>>,
    draft_type: String,
    drafts: Vec<DraftRecord>,
    current_draft_id: Option<DraftId>,
    status: SessionStatus,
    error: Option<String>,
}

impl<E: DraftEngine> DraftSession<E> {
    /// Create a session without touching storage. Call [`Self::load_drafts`]
    /// (or use [`Self::start`]) to populate it.
    pub fn new(service: Arc<DraftService<E>>, draft_type: impl Into<String>) -> Self {
        Self {
            service,
            draft_type: draft_type.into(),
            drafts: Vec::new(),
            current_draft_id: None,
            status: SessionStatus::Loading,
            error: None,
        }
    }

    /// Create a session and run the initial load.
    pub async fn start(service: Arc<DraftService<E>>, draft_type: impl Into<String>) -> Self {
        let mut session = Self::new(service, draft_type);
        session.load_drafts().await;
        session
    }

    pub fn draft_type(&self) -> &str {
        &self.draft_type
    }

    /// Cached drafts of this session's type, most recently updated first.
    pub fn drafts(&self) -> &[DraftRecord] {
        &self.drafts
    }

    pub fn current_draft_id(&self) -> Option<&DraftId> {
        self.current_draft_id.as_ref()
    }

    /// The current draft as found in the cached list.
    pub fn current_draft(&self) -> Option<&DraftRecord> {
        let id = self.current_draft_id.as_ref()?;
        self.drafts.iter().find(|d| &d.id == id)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    /// Message from the last failed operation, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refresh the cached list from storage. Returns whether it succeeded.
    pub async fn load_drafts(&mut self) -> bool {
        match self.service.get_all_drafts_by_type(&self.draft_type).await {
            Ok(drafts) => {
                self.drafts = drafts;
                self.mark_ready();
                true
            }
            Err(err) => {
                self.fail("Failed to load drafts", &err);
                false
            }
        }
    }

    /// Save `title`/`data` as the current draft, creating one if there is
    /// none. Adopts the returned id as current and refreshes the list.
    ///
    /// Returns the id on success. A failed refresh after a successful save
    /// still returns the id, with the session in the error state.
    pub async fn save_draft(
        &mut self,
        title: impl Into<String>,
        data: serde_json::Value,
    ) -> Option<DraftId> {
        let draft = NewDraft::new(title, data, self.draft_type.clone());
        match self
            .service
            .save_draft(self.current_draft_id.as_ref(), draft)
            .await
        {
            Ok(id) => {
                if self.current_draft_id.as_ref() != Some(&id) {
                    self.current_draft_id = Some(id.clone());
                }
                self.load_drafts().await;
                Some(id)
            }
            Err(err) => {
                self.fail("Failed to save draft", &err);
                None
            }
        }
    }

    /// Delete a draft, dropping it as current if it was. Returns whether the
    /// delete succeeded.
    pub async fn delete_draft(&mut self, id: &DraftId) -> bool {
        match self.service.delete_draft(id).await {
            Ok(()) => {
                if self.current_draft_id.as_ref() == Some(id) {
                    self.current_draft_id = None;
                }
                self.load_drafts().await;
                true
            }
            Err(err) => {
                self.fail("Failed to delete draft", &err);
                false
            }
        }
    }

    /// Fetch one draft from storage, bypassing the cached list.
    pub async fn get_draft(&mut self, id: &DraftId) -> Option<DraftRecord> {
        match self.service.get_draft_by_id(id).await {
            Ok(draft) => {
                self.mark_ready();
                draft
            }
            Err(err) => {
                self.fail("Failed to get draft", &err);
                None
            }
        }
    }

    /// Point the session at a draft (or at none) without any I/O.
    pub fn set_current_draft_id(&mut self, id: Option<DraftId>) {
        self.current_draft_id = id;
    }

    /// Delete every draft in the store, of every type, and reset the session.
    pub async fn clear_all_drafts(&mut self) -> bool {
        match self.service.clear_all_drafts().await {
            Ok(()) => {
                self.drafts.clear();
                self.current_draft_id = None;
                self.mark_ready();
                true
            }
            Err(err) => {
                self.fail("Failed to clear drafts", &err);
                false
            }
        }
    }

    fn mark_ready(&mut self) {
        self.status = SessionStatus::Ready;
        self.error = None;
    }

    fn fail(&mut self, context: &str, err: &DraftError) {
        warn!(draft_type = %self.draft_type, error = %err, "{context}");
        self.status = SessionStatus::Error;
        self.error = Some(format!("{context}: {err}"));
    }
}
