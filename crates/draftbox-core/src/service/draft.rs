//! Draft service.
//!
//! Turns "save this draft under this type, with this id or none" into the
//! right engine operation: insert with a fresh id, or replace the stored
//! record while keeping its `created_at`.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use draftbox_types::config::MissingDraftPolicy;
use draftbox_types::draft::{DraftId, DraftRecord, DraftTypeSummary, NewDraft};
use draftbox_types::error::DraftError;

use crate::repository::draft::DraftEngine;

/// Create-or-update logic and queries over a `DraftEngine`.
pub struct DraftService<E: DraftEngine> {
    engine: E,
    missing_policy: MissingDraftPolicy,
}

impl<E: DraftEngine> DraftService<E> {
    /// Create a service that re-creates drafts saved against vanished ids.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            missing_policy: MissingDraftPolicy::default(),
        }
    }

    pub fn with_missing_policy(mut self, policy: MissingDraftPolicy) -> Self {
        self.missing_policy = policy;
        self
    }

    pub fn missing_policy(&self) -> MissingDraftPolicy {
        self.missing_policy
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Ensure the underlying store exists. Optional; every call opens on demand.
    pub async fn open(&self) -> Result<(), DraftError> {
        self.engine.open().await?;
        Ok(())
    }

    /// Save a draft and return the id it is stored under.
    ///
    /// - `id` is `None`: insert under a new id with `created_at == updated_at`.
    /// - `id` names a stored draft of the same type: replace title and data,
    ///   keep `created_at`, move `updated_at` strictly forward. A draft never
    ///   changes type; naming a draft of another type is `InvalidDraft`.
    /// - `id` names nothing: depending on the missing-id policy, insert under
    ///   a new id or fail with `NotFoundOnUpdate`.
    pub async fn save_draft(
        &self,
        id: Option<&DraftId>,
        draft: NewDraft,
    ) -> Result<DraftId, DraftError> {
        if draft.draft_type.trim().is_empty() {
            return Err(DraftError::InvalidDraft(
                "draft type cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();

        if let Some(id) = id {
            match self.engine.get(id).await? {
                Some(existing) => {
                    if existing.draft_type != draft.draft_type {
                        return Err(DraftError::InvalidDraft(format!(
                            "draft '{}' is of type '{}', not '{}'",
                            existing.id, existing.draft_type, draft.draft_type
                        )));
                    }
                    let record = DraftRecord {
                        id: existing.id,
                        title: draft.title,
                        data: draft.data,
                        draft_type: existing.draft_type,
                        created_at: existing.created_at,
                        updated_at: next_updated_at(existing.updated_at, now),
                    };
                    self.engine.put(&record).await?;
                    info!(draft_id = %record.id, draft_type = %record.draft_type, "updated draft");
                    return Ok(record.id);
                }
                None => match self.missing_policy {
                    MissingDraftPolicy::Reject => {
                        return Err(DraftError::NotFoundOnUpdate(id.clone()));
                    }
                    MissingDraftPolicy::Recreate => {
                        warn!(draft_id = %id, "draft vanished before update, saving as new");
                    }
                },
            }
        }

        let record = DraftRecord {
            id: DraftId::new(),
            title: draft.title,
            data: draft.data,
            draft_type: draft.draft_type,
            created_at: now,
            updated_at: now,
        };
        self.engine.put(&record).await?;
        info!(draft_id = %record.id, draft_type = %record.draft_type, "created draft");
        Ok(record.id)
    }

    pub async fn get_draft_by_id(&self, id: &DraftId) -> Result<Option<DraftRecord>, DraftError> {
        Ok(self.engine.get(id).await?)
    }

    /// Drafts of one type, most recently updated first.
    pub async fn get_all_drafts_by_type(
        &self,
        draft_type: &str,
    ) -> Result<Vec<DraftRecord>, DraftError> {
        let drafts = self.engine.get_all_by_type(draft_type).await?;
        debug!(draft_type, count = drafts.len(), "listed drafts");
        Ok(drafts)
    }

    pub async fn get_all_drafts(&self) -> Result<Vec<DraftRecord>, DraftError> {
        Ok(self.engine.get_all().await?)
    }

    pub async fn find_drafts_by_title(
        &self,
        draft_type: &str,
        title: &str,
    ) -> Result<Vec<DraftRecord>, DraftError> {
        Ok(self.engine.get_by_title(draft_type, title).await?)
    }

    pub async fn list_draft_types(&self) -> Result<Vec<DraftTypeSummary>, DraftError> {
        Ok(self.engine.draft_types().await?)
    }

    pub async fn count_drafts_by_type(&self, draft_type: &str) -> Result<u64, DraftError> {
        Ok(self.engine.count_by_type(draft_type).await?)
    }

    /// Delete a draft. Deleting an unknown id succeeds.
    pub async fn delete_draft(&self, id: &DraftId) -> Result<(), DraftError> {
        self.engine.delete(id).await?;
        info!(draft_id = %id, "deleted draft");
        Ok(())
    }

    /// Delete every draft of every type.
    pub async fn clear_all_drafts(&self) -> Result<(), DraftError> {
        self.engine.clear().await?;
        info!("cleared all drafts");
        Ok(())
    }
}

/// `updated_at` for a replacement record: the current time, but never at or
/// before the previous value, even if the clock is coarse or went backwards.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
