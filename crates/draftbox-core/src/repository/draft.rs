//! Draft engine trait definition.

use std::future::Future;

use draftbox_types::draft::{DraftId, DraftRecord, DraftTypeSummary};
use draftbox_types::error::RepositoryError;

/// Durable, asynchronous storage of draft records.
///
/// Records are keyed by `id` and indexed by `title`, `draft_type` and
/// `updated_at`. The engine never allocates ids and never inspects `data`.
/// Every query that returns several records orders them by `updated_at`
/// descending (most recently touched first).
///
/// Uses RPITIT (return position `impl Trait` in traits) like the other
/// async traits in this workspace.
pub trait DraftEngine: Send + Sync {
    /// Ensure the backing collection and its indexes exist.
    ///
    /// Idempotent and safe to call concurrently. Never destroys existing
    /// data. Every other operation opens on demand, so calling this first
    /// is optional.
    fn open(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Point lookup. `Ok(None)` means the lookup succeeded and nothing is
    /// stored under `id`.
    fn get(
        &self,
        id: &DraftId,
    ) -> impl Future<Output = Result<Option<DraftRecord>, RepositoryError>> + Send;

    /// All records of one draft type. Empty when none match.
    fn get_all_by_type(
        &self,
        draft_type: &str,
    ) -> impl Future<Output = Result<Vec<DraftRecord>, RepositoryError>> + Send;

    /// All records across every draft type.
    fn get_all(&self) -> impl Future<Output = Result<Vec<DraftRecord>, RepositoryError>> + Send;

    /// Records of one draft type whose title matches exactly.
    fn get_by_title(
        &self,
        draft_type: &str,
        title: &str,
    ) -> impl Future<Output = Result<Vec<DraftRecord>, RepositoryError>> + Send;

    /// Distinct draft types with their record counts, most recently
    /// touched type first.
    fn draft_types(
        &self,
    ) -> impl Future<Output = Result<Vec<DraftTypeSummary>, RepositoryError>> + Send;

    fn count_by_type(
        &self,
        draft_type: &str,
    ) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    /// Insert or replace the record stored under `record.id`.
    fn put(
        &self,
        record: &DraftRecord,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove a record. No-op if it does not exist.
    fn delete(&self, id: &DraftId) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove every record of every type.
    fn clear(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
