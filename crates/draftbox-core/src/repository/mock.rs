//! In-memory `DraftEngine` for service and session tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use draftbox_types::draft::{DraftId, DraftRecord, DraftTypeSummary};
use draftbox_types::error::RepositoryError;

use super::draft::DraftEngine;

/// Cloning shares the underlying map and failure switch, so a test can keep
/// a handle after moving the engine into a service.
#[derive(Clone, Default)]
pub(crate) struct MockEngine {
    records: Arc<Mutex<HashMap<DraftId, DraftRecord>>>,
    failing: Arc<AtomicBool>,
    failing_list: Arc<AtomicBool>,
}

impl MockEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `Unavailable`.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make only `get_all_by_type` fail, leaving reads and writes working.
    pub(crate) fn set_list_failing(&self, failing: bool) {
        self.failing_list.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Unavailable("mock engine offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn sorted(&self, keep: impl Fn(&DraftRecord) -> bool) -> Vec<DraftRecord> {
        let records = self.records.lock().unwrap();
        let mut out: Vec<DraftRecord> = records.values().filter(|r| keep(*r)).cloned().collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        out
    }
}

impl DraftEngine for MockEngine {
    async fn open(&self) -> Result<(), RepositoryError> {
        self.check()
    }

    async fn get(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError> {
        self.check()?;
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn get_all_by_type(&self, draft_type: &str) -> Result<Vec<DraftRecord>, RepositoryError> {
        self.check()?;
        if self.failing_list.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transaction("mock list aborted".to_string()));
        }
        Ok(self.sorted(|r| r.draft_type == draft_type))
    }

    async fn get_all(&self) -> Result<Vec<DraftRecord>, RepositoryError> {
        self.check()?;
        Ok(self.sorted(|_| true))
    }

    async fn get_by_title(
        &self,
        draft_type: &str,
        title: &str,
    ) -> Result<Vec<DraftRecord>, RepositoryError> {
        self.check()?;
        Ok(self.sorted(|r| r.draft_type == draft_type && r.title == title))
    }

    async fn draft_types(&self) -> Result<Vec<DraftTypeSummary>, RepositoryError> {
        self.check()?;
        let mut by_type: HashMap<String, DraftTypeSummary> = HashMap::new();
        for record in self.sorted(|_| true) {
            by_type
                .entry(record.draft_type.clone())
                .and_modify(|s| s.count += 1)
                .or_insert(DraftTypeSummary {
                    draft_type: record.draft_type.clone(),
                    count: 1,
                    last_updated_at: record.updated_at,
                });
        }
        let mut out: Vec<DraftTypeSummary> = by_type.into_values().collect();
        out.sort_by(|a, b| b.last_updated_at.cmp(&a.last_updated_at));
        Ok(out)
    }

    async fn count_by_type(&self, draft_type: &str) -> Result<u64, RepositoryError> {
        self.check()?;
        Ok(self.sorted(|r| r.draft_type == draft_type).len() as u64)
    }

    async fn put(&self, record: &DraftRecord) -> Result<(), RepositoryError> {
        self.check()?;
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &DraftId) -> Result<(), RepositoryError> {
        self.check()?;
        self.records.lock().unwrap().remove(id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.check()?;
        self.records.lock().unwrap().clear();
        Ok(())
    }
}
