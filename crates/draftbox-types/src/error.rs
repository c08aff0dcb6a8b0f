use thiserror::Error;

use crate::draft::DraftId;

/// Errors from draft engine operations (used by the trait in draftbox-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage engine cannot be opened or used at all: disabled, out of
    /// space, unreadable file, or a failed schema migration.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A single read or write aborted. The store is left as it was before
    /// the operation.
    #[error("transaction failed: {0}")]
    Transaction(String),

    /// A stored row could not be decoded back into a record.
    #[error("corrupt record '{id}': {reason}")]
    Corrupt { id: String, reason: String },
}

/// Errors surfaced by the draft service.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("transaction failed: {0}")]
    TransactionFailure(String),

    /// Only returned when the service is configured to reject updates
    /// against vanished ids; the default policy re-creates the draft.
    #[error("draft '{0}' not found")]
    NotFoundOnUpdate(DraftId),

    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    #[error("corrupt draft '{id}': {reason}")]
    CorruptRecord { id: String, reason: String },
}

impl From<RepositoryError> for DraftError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(msg) => DraftError::StorageUnavailable(msg),
            RepositoryError::Transaction(msg) => DraftError::TransactionFailure(msg),
            RepositoryError::Corrupt { id, reason } => DraftError::CorruptRecord { id, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Transaction("disk I/O error".to_string());
        assert_eq!(err.to_string(), "transaction failed: disk I/O error");
    }

    #[test]
    fn test_unavailable_maps_to_storage_unavailable() {
        let err: DraftError = RepositoryError::Unavailable("quota".to_string()).into();
        assert!(matches!(err, DraftError::StorageUnavailable(ref m) if m == "quota"));
    }

    #[test]
    fn test_corrupt_maps_with_id() {
        let err: DraftError = RepositoryError::Corrupt {
            id: "abc".to_string(),
            reason: "invalid datetime".to_string(),
        }
        .into();
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("invalid datetime"));
    }

    #[test]
    fn test_not_found_on_update_display() {
        let err = DraftError::NotFoundOnUpdate(DraftId::from("gone"));
        assert_eq!(err.to_string(), "draft 'gone' not found");
    }
}
