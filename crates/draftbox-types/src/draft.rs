use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// Opaque identifier of a draft record.
///
/// New ids are UUID v7 strings (time-sortable with a random tail), but any
/// string is accepted so that ids held by callers from older stores can still
/// be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    /// Allocate a fresh, unique id.
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DraftId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DraftId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for DraftId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A persisted draft.
///
/// `data` is owned by the caller and never inspected by the store.
/// `created_at` is fixed at first insert; `updated_at` moves on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub id: DraftId,
    /// Human label, not unique.
    pub title: String,
    pub data: serde_json::Value,
    /// Caller-defined partition key (e.g. "blog", "article").
    pub draft_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied part of a draft save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDraft {
    pub title: String,
    pub data: serde_json::Value,
    pub draft_type: String,
}

impl NewDraft {
    pub fn new(
        title: impl Into<String>,
        data: serde_json::Value,
        draft_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            data,
            draft_type: draft_type.into(),
        }
    }
}

/// Per-type aggregate used for listing which draft types exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftTypeSummary {
    pub draft_type: String,
    pub count: u64,
    /// Most recent `updated_at` among the type's drafts.
    pub last_updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = DraftId::new();
        let b = DraftId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_foreign_id_is_accepted_verbatim() {
        let id = DraftId::from("1712345678901");
        assert_eq!(id.to_string(), "1712345678901");
    }

    #[test]
    fn test_draft_id_serializes_as_plain_string() {
        let id = DraftId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let now = Utc::now();
        let record = DraftRecord {
            id: DraftId::new(),
            title: "Draft A".to_string(),
            data: serde_json::json!({"x": 1, "nested": {"tags": ["a", "b"]}}),
            draft_type: "blog".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: DraftRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
