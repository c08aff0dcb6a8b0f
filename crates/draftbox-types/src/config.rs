//! Configuration types for draftbox.
//!
//! `DraftboxConfig` is the top-level `config.toml` that controls where drafts
//! are stored and how the service treats saves against vanished ids.

use serde::{Deserialize, Serialize};

/// What to do when a save names an id that no longer exists in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDraftPolicy {
    /// Insert a new draft under a freshly allocated id.
    #[default]
    Recreate,
    /// Fail with `DraftError::NotFoundOnUpdate`.
    Reject,
}

/// Top-level configuration.
///
/// Loaded from `~/.draftbox/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftboxConfig {
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    #[serde(default)]
    pub on_missing_update: MissingDraftPolicy,

    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// Size of the read-only connection pool.
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,
}

fn default_database_file() -> String {
    "drafts.db".to_string()
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_max_readers() -> u32 {
    8
}

impl Default for DraftboxConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            on_missing_update: MissingDraftPolicy::default(),
            busy_timeout_secs: default_busy_timeout_secs(),
            max_readers: default_max_readers(),
        }
    }
}
