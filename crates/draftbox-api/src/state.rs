//! Application state wiring the draft service to its SQLite engine.

use std::path::PathBuf;
use std::sync::Arc;

use draftbox_core::service::draft::DraftService;
use draftbox_infra::config::{load_config, pool_settings, resolve_data_dir};
use draftbox_infra::sqlite::draft::SqliteDraftEngine;
use draftbox_types::config::DraftboxConfig;

/// The service pinned to the concrete infra engine.
pub type ConcreteDraftService = DraftService<SqliteDraftEngine>;

#[derive(Clone)]
pub struct AppState {
    pub draft_service: Arc<ConcreteDraftService>,
    pub config: DraftboxConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load config and open the draft store.
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_in(resolve_data_dir()).await
    }

    pub async fn init_in(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let engine = SqliteDraftEngine::new(pool_settings(&data_dir, &config));
        let draft_service =
            DraftService::new(engine).with_missing_policy(config.on_missing_update);
        draft_service.open().await?;

        Ok(Self {
            draft_service: Arc::new(draft_service),
            config,
            data_dir,
        })
    }
}
