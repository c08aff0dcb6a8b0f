//! End-to-end behavior of the draft service and session over SQLite.

use std::sync::Arc;
use std::time::Duration;

use draftbox_core::service::draft::DraftService;
use draftbox_core::session::{DraftSession, SessionStatus};
use draftbox_infra::sqlite::draft::SqliteDraftEngine;
use draftbox_infra::sqlite::pool::PoolSettings;
use draftbox_types::config::MissingDraftPolicy;
use draftbox_types::draft::{DraftId, NewDraft};
use draftbox_types::error::DraftError;
use serde_json::json;

fn sqlite_service(dir: &tempfile::TempDir) -> DraftService<SqliteDraftEngine> {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("drafts.db").display());
    DraftService::new(SqliteDraftEngine::new(PoolSettings::new(url)))
}

#[tokio::test]
async fn save_then_get_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);
    let data = json!({"blocks": [{"type": "h1", "text": "Hello"}], "meta": {"tags": ["a"]}});

    let id = service
        .save_draft(None, NewDraft::new("Draft A", data.clone(), "blog"))
        .await
        .unwrap();
    assert!(!id.as_str().is_empty());

    let record = service.get_draft_by_id(&id).await.unwrap().unwrap();
    assert_eq!(record.title, "Draft A");
    assert_eq!(record.data, data);
    assert_eq!(record.draft_type, "blog");
    assert_eq!(record.created_at, record.updated_at);
}

#[tokio::test]
async fn update_keeps_created_at_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);

    let id = service
        .save_draft(None, NewDraft::new("Draft A", json!({"x": 1}), "blog"))
        .await
        .unwrap();
    let before = service.get_draft_by_id(&id).await.unwrap().unwrap();

    let same = service
        .save_draft(Some(&id), NewDraft::new("Draft A", json!({"x": 2}), "blog"))
        .await
        .unwrap();
    assert_eq!(same, id);

    let after = service.get_draft_by_id(&id).await.unwrap().unwrap();
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.data["x"], 2);
    assert_eq!(service.count_drafts_by_type("blog").await.unwrap(), 1);

    service.delete_draft(&id).await.unwrap();
    assert!(service.get_draft_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_most_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);

    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        ids.push(
            service
                .save_draft(None, NewDraft::new(title, json!({}), "blog"))
                .await
                .unwrap(),
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let listed = service.get_all_drafts_by_type("blog").await.unwrap();
    let listed_ids: Vec<&DraftId> = listed.iter().map(|d| &d.id).collect();
    assert_eq!(listed_ids, vec![&ids[2], &ids[1], &ids[0]]);
    assert!(listed.windows(2).all(|w| w[0].updated_at > w[1].updated_at));

    // Touching the oldest moves it to the front.
    service
        .save_draft(Some(&ids[0]), NewDraft::new("first again", json!({}), "blog"))
        .await
        .unwrap();
    let listed = service.get_all_drafts_by_type("blog").await.unwrap();
    assert_eq!(listed[0].id, ids[0]);
}

#[tokio::test]
async fn delete_twice_and_type_isolation() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);

    let blog = service
        .save_draft(None, NewDraft::new("b", json!({}), "blog"))
        .await
        .unwrap();
    let article = service
        .save_draft(None, NewDraft::new("a", json!({}), "article"))
        .await
        .unwrap();

    assert!(
        service
            .get_all_drafts_by_type("article")
            .await
            .unwrap()
            .iter()
            .all(|d| d.id != blog)
    );

    service.delete_draft(&blog).await.unwrap();
    service.delete_draft(&blog).await.unwrap();
    let remaining = service.get_all_drafts().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, article);
}

#[tokio::test]
async fn clear_all_empties_every_type() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);
    for draft_type in ["blog", "article", "test-series"] {
        service
            .save_draft(None, NewDraft::new("x", json!({}), draft_type))
            .await
            .unwrap();
    }

    service.clear_all_drafts().await.unwrap();

    for draft_type in ["blog", "article", "test-series"] {
        assert!(service.get_all_drafts_by_type(draft_type).await.unwrap().is_empty());
    }
    assert!(service.list_draft_types().await.unwrap().is_empty());
}

#[tokio::test]
async fn stale_id_after_clear_follows_policy() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);
    let id = service
        .save_draft(None, NewDraft::new("x", json!({}), "blog"))
        .await
        .unwrap();
    service.clear_all_drafts().await.unwrap();

    let recreated = service
        .save_draft(Some(&id), NewDraft::new("x", json!({"v": 2}), "blog"))
        .await
        .unwrap();
    assert_ne!(recreated, id);

    let strict = service.with_missing_policy(MissingDraftPolicy::Reject);
    let err = strict
        .save_draft(Some(&id), NewDraft::new("x", json!({}), "blog"))
        .await
        .unwrap_err();
    assert!(matches!(err, DraftError::NotFoundOnUpdate(_)));
}

#[tokio::test]
async fn session_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(sqlite_service(&dir));
    let mut session = DraftSession::start(service.clone(), "blog").await;
    assert_eq!(session.status(), SessionStatus::Ready);

    let id = session.save_draft("Draft A", json!({"x": 1})).await.unwrap();
    let again = session.save_draft("Draft A", json!({"x": 2})).await.unwrap();
    assert_eq!(id, again);
    assert_eq!(session.drafts().len(), 1);
    assert_eq!(session.current_draft().unwrap().data["x"], 2);

    assert!(session.delete_draft(&id).await);
    assert!(session.current_draft_id().is_none());
    assert!(session.get_draft(&id).await.is_none());
    assert_eq!(session.status(), SessionStatus::Ready);
}

#[tokio::test]
async fn unavailable_storage_reaches_session_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("missing").join("drafts.db").display()
    );
    let service = Arc::new(DraftService::new(SqliteDraftEngine::new(PoolSettings::new(url))));

    let err = service.open().await.unwrap_err();
    assert!(matches!(err, DraftError::StorageUnavailable(_)));

    let mut session = DraftSession::start(service, "blog").await;
    assert_eq!(session.status(), SessionStatus::Error);
    assert!(session.save_draft("x", json!({})).await.is_none());
    assert!(session.error().unwrap().starts_with("Failed to save draft"));
}

#[tokio::test]
async fn draft_type_is_fixed_at_creation() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&dir);
    let id = service
        .save_draft(None, NewDraft::new("Post", json!({"x": 1}), "blog"))
        .await
        .unwrap();

    let err = service
        .save_draft(Some(&id), NewDraft::new("Post", json!({"x": 2}), "article"))
        .await
        .unwrap_err();
    assert!(matches!(err, DraftError::InvalidDraft(_)));

    assert_eq!(service.count_drafts_by_type("blog").await.unwrap(), 1);
    assert_eq!(service.count_drafts_by_type("article").await.unwrap(), 0);
    let stored = service.get_draft_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.data, json!({"x": 1}));
}
