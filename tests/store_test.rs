//! Integration tests for the JSON file store: persistence across reopen,
//! id assignment after reload, and validation surfaced through the trait.

use quiz_server::store::{JsonStore, QuizDraft, QuizStore, StoreError};

#[tokio::test]
async fn open_missing_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");

    let store = JsonStore::open(&path).await.unwrap();
    assert!(store.fetch_all().await.unwrap().is_empty());
    // No mutation yet, so no file either.
    assert!(!path.exists());
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");

    {
        let store = JsonStore::open(&path).await.unwrap();
        store.create(QuizDraft::new("2+2", "4")).await.unwrap();
        store
            .create(QuizDraft::new("Capital of France", "Paris"))
            .await
            .unwrap();
    }

    let store = JsonStore::open(&path).await.unwrap();
    let quizzes = store.fetch_all().await.unwrap();
    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0].question, "2+2");
    assert_eq!(quizzes[1].answer, "Paris");
}

#[tokio::test]
async fn id_assignment_continues_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");

    {
        let store = JsonStore::open(&path).await.unwrap();
        store.create(QuizDraft::new("q1", "a1")).await.unwrap();
        store.create(QuizDraft::new("q2", "a2")).await.unwrap();
        store.delete(1).await.unwrap();
    }

    // Highest surviving id is 2, so the next create gets 3. Deleted ids are
    // never reused within a generation.
    let store = JsonStore::open(&path).await.unwrap();
    let quiz = store.create(QuizDraft::new("q3", "a3")).await.unwrap();
    assert_eq!(quiz.id, 3);
}

#[tokio::test]
async fn update_persists_and_delete_removes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");

    {
        let store = JsonStore::open(&path).await.unwrap();
        store.create(QuizDraft::new("q1", "a1")).await.unwrap();
        store.create(QuizDraft::new("q2", "a2")).await.unwrap();
        store
            .update(1, QuizDraft::new("q1 edited", "a1 edited"))
            .await
            .unwrap();
        store.delete(2).await.unwrap();
    }

    let store = JsonStore::open(&path).await.unwrap();
    let quizzes = store.fetch_all().await.unwrap();
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].question, "q1 edited");

    match store.get(2).await {
        Err(StoreError::NotFound(2)) => {}
        other => panic!("expected NotFound(2), got {other:?}"),
    }
}

#[tokio::test]
async fn create_rejects_blank_draft_without_touching_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");

    let store = JsonStore::open(&path).await.unwrap();
    let err = store.create(QuizDraft::new("", "   ")).await.unwrap_err();

    match err {
        StoreError::Validation(problems) => assert_eq!(problems.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");

    let store = JsonStore::open(&path).await.unwrap();
    match store.update(9, QuizDraft::new("q", "a")).await {
        Err(StoreError::NotFound(9)) => {}
        other => panic!("expected NotFound(9), got {other:?}"),
    }
}

#[tokio::test]
async fn corrupt_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizzes.json");
    tokio::fs::write(&path, b"this is not json").await.unwrap();

    match JsonStore::open(&path).await {
        Err(StoreError::Serialization(_)) => {}
        other => panic!("expected serialization error, got {other:?}"),
    }
}
