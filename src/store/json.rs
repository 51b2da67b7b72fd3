//! JSON file quiz store.
//!
//! Records live in a single pretty-printed JSON file, loaded once at startup
//! and rewritten after every mutation. The format is internal to this backend.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::store::{QuizDraft, QuizStore, StoreError};
use crate::types::Quiz;

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileContents {
    quizzes: Vec<Quiz>,
}

#[derive(Debug)]
struct Inner {
    next_id: u32,
    quizzes: Vec<Quiz>,
}

/// Quiz store persisted to a JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl JsonStore {
    /// Open a store at `path`. A missing file is treated as an empty store;
    /// the file is created on the first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let quizzes = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<FileContents>(&bytes)?.quizzes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let next_id = quizzes.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        Ok(Self {
            path,
            inner: Mutex::new(Inner { next_id, quizzes }),
        })
    }

    async fn persist(&self, inner: &Inner) -> Result<(), StoreError> {
        let contents = FileContents {
            quizzes: inner.quizzes.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&contents)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl QuizStore for JsonStore {
    async fn fetch_all(&self) -> Result<Vec<Quiz>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.quizzes.clone())
    }

    async fn get(&self, id: u32) -> Result<Quiz, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .quizzes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, draft: QuizDraft) -> Result<Quiz, StoreError> {
        draft.validate()?;
        let mut inner = self.inner.lock().await;
        let quiz = Quiz {
            id: inner.next_id,
            question: draft.question,
            answer: draft.answer,
        };
        inner.next_id += 1;
        inner.quizzes.push(quiz.clone());
        self.persist(&inner).await?;
        Ok(quiz)
    }

    async fn update(&self, id: u32, draft: QuizDraft) -> Result<Quiz, StoreError> {
        draft.validate()?;
        let mut inner = self.inner.lock().await;
        let updated = {
            let quiz = inner
                .quizzes
                .iter_mut()
                .find(|q| q.id == id)
                .ok_or(StoreError::NotFound(id))?;
            quiz.question = draft.question;
            quiz.answer = draft.answer;
            quiz.clone()
        };
        self.persist(&inner).await?;
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let before = inner.quizzes.len();
        inner.quizzes.retain(|q| q.id != id);
        if inner.quizzes.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.persist(&inner).await?;
        Ok(())
    }
}
