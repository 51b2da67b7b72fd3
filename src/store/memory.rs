//! In-memory quiz store, used by tests and as a fallback backend.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::store::{QuizDraft, QuizStore, StoreError};
use crate::types::Quiz;

#[derive(Debug)]
struct Inner {
    next_id: u32,
    quizzes: Vec<Quiz>,
}

/// Mutex-protected store with no persistence.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                quizzes: Vec::new(),
            }),
        }
    }

    /// Seed a store from question/answer pairs; ids are assigned in order
    /// starting at 1.
    pub fn with_quizzes(pairs: &[(&str, &str)]) -> Self {
        let quizzes: Vec<Quiz> = pairs
            .iter()
            .enumerate()
            .map(|(i, (question, answer))| Quiz {
                id: i as u32 + 1,
                question: question.to_string(),
                answer: answer.to_string(),
            })
            .collect();
        Self {
            inner: Mutex::new(Inner {
                next_id: quizzes.len() as u32 + 1,
                quizzes,
            }),
        }
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
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
        Ok(quiz)
    }

    async fn update(&self, id: u32, draft: QuizDraft) -> Result<Quiz, StoreError> {
        draft.validate()?;
        let mut inner = self.inner.lock().await;
        let quiz = inner
            .quizzes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;
        quiz.question = draft.question;
        quiz.answer = draft.answer;
        Ok(quiz.clone())
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let before = inner.quizzes.len();
        inner.quizzes.retain(|q| q.id != id);
        if inner.quizzes.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
