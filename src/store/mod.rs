//! Quiz store.
//!
//! The store owns the persistent collection of quiz records. The session
//! engine only consumes `fetch_all` (a snapshot); the CRUD commands use the
//! rest. Two backends: an in-memory store and a JSON file store.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Quiz;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("there is no quiz associated to id={0}")]
    NotFound(u32),

    #[error("the quiz is invalid: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Question/answer pair submitted to `create` or `update`, before an id is
/// assigned.
#[derive(Debug, Clone)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Reject blank fields, collecting one message per failing field.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut problems = Vec::new();
        if self.question.trim().is_empty() {
            problems.push("question must not be empty".to_string());
        }
        if self.answer.trim().is_empty() {
            problems.push("answer must not be empty".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(problems))
        }
    }
}

/// Repository contract for quiz records.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Snapshot of every record as of the call. Callers own the returned
    /// vector; later store mutations do not affect it.
    async fn fetch_all(&self) -> Result<Vec<Quiz>, StoreError>;

    /// Fetch one record by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id does not exist.
    async fn get(&self, id: u32) -> Result<Quiz, StoreError>;

    /// Create a record, assigning the next free id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the draft has blank fields.
    async fn create(&self, draft: QuizDraft) -> Result<Quiz, StoreError>;

    /// Replace question and answer of an existing record.
    async fn update(&self, id: u32, draft: QuizDraft) -> Result<Quiz, StoreError>;

    /// Remove a record by id.
    async fn delete(&self, id: u32) -> Result<(), StoreError>;
}
