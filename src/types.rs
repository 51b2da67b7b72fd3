//! Quiz record types shared across the application.

use serde::{Deserialize, Serialize};

/// One question/answer pair, owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

impl Quiz {
    /// Check a response against the stored answer.
    ///
    /// The response is expected to be already trimmed (the transport trims
    /// every incoming line once); comparison is case-insensitive.
    pub fn accepts(&self, response: &str) -> bool {
        response.to_lowercase() == self.answer.to_lowercase()
    }
}
