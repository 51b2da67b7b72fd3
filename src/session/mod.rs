//! Quiz session engine.
//!
//! One session runs one complete `play` attempt for one connection: snapshot
//! the store, repeatedly draw an unasked question uniformly at random, ask it
//! over the transport, and either continue (correct) or stop (incorrect or
//! exhausted). The working set shrinks in place on every correct answer and
//! the next draw always ranges over the current size, so no question is ever
//! asked twice and remaining indices stay valid.
//!
//! A single wrong answer ends the whole attempt. That is deliberate
//! all-or-nothing scoring, not a skip.

pub mod rng;

pub use rng::SessionRng;

use thiserror::Error;

use crate::store::{QuizStore, StoreError};
use crate::transport::{Transport, TransportError};
use crate::types::Quiz;

/// Failures that abort a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every question was answered correctly, or there was nothing to ask.
    Exhausted { score: u32 },
    /// The first wrong answer ended the attempt.
    Missed { score: u32 },
}

impl SessionEnd {
    pub fn score(&self) -> u32 {
        match self {
            SessionEnd::Exhausted { score } | SessionEnd::Missed { score } => *score,
        }
    }
}

/// Outcome of judging one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct { score: u32 },
    Incorrect { score: u32 },
}

/// Session state: the score so far and the working set of questions not yet
/// answered correctly in this session.
#[derive(Debug, Clone)]
pub struct QuizSession {
    score: u32,
    remaining: Vec<Quiz>,
    rng: SessionRng,
    /// Index of the question drawn by the last `draw`, consumed by `judge`.
    current: Option<usize>,
}

impl QuizSession {
    /// Start a session over a snapshot of the store.
    pub fn new(snapshot: Vec<Quiz>, seed: u32) -> Self {
        Self {
            score: 0,
            remaining: snapshot,
            rng: SessionRng::new(seed),
            current: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Draw the next question uniformly at random from the working set, or
    /// `None` when the set is exhausted. Each call re-draws over the current
    /// size; a previously drawn index is never reused.
    pub fn draw(&mut self) -> Option<Quiz> {
        if self.remaining.is_empty() {
            self.current = None;
            return None;
        }
        let index = self.rng.next_range(self.remaining.len() as u32) as usize;
        // The draw ranges over the current size, so the index is always valid.
        // Kept as a defensive invariant check, not user-facing validation.
        debug_assert!(index < self.remaining.len(), "drawn index out of range");
        self.current = Some(index);
        Some(self.remaining[index].clone())
    }

    /// Judge a trimmed response against the question drawn last. On a correct
    /// answer the question is removed from the working set and the score
    /// increments by exactly one; on a wrong answer the state is untouched.
    pub fn judge(&mut self, response: &str) -> Verdict {
        debug_assert!(self.current.is_some(), "judge called without a draw");
        match self.current.take() {
            Some(index) if self.remaining[index].accepts(response) => {
                self.score += 1;
                self.remaining.remove(index);
                Verdict::Correct { score: self.score }
            }
            _ => Verdict::Incorrect { score: self.score },
        }
    }
}

/// Run one complete play session over a transport.
///
/// Fetches the full store once (later store mutations do not affect the
/// running session), then loops draw/ask/judge until a miss or exhaustion.
/// The only suspension point per iteration is awaiting the answer line.
pub async fn run_session<T: Transport + ?Sized>(
    store: &dyn QuizStore,
    transport: &mut T,
    seed: u32,
) -> Result<SessionEnd, SessionError> {
    let snapshot = store.fetch_all().await?;
    let mut session = QuizSession::new(snapshot, seed);

    loop {
        let Some(quiz) = session.draw() else {
            let score = session.score();
            transport.write_line("There is nothing left to ask.").await?;
            transport
                .write_line(&format!("End of quiz. Score: {score}"))
                .await?;
            return Ok(SessionEnd::Exhausted { score });
        };

        let response = transport
            .prompt_line(&format!("{}? ", quiz.question))
            .await?;

        match session.judge(&response) {
            Verdict::Correct { score } => {
                transport
                    .write_line(&format!("Correct - score so far: {score}"))
                    .await?;
            }
            Verdict::Incorrect { score } => {
                transport.write_line("Incorrect.").await?;
                transport
                    .write_line(&format!("End of quiz. Score: {score}"))
                    .await?;
                return Ok(SessionEnd::Missed { score });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> Vec<Quiz> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (question, answer))| Quiz {
                id: i as u32 + 1,
                question: question.to_string(),
                answer: answer.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_no_question_repeats_within_a_session() {
        let quizzes = snapshot(&[("q1", "a"), ("q2", "a"), ("q3", "a"), ("q4", "a")]);
        let mut session = QuizSession::new(quizzes, 42);

        let mut asked = Vec::new();
        while let Some(quiz) = session.draw() {
            asked.push(quiz.question.clone());
            assert_eq!(session.judge("a"), Verdict::Correct { score: asked.len() as u32 });
        }

        asked.sort();
        asked.dedup();
        assert_eq!(asked.len(), 4);
        assert_eq!(session.score(), 4);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_score_counts_correct_answers_exactly() {
        let quizzes = snapshot(&[("q1", "a"), ("q2", "a"), ("q3", "a")]);
        let mut session = QuizSession::new(quizzes, 7);

        let mut last = 0;
        for expected in 1..=3u32 {
            session.draw().unwrap();
            let verdict = session.judge("a");
            assert_eq!(verdict, Verdict::Correct { score: expected });
            assert!(expected > last);
            last = expected;
        }
    }

    #[test]
    fn test_wrong_answer_leaves_state_untouched() {
        let quizzes = snapshot(&[("q1", "right")]);
        let mut session = QuizSession::new(quizzes, 1);

        session.draw().unwrap();
        assert_eq!(session.judge("wrong"), Verdict::Incorrect { score: 0 });
        assert_eq!(session.score(), 0);
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn test_draw_on_empty_set_returns_none() {
        let mut session = QuizSession::new(Vec::new(), 9);
        assert!(session.draw().is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_same_seed_draws_same_order() {
        let quizzes = snapshot(&[("q1", "a"), ("q2", "a"), ("q3", "a"), ("q4", "a"), ("q5", "a")]);
        let mut a = QuizSession::new(quizzes.clone(), 12345);
        let mut b = QuizSession::new(quizzes, 12345);

        for _ in 0..5 {
            let qa = a.draw().unwrap();
            let qb = b.draw().unwrap();
            assert_eq!(qa.question, qb.question);
            a.judge("a");
            b.judge("a");
        }
    }
}
