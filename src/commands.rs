//! Command parsing and dispatch for one connection.
//!
//! Every command is a single request/response exchange except `add`, `edit`,
//! `test` and `play`, which run short interactive dialogues over the same
//! transport. All recoverable errors become exactly one error line; the
//! caller then re-emits the prompt, so the ready signal fires exactly once
//! per command no matter which path was taken.

use thiserror::Error;

use crate::session::{run_session, SessionError};
use crate::store::{QuizDraft, QuizStore, StoreError};
use crate::transport::{Transport, TransportError};

/// Prompt written before each command line is read.
pub const PROMPT: &str = "quiz> ";

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show(Option<String>),
    Add,
    Delete(Option<String>),
    Edit(Option<String>),
    Test(Option<String>),
    Play,
    Credits,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one line. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let name = words.next()?;
        let arg = words.next().map(str::to_string);

        Some(match name.to_lowercase().as_str() {
            "h" | "help" => Command::Help,
            "list" => Command::List,
            "show" => Command::Show(arg),
            "add" => Command::Add,
            "delete" => Command::Delete(arg),
            "edit" => Command::Edit(arg),
            "test" => Command::Test(arg),
            "p" | "play" => Command::Play,
            "credits" => Command::Credits,
            "q" | "quit" => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        })
    }
}

/// Whether the connection keeps accepting commands after this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Recoverable per-command errors. Each is reported as one line and the
/// connection resumes; only the `Transport` variant ends the connection.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing parameter <id>")]
    MissingParameter,

    #[error("the value of parameter <id> is not a number")]
    NotANumber,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<SessionError> for CommandError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Store(e) => CommandError::Store(e),
            SessionError::Transport(e) => CommandError::Transport(e),
        }
    }
}

/// Validate a raw `<id>` argument: absent is a missing parameter, anything
/// unparseable is not a number.
pub fn validate_id(raw: Option<&str>) -> Result<u32, CommandError> {
    match raw {
        None => Err(CommandError::MissingParameter),
        Some(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| CommandError::NotANumber),
    }
}

/// Run one command to completion.
///
/// Transport failures bubble up and end the connection; every other error is
/// reported to the client as a single error line.
pub async fn run_command<T: Transport + ?Sized>(
    command: Command,
    store: &dyn QuizStore,
    transport: &mut T,
    session_seed: u32,
) -> Result<Outcome, TransportError> {
    let result = dispatch(&command, store, transport, session_seed).await;

    match result {
        Ok(outcome) => Ok(outcome),
        Err(CommandError::Transport(e)) => Err(e),
        Err(err) => {
            transport.write_line(&format!("Error: {err}")).await?;
            Ok(Outcome::Continue)
        }
    }
}

async fn dispatch<T: Transport + ?Sized>(
    command: &Command,
    store: &dyn QuizStore,
    transport: &mut T,
    session_seed: u32,
) -> Result<Outcome, CommandError> {
    match command {
        Command::Help => {
            for line in HELP_TEXT {
                transport.write_line(line).await?;
            }
        }

        Command::List => {
            for quiz in store.fetch_all().await? {
                transport
                    .write_line(&format!("[{}]: {}", quiz.id, quiz.question))
                    .await?;
            }
        }

        Command::Show(arg) => {
            let id = validate_id(arg.as_deref())?;
            let quiz = store.get(id).await?;
            transport
                .write_line(&format!("[{}]: {} => {}", quiz.id, quiz.question, quiz.answer))
                .await?;
        }

        Command::Add => {
            let question = transport.prompt_line("Enter a question: ").await?;
            let answer = transport.prompt_line("Enter the answer: ").await?;
            let quiz = store.create(QuizDraft::new(question, answer)).await?;
            transport
                .write_line(&format!("Added: {} => {}", quiz.question, quiz.answer))
                .await?;
        }

        Command::Delete(arg) => {
            let id = validate_id(arg.as_deref())?;
            store.delete(id).await?;
        }

        Command::Edit(arg) => {
            let id = validate_id(arg.as_deref())?;
            // Lookup first so a bad id fails before any prompting.
            store.get(id).await?;
            let question = transport.prompt_line("Enter a question: ").await?;
            let answer = transport.prompt_line("Enter the answer: ").await?;
            let quiz = store.update(id, QuizDraft::new(question, answer)).await?;
            transport
                .write_line(&format!(
                    "Quiz [{}] updated: {} => {}",
                    quiz.id, quiz.question, quiz.answer
                ))
                .await?;
        }

        Command::Test(arg) => {
            let id = validate_id(arg.as_deref())?;
            let quiz = store.get(id).await?;
            let response = transport
                .prompt_line(&format!("{}? ", quiz.question))
                .await?;
            if quiz.accepts(&response) {
                transport.write_line("Correct").await?;
            } else {
                transport.write_line("Incorrect").await?;
            }
        }

        Command::Play => {
            run_session(store, transport, session_seed).await?;
        }

        Command::Credits => {
            transport.write_line("quiz-server").await?;
            transport
                .write_line("A sockets exercise: a quiz CLI served over TCP.")
                .await?;
        }

        Command::Quit => return Ok(Outcome::Quit),

        Command::Unknown(name) => {
            transport
                .write_line(&format!("Unknown command: '{name}'. Type 'help' to list commands."))
                .await?;
        }
    }

    Ok(Outcome::Continue)
}

const HELP_TEXT: &[&str] = &[
    "Commands:",
    "  h|help      - Show this help.",
    "  list        - List the existing quizzes.",
    "  show <id>   - Show the question and the answer of the given quiz.",
    "  add         - Add a new quiz interactively.",
    "  delete <id> - Delete the given quiz.",
    "  edit <id>   - Edit the given quiz.",
    "  test <id>   - Try out the given quiz.",
    "  p|play      - Answer all quizzes in random order until one is missed.",
    "  credits     - Credits.",
    "  q|quit      - Close the session.",
];
