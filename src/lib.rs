//! Multi-user socket quiz tool.
//!
//! Clients connect over TCP and talk a line-oriented text protocol: one
//! command per line (`help`, `list`, `show <id>`, `add`, `delete <id>`,
//! `edit <id>`, `test <id>`, `play`, `credits`, `quit`). The interesting part
//! is the `play` session in [`session`]: an asynchronous ask/check/score loop
//! that draws unanswered questions at random until one is missed or all are
//! exhausted. Each connection runs fully isolated sessions against its own
//! snapshot of the quiz store.

pub mod commands;
pub mod server;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;
