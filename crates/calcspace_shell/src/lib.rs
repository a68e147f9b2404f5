//! Interactive shell and CLI for calcspace.
//!
//! This crate provides:
//! - [`Shell`] - The prompt loop driving a [`Session`]
//! - [`Registry`] - Named command handlers and their documentation
//! - [`History`] - Bounded line history with bang expansion
//! - [`CommandCompleter`] - Command-name completion for the line editor

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod completion;
pub mod dispatch;
pub mod editor;
pub mod history;
pub mod registry;
pub mod session;
pub mod shell;

pub use completion::{CommandCompleter, Completions};
pub use dispatch::split_line;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use history::{Expansion, HISTORY_CAPACITY, History};
pub use registry::{Category, Command, Context, Handler, Outcome, Registry};
pub use session::Session;
pub use shell::Shell;
