//! The command registry.
//!
//! Commands are registered once at startup and looked up by exact name. The
//! registration order is significant: it drives help listings and completion
//! candidates, and the first match wins on lookup.

use std::fmt;

use calcspace_analysis::{Analyzer, TargetLoader};
use calcspace_foundation::{Error, Result};

use crate::session::Session;

/// Whether a command runs something or flips a persistent setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// One-shot command.
    Action,
    /// Toggles a persistent setting.
    Configuration,
}

/// What the shell should do after a command returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to print.
    Silent,
    /// Print this text and continue.
    Message(String),
    /// Print this farewell and stop the shell.
    Exit(String),
}

/// Everything a handler may touch while it runs.
pub struct Context<'a> {
    /// The shell session.
    pub session: &'a mut Session,
    /// Loader used by the `target` command.
    pub loader: &'a dyn TargetLoader,
    /// Analyzer used by the analysis commands.
    pub analyzer: &'a mut dyn Analyzer,
    /// The registry the command was found in.
    pub registry: &'a Registry,
}

/// A command implementation.
///
/// Handlers validate their own argument and return a typed [`Outcome`]
/// instead of printing.
pub trait Handler {
    /// Runs the command with its raw argument string.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is invalid, a precondition does not
    /// hold, or a collaborator fails.
    fn handle(&self, ctx: &mut Context<'_>, arg: &str) -> Result<Outcome>;
}

impl<F> Handler for F
where
    F: Fn(&mut Context<'_>, &str) -> Result<Outcome>,
{
    fn handle(&self, ctx: &mut Context<'_>, arg: &str) -> Result<Outcome> {
        self(ctx, arg)
    }
}

/// A registered command.
pub struct Command {
    name: &'static str,
    handler: Box<dyn Handler>,
    doc: &'static str,
    category: Category,
}

impl Command {
    /// Creates a new command.
    pub fn new(
        name: &'static str,
        handler: impl Handler + 'static,
        doc: &'static str,
        category: Category,
    ) -> Self {
        Self {
            name,
            handler: Box::new(handler),
            doc,
            category,
        }
    }

    /// The name typed to invoke the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description.
    #[must_use]
    pub const fn doc(&self) -> &'static str {
        self.doc
    }

    /// The command's category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Invokes the handler.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error.
    pub fn handle(&self, ctx: &mut Context<'_>, arg: &str) -> Result<Outcome> {
        self.handler.handle(ctx, arg)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Ordered table of commands.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command at the end of the table.
    ///
    /// # Errors
    ///
    /// Returns an error if a command with the same name is already registered.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.lookup(command.name).is_some() {
            return Err(Error::internal(format!(
                "command `{}' registered twice",
                command.name
            )));
        }
        self.commands.push(command);
        Ok(())
    }

    /// Adds a command known to have a fresh name.
    pub(crate) fn insert(&mut self, command: Command) {
        debug_assert!(self.lookup(command.name).is_none(), "duplicate command");
        self.commands.push(command);
    }

    /// Finds a command by exact name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Iterates over the commands of one category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(move |c| c.category == category)
    }

    /// All command names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(Command::name).collect()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
