//! Error types for calcspace.
//!
//! Uses `thiserror` for error definitions. Every error the shell can report is
//! recoverable: it is printed and the prompt comes back.

use std::fmt;

use thiserror::Error;

/// A specialized `Result` for calcspace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for calcspace operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand(name.into()))
    }

    /// Creates a missing argument error.
    #[must_use]
    pub fn missing_argument(command: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingArgument {
            command: command.into(),
            expected: expected.into(),
        })
    }

    /// Creates a target-not-configured error.
    #[must_use]
    pub fn target_not_configured() -> Self {
        Self::new(ErrorKind::TargetNotConfigured)
    }

    /// Creates a history expansion error.
    #[must_use]
    pub fn history_expansion(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HistoryExpansion(message.into()))
    }

    /// Creates a target load error.
    #[must_use]
    pub fn target_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::TargetLoad {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Creates an analysis error.
    #[must_use]
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Analysis(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if the error was caused by user input rather than by a
    /// collaborator or the terminal.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnknownCommand(_)
                | ErrorKind::MissingArgument { .. }
                | ErrorKind::TargetNotConfigured
                | ErrorKind::HistoryExpansion(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The command word is not in the registry.
    #[error("{0}: No such command for calcspace.")]
    UnknownCommand(String),

    /// A command was invoked without a required argument.
    #[error("{command}: missing argument, expected {expected}")]
    MissingArgument {
        /// The command that was invoked.
        command: String,
        /// Description of the expected argument.
        expected: String,
    },

    /// An analysis command ran before any target was loaded.
    #[error("target not configured, use `target <path>' first")]
    TargetNotConfigured,

    /// Bang-history expansion failed.
    #[error("{0}")]
    HistoryExpansion(String),

    /// The target loader could not produce a buffer.
    #[error("failed to load target {path}: {reason}")]
    TargetLoad {
        /// The path that was requested.
        path: String,
        /// Why loading failed.
        reason: String,
    },

    /// The analyzer reported a failure.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// Internal error (terminal or editor failure).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command being executed.
    pub command: Option<String>,
    /// The raw input line.
    pub line: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets the input line.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.command, &self.line) {
            (Some(command), Some(line)) => write!(f, "in `{command}' ({line})"),
            (Some(command), None) => write!(f, "in `{command}'"),
            (None, Some(line)) => write!(f, "at `{line}'"),
            (None, None) => Ok(()),
        }
    }
}
