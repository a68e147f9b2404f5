//! Line tokenizing and command dispatch.

use calcspace_foundation::{Error, ErrorContext, Result};
use tracing::debug;

use crate::registry::{Context, Outcome};

/// Splits a line into its command word and the rest of the line.
///
/// The rest starts at the first non-whitespace character after the word and
/// runs to the end of the line untouched. Returns `None` for a blank line.
#[must_use]
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }
    let end = line.find(char::is_whitespace).unwrap_or(line.len());
    let (word, rest) = line.split_at(end);
    Some((word, rest.trim_start()))
}

/// Looks up the command word of `line` and runs its handler.
///
/// A blank line is a no-op.
///
/// # Errors
///
/// Returns `UnknownCommand` if the word is not registered, or the handler's
/// error with the command name attached as context.
pub fn execute(ctx: &mut Context<'_>, line: &str) -> Result<Outcome> {
    let Some((word, arg)) = split_line(line) else {
        return Ok(Outcome::Silent);
    };

    let registry = ctx.registry;
    let Some(command) = registry.lookup(word) else {
        debug!(word, "unknown command");
        return Err(Error::unknown_command(word));
    };

    debug!(command = command.name(), arg, "dispatching");
    command.handle(ctx, arg).map_err(|e| {
        if e.context.is_some() {
            e
        } else {
            e.with_context(ErrorContext::new().with_command(command.name()).with_line(line))
        }
    })
}
