//! Session state for the shell.
//!
//! The session holds the loaded target and the flag set. It lives for the
//! whole process and is passed by reference to every command handler.

use calcspace_analysis::{Analyzer, Target};
use calcspace_foundation::{Action, Error, Flags, Result};
use tracing::debug;

/// Display name used in the prompt while no target is loaded.
pub const NO_TARGET: &str = "None";

/// Session state for an interactive shell session.
#[derive(Debug, Default)]
pub struct Session {
    /// The currently loaded target, if any.
    target: Option<Target>,

    /// Settings and the pending action.
    flags: Flags,
}

impl Session {
    /// Creates a new session with no target and all flags disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new session with the given initial settings.
    ///
    /// Any pending action in `flags` is discarded.
    #[must_use]
    pub fn with_flags(mut flags: Flags) -> Self {
        flags.reset_actions();
        Self {
            target: None,
            flags,
        }
    }

    /// Returns the loaded target.
    #[must_use]
    pub const fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Returns true if a target is loaded.
    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Replaces the loaded target, returning the previous one.
    pub fn set_target(&mut self, target: Target) -> Option<Target> {
        self.target.replace(target)
    }

    /// Name shown in the prompt.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.target.as_ref().map_or(NO_TARGET, Target::name)
    }

    /// Returns the current flags.
    #[must_use]
    pub const fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Returns a mutable reference to the flags.
    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    /// Runs a one-shot analysis pass on the loaded target.
    ///
    /// Requests `action`, hands the target and flags to `analyzer`, then
    /// clears the request whether or not the pass succeeded.
    ///
    /// # Errors
    ///
    /// Returns `TargetNotConfigured` without calling the analyzer if no target
    /// is loaded, or whatever error the analyzer reports.
    pub fn run_action(&mut self, action: Action, analyzer: &mut dyn Analyzer) -> Result<String> {
        let Some(target) = &self.target else {
            return Err(Error::target_not_configured());
        };

        self.flags.request(action);
        debug!(target = target.name(), %action, "starting analysis pass");
        let report = analyzer.analyze(target, &self.flags);
        self.flags.reset_actions();

        report
    }
}
