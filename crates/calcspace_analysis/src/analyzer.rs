//! The analysis entry point.

use calcspace_foundation::{Error, Flags, Result};
use tracing::{debug, warn};

use crate::target::Target;

/// Runs one analysis pass over a loaded target.
///
/// The shell guarantees exactly one [`Action`](calcspace_foundation::Action)
/// is requested in `flags` when this is called, and never calls it
/// re-entrantly. Implementations borrow the target only for the duration of
/// the call.
pub trait Analyzer {
    /// Analyzes `target` according to `flags` and returns the report text.
    ///
    /// # Errors
    ///
    /// Returns an `Analysis` error if the pass cannot be completed.
    fn analyze(&mut self, target: &Target, flags: &Flags) -> Result<String>;
}

/// Reports what a pass was asked to do, without format-specific parsing.
///
/// This is the default analyzer of the `calcspace` binary: it identifies the
/// container and echoes the request and configuration, as a sentence or as
/// tab-separated fields when excel output is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAnalyzer;

impl SummaryAnalyzer {
    /// Creates a new summary analyzer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Analyzer for SummaryAnalyzer {
    fn analyze(&mut self, target: &Target, flags: &Flags) -> Result<String> {
        let Some(action) = flags.action() else {
            return Err(Error::analysis("no analysis pass requested"));
        };

        let kind = target.kind();
        if !kind.is_macho() {
            warn!(target = target.name(), %kind, "target is not a mach-o image");
        }
        debug!(target = target.name(), %action, "running summary pass");

        let yes_no = |b: bool| if b { "yes" } else { "no" };

        if flags.excel_output() {
            return Ok(format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                target.name(),
                kind,
                target.len(),
                action,
                yes_no(flags.all_sections()),
                yes_no(flags.ios_target()),
            ));
        }

        let mut scope = Vec::new();
        if flags.all_sections() {
            scope.push("all sections");
        }
        if flags.ios_target() {
            scope.push("ios");
        }
        let scope = if scope.is_empty() {
            String::new()
        } else {
            format!(" [{}]", scope.join(", "))
        };

        Ok(format!(
            "{}: {} ({}, {} bytes){}",
            target.name(),
            action,
            kind,
            target.len(),
            scope
        ))
    }
}
