//! calcspace - interactive shell for calculating free space in binaries
//!
//! This crate re-exports all layers of the calcspace system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: calcspace_shell      — Session, commands, history, completion, CLI
//! Layer 1: calcspace_analysis   — Target loading and analysis collaborators
//! Layer 0: calcspace_foundation — Core types (Error, Flags)
//! ```

pub use calcspace_analysis as analysis;
pub use calcspace_foundation as foundation;
pub use calcspace_shell as shell;
