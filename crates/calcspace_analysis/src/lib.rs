//! Target loading and analysis for calcspace.
//!
//! The shell never inspects binaries itself. It talks to two collaborators:
//! - [`TargetLoader`] - turns a path into an owned [`Target`] buffer
//! - [`Analyzer`] - runs one analysis pass over a borrowed target
//!
//! [`FileLoader`] and [`SummaryAnalyzer`] are the defaults used by the
//! `calcspace` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analyzer;
pub mod image;
pub mod target;

pub use analyzer::{Analyzer, SummaryAnalyzer};
pub use image::ImageKind;
pub use target::{FileLoader, Target, TargetLoader};
