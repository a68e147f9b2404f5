//! Core types for calcspace.
//!
//! This crate provides:
//! - [`Error`] - Error type with categorized [`ErrorKind`]s
//! - [`Flags`] - The analysis flag set carried by a shell session
//! - [`Action`] and [`Setting`] - One-shot analysis requests and persistent toggles

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod flags;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use flags::{Action, Flags, Setting};
