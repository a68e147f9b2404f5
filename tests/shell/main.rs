//! Integration tests for the calcspace shell
//!
//! Drives full sessions through scripted input and checks session state,
//! analyzer calls, and history behavior.

mod help;
mod history;
mod properties;
mod session_flow;
mod support;
