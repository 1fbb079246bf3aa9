//! Common types for the Sable compiler frontend.
//!
//! This crate provides foundational types used across all sable crates:
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, `diagnostic_codes`)

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticCategory};
pub use span::Span;
