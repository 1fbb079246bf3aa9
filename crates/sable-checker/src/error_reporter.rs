//! Diagnostic emission helpers.
//!
//! Free functions rather than `CheckerState` methods: resolution code holds
//! disjoint borrows of the arena and the sink, and a `&mut self` helper
//! would collide with them.

use sable_common::diagnostics::diagnostic_codes;
use sable_common::{Diagnostic, Span};
use sable_solver::{TypeId, TypeTable};

pub(crate) fn push_error(
    diagnostics: &mut Vec<Diagnostic>,
    file: &str,
    span: Span,
    code: u32,
    message: impl Into<String>,
) {
    diagnostics.push(Diagnostic::error(file, span, message, code));
}

pub(crate) fn push_warning(
    diagnostics: &mut Vec<Diagnostic>,
    file: &str,
    span: Span,
    code: u32,
    message: impl Into<String>,
) {
    diagnostics.push(Diagnostic::warning(file, span, message, code));
}

pub(crate) fn push_type_mismatch(
    diagnostics: &mut Vec<Diagnostic>,
    file: &str,
    types: &TypeTable,
    span: Span,
    expected: TypeId,
    actual: TypeId,
) {
    let message = format!(
        "Type mismatch: expected '{}', found '{}'",
        types.name(expected),
        types.name(actual)
    );
    diagnostics.push(Diagnostic::error(
        file,
        span,
        message,
        diagnostic_codes::TYPE_MISMATCH,
    ));
}
