//! The expression-typing service consumed by body resolution.
//!
//! Expression and statement typing is a separate engine; this phase only
//! builds the scope, hands over the body handle, and folds the binding
//! events the engine reports through the trace. The engine may recurse into
//! nested expression resolution but never re-enters body resolution.

use sable_binder::{ExprId, Scope};
use sable_solver::TypeId;

use crate::trace::ResolutionTrace;

pub trait InferenceEngine {
    /// Type an expression in `scope`. `expected` is a hint, not a check;
    /// `None` means no expected type. Returns `None` when typing failed —
    /// the engine has already reported, so callers skip dependent checks.
    fn type_of(
        &self,
        trace: &mut ResolutionTrace<'_>,
        scope: &Scope<'_>,
        expr: ExprId,
        expected: Option<TypeId>,
    ) -> Option<TypeId>;

    /// Check a declaration body against its declared return type, reporting
    /// any inconsistency through the trace.
    fn check_body(
        &self,
        trace: &mut ResolutionTrace<'_>,
        scope: &Scope<'_>,
        body: ExprId,
        declared_return: Option<TypeId>,
    );

    /// Resolve a constructor call (super- or this-delegation) and return the
    /// constructed type.
    fn resolve_call(
        &self,
        trace: &mut ResolutionTrace<'_>,
        scope: &Scope<'_>,
        call: ExprId,
        expected: Option<TypeId>,
    ) -> Option<TypeId>;
}
