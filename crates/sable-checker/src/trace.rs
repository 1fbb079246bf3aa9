//! Resolution trace and its observer layers.
//!
//! The inference engine reports every binding event (reference resolved,
//! assignment target resolved) through a `ResolutionTrace`. The trace commits
//! the event into the shared `BindingStore`, then notifies the active layers
//! in a fixed order. Layers are pure side-effect listeners: they never alter
//! control flow or suppress the underlying resolution.
//!
//! Layer compositions mirror the resolution sites:
//! - delegation specifiers, property initializers, secondary-constructor
//!   bodies: the constructor layer alone
//! - anonymous initializers: constructor layer + assignment tracking
//! - function bodies: the member-promotion layer alone
//! - accessor bodies: member promotion + the per-property field layer

use rustc_hash::FxHashSet;
use sable_binder::{BindingStore, ExprId, PropertyId, SymbolRef};
use sable_common::diagnostics::diagnostic_codes;
use sable_common::{Diagnostic, Span};
use sable_solver::{TypeId, TypeTable};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLayer {
    /// Inside constructor scopes a backing-field reference is legal only for
    /// properties that already require storage; anything else is an error.
    ConstructorFieldAccess,
    /// Marks a property as observed-initialized when its backing field is an
    /// assignment target. Layered only over anonymous-initializer
    /// resolution.
    TrackFieldAssignments,
    /// Marks promoted primary-constructor parameter properties as requiring
    /// storage once a member body references them.
    MemberPromotion,
    /// Marks one specific property as requiring storage when its own
    /// accessor body references its backing field.
    AccessorFieldAccess(PropertyId),
}

pub(crate) const CONSTRUCTOR_LAYERS: &[TraceLayer] = &[TraceLayer::ConstructorFieldAccess];
pub(crate) const INITIALIZER_LAYERS: &[TraceLayer] = &[
    TraceLayer::ConstructorFieldAccess,
    TraceLayer::TrackFieldAssignments,
];
pub(crate) const MEMBER_LAYERS: &[TraceLayer] = &[TraceLayer::MemberPromotion];

/// The engine-facing sink for one resolution unit.
pub struct ResolutionTrace<'t> {
    bindings: &'t mut BindingStore,
    diagnostics: &'t mut Vec<Diagnostic>,
    types: &'t TypeTable,
    file: &'t str,
    promoted: &'t FxHashSet<PropertyId>,
    layers: &'t [TraceLayer],
}

impl<'t> ResolutionTrace<'t> {
    pub(crate) fn new(
        bindings: &'t mut BindingStore,
        diagnostics: &'t mut Vec<Diagnostic>,
        types: &'t TypeTable,
        file: &'t str,
        promoted: &'t FxHashSet<PropertyId>,
        layers: &'t [TraceLayer],
    ) -> Self {
        ResolutionTrace {
            bindings,
            diagnostics,
            types,
            file,
            promoted,
            layers,
        }
    }

    /// A reference expression resolved to a symbol.
    pub fn record_reference(&mut self, expr: ExprId, span: Span, target: SymbolRef) {
        self.bindings.record_reference_target(expr, target);
        for layer in self.layers {
            match (layer, target) {
                (TraceLayer::ConstructorFieldAccess, SymbolRef::BackingField(property)) => {
                    if !self.bindings.backing_field_required(property) {
                        self.diagnostics.push(Diagnostic::error(
                            self.file,
                            span,
                            "This property does not have a backing field",
                            diagnostic_codes::NO_BACKING_FIELD,
                        ));
                    }
                }
                (
                    TraceLayer::MemberPromotion,
                    SymbolRef::Property(property) | SymbolRef::BackingField(property),
                ) => {
                    if self.promoted.contains(&property) {
                        self.bindings.require_backing_field(property);
                    }
                }
                (TraceLayer::AccessorFieldAccess(own), SymbolRef::BackingField(property)) => {
                    if property == *own {
                        self.bindings.require_backing_field(property);
                    }
                }
                _ => {}
            }
        }
    }

    /// An assignment's target expression resolved to a symbol.
    pub fn record_assignment(&mut self, _expr: ExprId, _span: Span, target: SymbolRef) {
        for layer in self.layers {
            if let (TraceLayer::TrackFieldAssignments, SymbolRef::BackingField(property)) =
                (layer, target)
            {
                self.bindings.mark_observed_initialized(property);
            }
        }
    }

    /// Engine-side semantic error, sharing the phase's sink.
    pub fn error(&mut self, span: Span, code: u32, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::error(self.file, span, message, code));
    }

    pub fn type_mismatch(&mut self, span: Span, expected: TypeId, actual: TypeId) {
        let message = format!(
            "Type mismatch: expected '{}', found '{}'",
            self.types.name(expected),
            self.types.name(actual)
        );
        self.diagnostics.push(Diagnostic::error(
            self.file,
            span,
            message,
            diagnostic_codes::TYPE_MISMATCH,
        ));
    }
}
