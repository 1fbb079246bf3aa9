//! Per-declaration binding facts.
//!
//! The store is the bidirectional map between source handles and resolved
//! facts. Header resolution writes annotated types and the type-to-class
//! mapping; body resolution reads those and writes reference targets plus
//! the two per-property flags. Both flags are monotonic: once set they are
//! never reset, so resolution order across declarations cannot change the
//! converged flag set.

use rustc_hash::{FxHashMap, FxHashSet};
use sable_solver::TypeId;

use crate::ids::{ClassId, ExprId, PropertyId, TypeRefId};
use crate::scope::SymbolRef;

#[derive(Debug, Default)]
pub struct BindingStore {
    annotated_types: FxHashMap<TypeRefId, TypeId>,
    class_of_type: FxHashMap<TypeId, ClassId>,
    reference_targets: FxHashMap<ExprId, SymbolRef>,
    backing_field_required: FxHashSet<PropertyId>,
    observed_initialized: FxHashSet<PropertyId>,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Written by header resolution.

    pub fn annotate_type_ref(&mut self, type_ref: TypeRefId, ty: TypeId) {
        self.annotated_types.insert(type_ref, ty);
    }

    pub fn register_class_type(&mut self, ty: TypeId, class: ClassId) {
        self.class_of_type.insert(ty, class);
    }

    pub fn annotated_type(&self, type_ref: TypeRefId) -> Option<TypeId> {
        self.annotated_types.get(&type_ref).copied()
    }

    /// The class-like declaration behind a type, if the type denotes one.
    pub fn class_of_type(&self, ty: TypeId) -> Option<ClassId> {
        self.class_of_type.get(&ty).copied()
    }

    // Written by body resolution.

    pub fn record_reference_target(&mut self, expr: ExprId, target: SymbolRef) {
        self.reference_targets.insert(expr, target);
    }

    pub fn reference_target(&self, expr: ExprId) -> Option<SymbolRef> {
        self.reference_targets.get(&expr).copied()
    }

    pub fn require_backing_field(&mut self, property: PropertyId) {
        self.backing_field_required.insert(property);
    }

    pub fn backing_field_required(&self, property: PropertyId) -> bool {
        self.backing_field_required.contains(&property)
    }

    pub fn mark_observed_initialized(&mut self, property: PropertyId) {
        self.observed_initialized.insert(property);
    }

    pub fn observed_initialized(&self, property: PropertyId) -> bool {
        self.observed_initialized.contains(&property)
    }
}
