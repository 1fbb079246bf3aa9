//! Checker state and the body-resolution pipeline.

use rustc_hash::FxHashSet;
use sable_binder::{BindingStore, PropertyId, SymbolArena};
use sable_common::Diagnostic;
use sable_solver::TypeTable;
use tracing::debug;

use crate::engine::InferenceEngine;

#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Emit the "abstract modifier is redundant in traits" warning.
    pub redundant_abstract_warnings: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            redundant_abstract_warnings: true,
        }
    }
}

/// One body-resolution pass over one compilation unit's descriptor graph.
///
/// The pass mutates descriptors in place (override edges, resolved
/// supertypes), records per-property facts in the `BindingStore`, and
/// accumulates diagnostics; it never aborts on a semantic error.
pub struct CheckerState<'a> {
    pub(crate) symbols: &'a mut SymbolArena,
    pub(crate) types: &'a TypeTable,
    pub(crate) bindings: &'a mut BindingStore,
    pub(crate) engine: &'a dyn InferenceEngine,
    pub(crate) file: String,
    pub(crate) options: CheckerOptions,
    /// Properties introduced by `val`/`var` primary-constructor parameters.
    /// Referencing one from a member body gives it real storage.
    pub(crate) promoted_parameter_properties: FxHashSet<PropertyId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        symbols: &'a mut SymbolArena,
        types: &'a TypeTable,
        bindings: &'a mut BindingStore,
        engine: &'a dyn InferenceEngine,
        file: String,
        options: CheckerOptions,
    ) -> Self {
        let mut promoted_parameter_properties = FxHashSet::default();
        for constructor_id in symbols.constructor_ids() {
            let constructor = symbols.constructor(constructor_id);
            if constructor.is_primary {
                promoted_parameter_properties
                    .extend(constructor.params.iter().filter_map(|p| p.promotes));
            }
        }
        CheckerState {
            symbols,
            types,
            bindings,
            engine,
            file,
            options,
            promoted_parameter_properties,
            diagnostics: Vec::new(),
        }
    }

    /// Run the pass. Stages are order-dependent: override edges must exist
    /// before the consistency sweep, supertype resolution must precede body
    /// resolution, and the backing-field flags converge only once every
    /// body has been resolved.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.file))]
    pub fn resolve_declaration_bodies(&mut self) {
        self.bind_overrides();

        self.resolve_delegation_specifier_lists();

        self.resolve_anonymous_initializers();
        self.resolve_property_declaration_bodies();

        self.resolve_secondary_constructor_bodies();
        self.resolve_function_bodies();

        self.check_if_primary_constructor_is_necessary();

        self.check_overrides();

        debug!(
            diagnostics = self.diagnostics.len(),
            "body resolution finished"
        );
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
