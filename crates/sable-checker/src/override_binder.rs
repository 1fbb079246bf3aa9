//! Override Binding Module
//!
//! For every declared member function of every class-like descriptor, finds
//! and records the inherited functions it overrides: per direct supertype in
//! declaration order, the first candidate in that supertype's same-named
//! function group that passes the overridability check. Supertypes offering
//! no match contribute nothing — that is not an error at this stage; the
//! consistency checker judges the edges later.

use sable_binder::{BindingStore, ClassId, FunctionId, SymbolArena};
use sable_solver::{Signature, TypeId, TypeTable, is_overridable_by};
use tracing::debug;

use crate::state::CheckerState;

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn bind_overrides(&mut self) {
        let class_ids: Vec<ClassId> = self.symbols.class_ids().collect();
        for class_id in class_ids {
            self.bind_overrides_in_class(class_id);
        }
    }

    fn bind_overrides_in_class(&mut self, class_id: ClassId) {
        let mut edges: Vec<(FunctionId, FunctionId)> = Vec::new();
        {
            let arena: &SymbolArena = self.symbols;
            let class = arena.class(class_id);
            for &function_id in &class.functions {
                let declared = arena.function(function_id).signature();
                for &supertype in &class.supertypes {
                    if let Some(overridden) = find_function_overridable_by(
                        arena,
                        self.types,
                        self.bindings,
                        &declared,
                        supertype,
                    ) {
                        edges.push((function_id, overridden));
                    }
                }
            }
        }
        if !edges.is_empty() {
            debug!(?class_id, edges = edges.len(), "recorded override edges");
        }
        for (function_id, overridden) in edges {
            self.symbols.function_mut(function_id).overridden.push(overridden);
        }
    }
}

/// First member of `supertype`'s same-named function group that `declared`
/// may override. First match wins even when a later candidate would match
/// more precisely.
fn find_function_overridable_by(
    arena: &SymbolArena,
    types: &TypeTable,
    bindings: &BindingStore,
    declared: &Signature,
    supertype: TypeId,
) -> Option<FunctionId> {
    let super_class = bindings.class_of_type(supertype)?;
    arena
        .class(super_class)
        .functions
        .iter()
        .copied()
        .find(|&candidate| {
            let function = arena.function(candidate);
            function.name == declared.name
                && is_overridable_by(types, &function.signature(), declared).is_ok()
        })
}
