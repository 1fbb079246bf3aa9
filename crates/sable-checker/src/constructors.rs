//! Secondary-Constructor Resolution Module
//!
//! A secondary constructor may appear only in a class that has a primary
//! constructor, and must delegate: its initializer list's first entry is a
//! super- or this-constructor call, and every entry past the first is
//! reported individually — the list is effectively capped at one entry.
//! The body, when present, is checked against the unit type.

use sable_binder::{ConstructorId, DelegationKind, SymbolArena};
use sable_common::diagnostics::diagnostic_codes;
use sable_solver::TypeId;

use crate::error_reporter::push_error;
use crate::scopes;
use crate::state::CheckerState;
use crate::trace::{CONSTRUCTOR_LAYERS, ResolutionTrace};

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn resolve_secondary_constructor_bodies(&mut self) {
        let constructor_ids: Vec<ConstructorId> = self
            .symbols
            .constructor_ids()
            .filter(|&id| !self.symbols.constructor(id).is_primary)
            .collect();
        for constructor_id in constructor_ids {
            self.resolve_secondary_constructor_body(constructor_id);
        }
    }

    fn resolve_secondary_constructor_body(&mut self, constructor_id: ConstructorId) {
        let arena: &SymbolArena = self.symbols;
        let constructor = arena.constructor(constructor_id);
        let class = arena.class(constructor.class);
        let members = scopes::member_scope(arena, constructor.class);
        // Not the primary-constructor view: every value parameter is bound.
        let inner = scopes::constructor_scope(arena, &members, constructor_id, false);

        if class.primary_constructor.is_none() {
            push_error(
                &mut self.diagnostics,
                &self.file,
                constructor.name_span,
                diagnostic_codes::SECONDARY_CONSTRUCTOR_WITHOUT_PRIMARY,
                "A secondary constructor may appear only in a class that has a primary constructor",
            );
        } else if constructor.initializers.is_empty() {
            push_error(
                &mut self.diagnostics,
                &self.file,
                constructor.name_span,
                diagnostic_codes::MISSING_CONSTRUCTOR_INITIALIZER_LIST,
                "Secondary constructors must have an initializer list",
            );
        } else {
            let first = &constructor.initializers[0];
            match &first.kind {
                DelegationKind::SuperCall { call, .. } | DelegationKind::ThisCall { call } => {
                    let mut trace = ResolutionTrace::new(
                        self.bindings,
                        &mut self.diagnostics,
                        self.types,
                        &self.file,
                        &self.promoted_parameter_properties,
                        CONSTRUCTOR_LAYERS,
                    );
                    self.engine.resolve_call(&mut trace, &inner, *call, None);
                }
                DelegationKind::ByExpression { .. } => {
                    push_error(
                        &mut self.diagnostics,
                        &self.file,
                        first.span,
                        diagnostic_codes::BY_CLAUSE_IN_SECONDARY_CONSTRUCTOR,
                        "'by'-clause is only supported for primary constructors",
                    );
                }
                DelegationKind::SuperType => {
                    push_error(
                        &mut self.diagnostics,
                        &self.file,
                        first.span,
                        diagnostic_codes::CONSTRUCTOR_PARAMETERS_REQUIRED,
                        "Constructor parameters required",
                    );
                }
            }
            for extra in &constructor.initializers[1..] {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    extra.span,
                    diagnostic_codes::EXTRA_CONSTRUCTOR_INITIALIZER,
                    "Only one call to 'this(...)' is allowed",
                );
            }
        }

        if let Some(body) = constructor.body {
            let mut trace = ResolutionTrace::new(
                self.bindings,
                &mut self.diagnostics,
                self.types,
                &self.file,
                &self.promoted_parameter_properties,
                CONSTRUCTOR_LAYERS,
            );
            self.engine.check_body(&mut trace, &inner, body, Some(TypeId::UNIT));
        }
    }
}
