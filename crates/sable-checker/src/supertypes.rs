//! Supertype / Delegation Resolution Module
//!
//! Resolves each class's delegation specifiers into a validated,
//! de-duplicated supertype set. Dispatch is an exhaustive match over the
//! closed specifier union; the this-call variant is unreachable in supertype
//! position by parser guarantee. After all specifiers are resolved the
//! aggregate set is validated: at most one non-trait class, no duplicate
//! type identities, sealed supertypes only where explicitly allowed.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use sable_binder::{
    BindingStore, ClassDescriptor, ClassId, ClassKind, DelegationKind, Modality, SymbolArena,
};
use sable_common::Diagnostic;
use sable_common::diagnostics::diagnostic_codes;
use sable_solver::{TypeId, TypeTable, is_subtype_of};

use crate::error_reporter::{push_error, push_type_mismatch};
use crate::scopes;
use crate::trace::{CONSTRUCTOR_LAYERS, ResolutionTrace};
use crate::state::CheckerState;

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn resolve_delegation_specifier_lists(&mut self) {
        let class_ids: Vec<ClassId> = self.symbols.class_ids().collect();
        for class_id in class_ids {
            let resolved = self.resolve_delegation_specifiers(class_id);
            self.symbols.class_mut(class_id).resolved_supertypes = resolved;
        }
    }

    fn resolve_delegation_specifiers(&mut self, class_id: ClassId) -> Vec<TypeId> {
        // Specifier index -> resolved supertype, in declaration order.
        let mut supertypes: IndexMap<usize, TypeId> = IndexMap::new();
        let arena: &SymbolArena = self.symbols;
        let class = arena.class(class_id);
        if class.delegation_specifiers.is_empty() {
            return Vec::new();
        }
        let members = scopes::member_scope(arena, class_id);
        let constructor_scope = class
            .primary_constructor
            .map(|primary| scopes::constructor_scope(arena, &members, primary, true));

        for (index, specifier) in class.delegation_specifiers.iter().enumerate() {
            match &specifier.kind {
                DelegationKind::ByExpression {
                    delegate,
                    delegate_span,
                } => {
                    if class.kind == ClassKind::Trait {
                        push_error(
                            &mut self.diagnostics,
                            &self.file,
                            specifier.span,
                            diagnostic_codes::TRAIT_DELEGATION,
                            "Traits cannot use delegation",
                        );
                    }
                    // The supertype itself was annotated by an earlier pass;
                    // look it up, never recompute it.
                    let supertype = self.bindings.annotated_type(specifier.type_ref);
                    if let Some(ty) = supertype {
                        supertypes.insert(index, ty);
                    }
                    if let Some(delegate) = *delegate {
                        let scope = constructor_scope.as_ref().unwrap_or(&members);
                        let delegate_type = {
                            let mut trace = ResolutionTrace::new(
                                self.bindings,
                                &mut self.diagnostics,
                                self.types,
                                &self.file,
                                &self.promoted_parameter_properties,
                                CONSTRUCTOR_LAYERS,
                            );
                            self.engine.type_of(&mut trace, scope, delegate, None)
                        };
                        if let (Some(actual), Some(expected)) = (delegate_type, supertype)
                            && !is_subtype_of(self.types, actual, expected)
                        {
                            push_type_mismatch(
                                &mut self.diagnostics,
                                &self.file,
                                self.types,
                                delegate_span.unwrap_or(specifier.span),
                                expected,
                                actual,
                            );
                        }
                    }
                }
                DelegationKind::SuperCall { call, args_span } => {
                    let node_span = args_span.unwrap_or(specifier.span);
                    if class.kind == ClassKind::Trait {
                        push_error(
                            &mut self.diagnostics,
                            &self.file,
                            node_span,
                            diagnostic_codes::TRAIT_SUPERTYPE_INITIALIZATION,
                            "Traits cannot initialize supertypes",
                        );
                    }
                    if let Some(scope) = constructor_scope.as_ref() {
                        let supertype = {
                            let mut trace = ResolutionTrace::new(
                                self.bindings,
                                &mut self.diagnostics,
                                self.types,
                                &self.file,
                                &self.promoted_parameter_properties,
                                CONSTRUCTOR_LAYERS,
                            );
                            self.engine.resolve_call(&mut trace, scope, *call, None)
                        };
                        match supertype {
                            Some(ty) => {
                                supertypes.insert(index, ty);
                                if let Some(super_class) = self.bindings.class_of_type(ty)
                                    && arena.class(super_class).kind == ClassKind::Trait
                                {
                                    push_error(
                                        &mut self.diagnostics,
                                        &self.file,
                                        node_span,
                                        diagnostic_codes::TRAIT_WITH_CONSTRUCTOR_CALL,
                                        "A trait may not have a constructor",
                                    );
                                }
                            }
                            // Call resolution failed and already reported;
                            // fall back to the annotated type silently.
                            None => {
                                if let Some(ty) = self.bindings.annotated_type(specifier.type_ref) {
                                    supertypes.insert(index, ty);
                                }
                            }
                        }
                    } else if class.kind != ClassKind::Trait {
                        if let Some(ty) = self.bindings.annotated_type(specifier.type_ref) {
                            supertypes.insert(index, ty);
                        }
                        push_error(
                            &mut self.diagnostics,
                            &self.file,
                            node_span,
                            diagnostic_codes::CONSTRUCTOR_REQUIRED_FOR_SUPERTYPE_INIT,
                            format!(
                                "Class '{}' must have a constructor in order to be able to initialize supertypes",
                                class.name
                            ),
                        );
                    }
                }
                DelegationKind::SuperType => {
                    if let Some(ty) = self.bindings.annotated_type(specifier.type_ref) {
                        supertypes.insert(index, ty);
                        if class.kind != ClassKind::Trait
                            && !self.types.is_error(ty)
                            && let Some(super_class) = self.bindings.class_of_type(ty)
                        {
                            let super_descriptor = arena.class(super_class);
                            if super_descriptor.kind != ClassKind::Trait
                                && super_descriptor.has_constructors()
                            {
                                push_error(
                                    &mut self.diagnostics,
                                    &self.file,
                                    specifier.span,
                                    diagnostic_codes::SUPERTYPE_NOT_INITIALIZED,
                                    "This type has a constructor, and thus must be initialized here",
                                );
                            }
                        }
                    }
                }
                DelegationKind::ThisCall { .. } => {
                    unreachable!("this-delegation in a supertype list is rejected by the parser")
                }
            }
        }

        // A sealed supertype is admissible only for its own enum's entries.
        let allowed_final: FxHashSet<TypeId> = if class.kind == ClassKind::EnumEntry {
            class
                .containing_class
                .map(|owner| arena.class(owner).default_type)
                .into_iter()
                .collect()
        } else {
            FxHashSet::default()
        };
        check_supertype_list(
            arena,
            self.types,
            self.bindings,
            &mut self.diagnostics,
            &self.file,
            class,
            &supertypes,
            &allowed_final,
        );
        supertypes.into_values().collect()
    }
}

fn check_supertype_list(
    arena: &SymbolArena,
    types: &TypeTable,
    bindings: &BindingStore,
    diagnostics: &mut Vec<Diagnostic>,
    file: &str,
    class: &ClassDescriptor,
    supertypes: &IndexMap<usize, TypeId>,
    allowed_final: &FxHashSet<TypeId>,
) {
    let mut seen: FxHashSet<TypeId> = FxHashSet::default();
    let mut class_appeared = false;
    for (&index, &supertype) in supertypes {
        if types.is_error(supertype) {
            continue;
        }
        let span = class.delegation_specifiers[index].span;
        let super_class = bindings.class_of_type(supertype);
        match super_class {
            Some(super_class) => {
                if arena.class(super_class).kind != ClassKind::Trait {
                    if class_appeared {
                        push_error(
                            diagnostics,
                            file,
                            span,
                            diagnostic_codes::MULTIPLE_CLASS_SUPERTYPES,
                            "Only one class may appear in a supertype list",
                        );
                    } else {
                        class_appeared = true;
                    }
                }
            }
            None => {
                push_error(
                    diagnostics,
                    file,
                    span,
                    diagnostic_codes::UNSUPPORTED_SUPERTYPE,
                    "Only classes and traits may serve as supertypes",
                );
            }
        }
        if !seen.insert(supertype) {
            push_error(
                diagnostics,
                file,
                span,
                diagnostic_codes::SUPERTYPE_APPEARS_TWICE,
                "A supertype appears twice",
            );
        }
        if let Some(super_class) = super_class
            && arena.class(super_class).modality == Modality::Sealed
            && !allowed_final.contains(&supertype)
        {
            push_error(
                diagnostics,
                file,
                span,
                diagnostic_codes::FINAL_SUPERTYPE,
                "This type is final, so it cannot be inherited from",
            );
        }
    }
}
