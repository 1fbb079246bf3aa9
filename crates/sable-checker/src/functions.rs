//! Function Body Resolution Module
//!
//! Plain function bodies resolve in their declaring scope under the member
//! trace; the abstract/body legality matrix runs for every declaration with
//! a body shape, property accessors included.

use sable_binder::{
    AccessorKind, ClassDescriptor, ClassKind, FunctionId, Modality, SymbolArena,
};
use sable_common::diagnostics::diagnostic_codes;
use sable_common::{Diagnostic, Span};

use crate::error_reporter::{push_error, push_warning};
use crate::scopes;
use crate::state::{CheckerOptions, CheckerState};
use crate::trace::{MEMBER_LAYERS, ResolutionTrace};

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn resolve_function_bodies(&mut self) {
        let function_ids: Vec<FunctionId> = self.symbols.function_ids().collect();
        for function_id in function_ids {
            self.resolve_function_body(function_id);
        }
    }

    fn resolve_function_body(&mut self, function_id: FunctionId) {
        {
            let arena: &SymbolArena = self.symbols;
            let function = arena.function(function_id);
            if let Some(body) = function.body {
                let scope = match function.containing_class {
                    Some(class_id) => scopes::member_scope(arena, class_id),
                    None => scopes::file_scope(arena),
                };
                let mut trace = ResolutionTrace::new(
                    self.bindings,
                    &mut self.diagnostics,
                    self.types,
                    &self.file,
                    &self.promoted_parameter_properties,
                    MEMBER_LAYERS,
                );
                self.engine
                    .check_body(&mut trace, &scope, body, Some(function.return_type));
            }
        }
        self.check_function(function_id);
    }

    fn check_function(&mut self, function_id: FunctionId) {
        let arena: &SymbolArena = self.symbols;
        let function = arena.function(function_id);
        let class = function.containing_class.map(|id| arena.class(id));
        check_function_like(
            &mut self.diagnostics,
            &self.file,
            &self.options,
            class,
            FunctionLike {
                name: &function.name,
                accessor: None,
                abstract_span: function.modifiers.abstract_span,
                has_body: function.body.is_some(),
                name_span: function.name_span,
            },
        );
    }
}

/// The body-carrying shape the legality matrix judges: a named function, or
/// one of a property's accessors (`name` is then the property's name).
pub(crate) struct FunctionLike<'d> {
    pub name: &'d str,
    pub accessor: Option<AccessorKind>,
    pub abstract_span: Option<Span>,
    pub has_body: bool,
    pub name_span: Span,
}

pub(crate) fn check_function_like(
    diagnostics: &mut Vec<Diagnostic>,
    file: &str,
    options: &CheckerOptions,
    class: Option<&ClassDescriptor>,
    decl: FunctionLike<'_>,
) {
    let has_abstract_modifier = decl.abstract_span.is_some();
    match class {
        Some(class) => {
            let in_trait = class.kind == ClassKind::Trait;
            let in_enum = class.kind == ClassKind::EnumClass;
            let in_abstract_class = class.modality == Modality::Abstract;
            if let Some(span) = decl.abstract_span {
                if !in_abstract_class && !in_trait && !in_enum {
                    let message = match decl.accessor {
                        None => format!(
                            "Abstract method '{}' in non-abstract class '{}'",
                            decl.name, class.name
                        ),
                        Some(AccessorKind::Getter) => format!(
                            "Abstract getter for property '{}' in non-abstract class '{}'",
                            decl.name, class.name
                        ),
                        Some(AccessorKind::Setter) => format!(
                            "Abstract setter for property '{}' in non-abstract class '{}'",
                            decl.name, class.name
                        ),
                    };
                    push_error(
                        diagnostics,
                        file,
                        span,
                        diagnostic_codes::ABSTRACT_FUNCTION_IN_NON_ABSTRACT_CLASS,
                        message,
                    );
                }
                if in_trait && decl.accessor.is_none() && options.redundant_abstract_warnings {
                    push_warning(
                        diagnostics,
                        file,
                        span,
                        diagnostic_codes::REDUNDANT_ABSTRACT,
                        "Abstract modifier is redundant in traits",
                    );
                }
                if decl.has_body {
                    push_error(
                        diagnostics,
                        file,
                        span,
                        diagnostic_codes::ABSTRACT_FUNCTION_WITH_BODY,
                        format!("Method '{}' with a body cannot be abstract", decl.name),
                    );
                }
            }
            if !decl.has_body && !has_abstract_modifier && !in_trait && decl.accessor.is_none() {
                push_error(
                    diagnostics,
                    file,
                    decl.name_span,
                    diagnostic_codes::NON_ABSTRACT_FUNCTION_WITHOUT_BODY,
                    format!("Method '{}' without a body must be abstract", decl.name),
                );
            }
        }
        None => {
            if let Some(span) = decl.abstract_span {
                let message = match decl.accessor {
                    None => format!("Function '{}' cannot be abstract", decl.name),
                    Some(_) => "This property accessor cannot be abstract".to_string(),
                };
                push_error(
                    diagnostics,
                    file,
                    span,
                    diagnostic_codes::ABSTRACT_FUNCTION_OUTSIDE_CLASS,
                    message,
                );
            }
            if !decl.has_body && !has_abstract_modifier && decl.accessor.is_none() {
                push_error(
                    diagnostics,
                    file,
                    decl.name_span,
                    diagnostic_codes::NON_ABSTRACT_FUNCTION_WITHOUT_BODY,
                    format!("Function '{}' must have a body", decl.name),
                );
            }
        }
    }
}
