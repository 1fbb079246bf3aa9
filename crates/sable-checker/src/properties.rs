//! Property Resolution Module
//!
//! Member properties of classes resolve their initializer in the primary
//! constructor's scope; top-level and object properties resolve directly in
//! their declaring scope. Accessor bodies resolve under the per-property
//! field-access trace, which is how backing-field requirements are
//! discovered. The abstractness and initializer-legality matrices run after
//! resolution, once the flags for this property have been fed.

use rustc_hash::FxHashSet;
use sable_binder::{AccessorKind, ClassId, ClassKind, Modality, PropertyId, SymbolArena};
use sable_common::diagnostics::diagnostic_codes;
use sable_solver::{TypeId, is_subtype_of};

use crate::error_reporter::{push_error, push_type_mismatch, push_warning};
use crate::functions::{FunctionLike, check_function_like};
use crate::scopes;
use crate::state::CheckerState;
use crate::trace::{CONSTRUCTOR_LAYERS, ResolutionTrace, TraceLayer};

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn resolve_property_declaration_bodies(&mut self) {
        let mut processed: FxHashSet<PropertyId> = FxHashSet::default();
        let class_ids: Vec<ClassId> = self.symbols.class_ids().collect();
        for class_id in class_ids {
            if self.symbols.class(class_id).kind == ClassKind::Object {
                continue;
            }
            let properties = self.symbols.class(class_id).properties.clone();
            for property_id in properties {
                self.resolve_member_property(class_id, property_id);
                processed.insert(property_id);
            }
        }
        // Top-level properties and properties of objects.
        let property_ids: Vec<PropertyId> = self.symbols.property_ids().collect();
        for property_id in property_ids {
            if !processed.contains(&property_id) {
                self.resolve_standalone_property(property_id);
            }
        }
    }

    fn resolve_member_property(&mut self, class_id: ClassId, property_id: PropertyId) {
        {
            let arena: &SymbolArena = self.symbols;
            let class = arena.class(class_id);
            let property = arena.property(property_id);
            if let Some(initializer) = property.initializer
                && let Some(primary) = class.primary_constructor
            {
                let members = scopes::member_scope(arena, class_id);
                let constructor_scope = scopes::constructor_scope(arena, &members, primary, true);
                let declaration_scope =
                    scopes::property_declaration_scope(arena, &constructor_scope, property_id);
                let expected = property.expected_type();
                let actual = {
                    let mut trace = ResolutionTrace::new(
                        self.bindings,
                        &mut self.diagnostics,
                        self.types,
                        &self.file,
                        &self.promoted_parameter_properties,
                        CONSTRUCTOR_LAYERS,
                    );
                    self.engine
                        .type_of(&mut trace, &declaration_scope, initializer.expr, None)
                };
                if let Some(actual) = actual
                    && !is_subtype_of(self.types, actual, expected)
                {
                    push_type_mismatch(
                        &mut self.diagnostics,
                        &self.file,
                        self.types,
                        initializer.span,
                        expected,
                        actual,
                    );
                }
            }
        }
        self.resolve_property_accessors(property_id, Some(class_id));
        self.check_property(property_id, Some(class_id));
    }

    fn resolve_standalone_property(&mut self, property_id: PropertyId) {
        let container = self.symbols.property(property_id).containing_class;
        {
            let arena: &SymbolArena = self.symbols;
            let property = arena.property(property_id);
            if let Some(initializer) = property.initializer {
                let outer = match container {
                    Some(class_id) => scopes::member_scope(arena, class_id),
                    None => scopes::file_scope(arena),
                };
                let declaration_scope =
                    scopes::property_declaration_scope(arena, &outer, property_id);
                let expected = property.expected_type();
                let actual = {
                    let mut trace = ResolutionTrace::new(
                        self.bindings,
                        &mut self.diagnostics,
                        self.types,
                        &self.file,
                        &self.promoted_parameter_properties,
                        CONSTRUCTOR_LAYERS,
                    );
                    self.engine
                        .type_of(&mut trace, &declaration_scope, initializer.expr, None)
                };
                if let Some(actual) = actual
                    && !is_subtype_of(self.types, actual, expected)
                {
                    push_type_mismatch(
                        &mut self.diagnostics,
                        &self.file,
                        self.types,
                        initializer.span,
                        expected,
                        actual,
                    );
                }
            }
        }
        self.resolve_property_accessors(property_id, container);
        self.check_property(property_id, None);
    }

    /// Resolve declared accessor bodies under the field-access trace bound
    /// to this property, then run the accessor legality matrix.
    fn resolve_property_accessors(&mut self, property_id: PropertyId, container: Option<ClassId>) {
        let arena: &SymbolArena = self.symbols;
        let property = arena.property(property_id);
        let outer = match container {
            Some(class_id) => scopes::member_scope(arena, class_id),
            None => scopes::file_scope(arena),
        };
        let declaration_scope = scopes::property_declaration_scope(arena, &outer, property_id);
        let body_scope = scopes::accessor_scope(arena, &declaration_scope, property_id);
        let layers = [
            TraceLayer::MemberPromotion,
            TraceLayer::AccessorFieldAccess(property_id),
        ];
        let class = property.containing_class.map(|id| arena.class(id));
        for accessor in [property.getter.as_ref(), property.setter.as_ref()]
            .into_iter()
            .flatten()
        {
            if let Some(body) = accessor.body {
                let declared_return = match accessor.kind {
                    AccessorKind::Getter => property.out_type,
                    AccessorKind::Setter => TypeId::UNIT,
                };
                let mut trace = ResolutionTrace::new(
                    self.bindings,
                    &mut self.diagnostics,
                    self.types,
                    &self.file,
                    &self.promoted_parameter_properties,
                    &layers,
                );
                self.engine
                    .check_body(&mut trace, &body_scope, body, Some(declared_return));
            }
            check_function_like(
                &mut self.diagnostics,
                &self.file,
                &self.options,
                class,
                FunctionLike {
                    name: &property.name,
                    accessor: Some(accessor.kind),
                    abstract_span: accessor.modifiers.abstract_span,
                    has_body: accessor.body.is_some(),
                    name_span: accessor.span,
                },
            );
        }
    }

    fn check_property(&mut self, property_id: PropertyId, class: Option<ClassId>) {
        self.check_property_abstractness(property_id, class);
        self.check_property_initializer(property_id, class);
    }

    fn check_property_abstractness(&mut self, property_id: PropertyId, class: Option<ClassId>) {
        let arena: &SymbolArena = self.symbols;
        let property = arena.property(property_id);
        let class = class.map(|id| arena.class(id));

        if let Some(abstract_span) = property.modifiers.abstract_span {
            let Some(class) = class else {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    abstract_span,
                    diagnostic_codes::ABSTRACT_PROPERTY_OUTSIDE_CLASS,
                    "This property cannot be abstract",
                );
                return;
            };
            if class.modality != Modality::Abstract && class.kind != ClassKind::EnumClass {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    abstract_span,
                    diagnostic_codes::ABSTRACT_PROPERTY_IN_NON_ABSTRACT_CLASS,
                    format!(
                        "Abstract property '{}' in non-abstract class '{}'",
                        property.name, class.name
                    ),
                );
                return;
            }
            if class.kind == ClassKind::Trait && self.options.redundant_abstract_warnings {
                push_warning(
                    &mut self.diagnostics,
                    &self.file,
                    abstract_span,
                    diagnostic_codes::REDUNDANT_ABSTRACT,
                    "Abstract modifier is redundant in traits",
                );
            }
        }

        if property.modality == Modality::Abstract {
            if let Some(initializer) = property.initializer {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    initializer.span,
                    diagnostic_codes::ABSTRACT_PROPERTY_WITH_INITIALIZER,
                    "Property with initializer cannot be abstract",
                );
            }
            if let Some(getter) = &property.getter
                && getter.body.is_some()
            {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    getter.span,
                    diagnostic_codes::ABSTRACT_PROPERTY_WITH_GETTER,
                    "Property with getter implementation cannot be abstract",
                );
            }
            if let Some(setter) = &property.setter
                && setter.body.is_some()
            {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    setter.span,
                    diagnostic_codes::ABSTRACT_PROPERTY_WITH_SETTER,
                    "Property with setter implementation cannot be abstract",
                );
            }
        }
    }

    fn check_property_initializer(&mut self, property_id: PropertyId, class: Option<ClassId>) {
        let arena: &SymbolArena = self.symbols;
        let property = arena.property(property_id);
        if property.modality == Modality::Abstract {
            return;
        }
        let class = class.map(|id| arena.class(id));
        let has_accessor_implementation = property.has_accessor_implementation();
        let in_trait = class.is_some_and(|c| c.kind == ClassKind::Trait);
        let backing_field_required = self.bindings.backing_field_required(property_id);
        let name_span = property.name_span;

        if in_trait && backing_field_required && has_accessor_implementation {
            push_error(
                &mut self.diagnostics,
                &self.file,
                name_span,
                diagnostic_codes::BACKING_FIELD_IN_TRAIT,
                "Property in a trait cannot have a backing field",
            );
        }
        let Some(initializer) = property.initializer else {
            if backing_field_required
                && !in_trait
                && !self.bindings.observed_initialized(property_id)
            {
                let message = if class.is_none() || has_accessor_implementation {
                    "Property must be initialized"
                } else {
                    "Property must be initialized or be abstract"
                };
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    name_span,
                    diagnostic_codes::PROPERTY_NOT_INITIALIZED,
                    message,
                );
            }
            return;
        };
        if in_trait {
            push_error(
                &mut self.diagnostics,
                &self.file,
                initializer.span,
                diagnostic_codes::PROPERTY_INITIALIZER_IN_TRAIT,
                "Property initializers are not allowed in traits",
            );
        } else if !backing_field_required {
            push_error(
                &mut self.diagnostics,
                &self.file,
                initializer.span,
                diagnostic_codes::PROPERTY_INITIALIZER_WITHOUT_BACKING_FIELD,
                "Initializer is not allowed here because this property has no backing field",
            );
        } else if let Some(class) = class
            && class.primary_constructor.is_none()
        {
            push_error(
                &mut self.diagnostics,
                &self.file,
                initializer.span,
                diagnostic_codes::PROPERTY_INITIALIZER_WITHOUT_PRIMARY_CONSTRUCTOR,
                "Property initializers are not allowed when no primary constructor is present",
            );
        }
    }
}
