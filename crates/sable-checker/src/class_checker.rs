//! Class-Level Consistency Checking Module
//!
//! The final sweep over the decorated descriptor graph:
//! - override-modifier correctness per declared function (keyword presence
//!   must match a non-empty override set; overriding a final member is
//!   illegal regardless of keyword)
//! - abstract-member coverage for concrete class-likes, at most one report
//!   per class
//! - primary-constructor necessity for classes owning stored properties

use rustc_hash::FxHashSet;
use sable_binder::{ClassId, ClassKind, FunctionId, Modality, SymbolArena};
use sable_common::diagnostics::diagnostic_codes;

use crate::error_reporter::push_error;
use crate::state::CheckerState;

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn check_overrides(&mut self) {
        let class_ids: Vec<ClassId> = self.symbols.class_ids().collect();
        for class_id in class_ids {
            self.check_overrides_in_class(class_id);
        }
    }

    fn check_overrides_in_class(&mut self, class_id: ClassId) {
        let function_ids: Vec<FunctionId> = self.symbols.class(class_id).functions.clone();
        for function_id in &function_ids {
            self.check_override_for_function(*function_id);
        }

        let arena: &SymbolArena = self.symbols;
        let class = arena.class(class_id);
        if class.modality == Modality::Abstract {
            return;
        }
        let mut covered: FxHashSet<FunctionId> = FxHashSet::default();
        for &function_id in &function_ids {
            covered.extend(arena.function(function_id).overridden.iter().copied());
        }
        let mut found_error = false;
        for &supertype in &class.supertypes {
            let Some(super_class) = self.bindings.class_of_type(supertype) else {
                continue;
            };
            for &inherited in &arena.class(super_class).functions {
                let function = arena.function(inherited);
                if function.modality == Modality::Abstract
                    && !covered.contains(&inherited)
                    && !found_error
                {
                    push_error(
                        &mut self.diagnostics,
                        &self.file,
                        class.name_span,
                        diagnostic_codes::ABSTRACT_MEMBER_NOT_IMPLEMENTED,
                        format!(
                            "Class '{}' must be declared abstract or implement abstract method '{}' in '{}'",
                            class.name,
                            function.name,
                            arena.class(super_class).name
                        ),
                    );
                    found_error = true;
                }
            }
        }
    }

    fn check_override_for_function(&mut self, function_id: FunctionId) {
        let arena: &SymbolArena = self.symbols;
        let function = arena.function(function_id);
        let has_override_modifier = function.modifiers.is_override();
        let override_span = function
            .modifiers
            .override_span
            .unwrap_or(function.name_span);

        let mut found_error = false;
        for &overridden_id in &function.overridden {
            let overridden = arena.function(overridden_id);
            if has_override_modifier && !overridden.modality.is_open() && !found_error {
                push_error(
                    &mut self.diagnostics,
                    &self.file,
                    override_span,
                    diagnostic_codes::OVERRIDING_FINAL_MEMBER,
                    format!(
                        "Method '{}' in '{}' is final and cannot be overridden",
                        overridden.name,
                        arena.container_name(overridden.containing_class)
                    ),
                );
                found_error = true;
            }
        }
        if has_override_modifier && function.overridden.is_empty() {
            push_error(
                &mut self.diagnostics,
                &self.file,
                override_span,
                diagnostic_codes::NOTHING_TO_OVERRIDE,
                format!("Method '{}' overrides nothing", function.name),
            );
        }
        if !has_override_modifier && !function.overridden.is_empty() {
            let first = arena.function(function.overridden[0]);
            push_error(
                &mut self.diagnostics,
                &self.file,
                function.name_span,
                diagnostic_codes::MISSING_OVERRIDE_MODIFIER,
                format!(
                    "Method '{}' overrides method '{}' in class '{}' and needs the 'override' modifier",
                    function.name,
                    first.name,
                    arena.container_name(first.containing_class)
                ),
            );
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn check_if_primary_constructor_is_necessary(&mut self) {
        let arena: &SymbolArena = self.symbols;
        for class_id in arena.class_ids() {
            let class = arena.class(class_id);
            if class.primary_constructor.is_some()
                || matches!(class.kind, ClassKind::Trait | ClassKind::Object)
            {
                continue;
            }
            for &property_id in &class.properties {
                if self.bindings.backing_field_required(property_id) {
                    push_error(
                        &mut self.diagnostics,
                        &self.file,
                        class.name_span,
                        diagnostic_codes::PRIMARY_CONSTRUCTOR_REQUIRED_FOR_BACKING_FIELD,
                        format!(
                            "Class '{}' must have a primary constructor, because property '{}' has a backing field",
                            class.name,
                            arena.property(property_id).name
                        ),
                    );
                    break;
                }
            }
        }
    }
}
