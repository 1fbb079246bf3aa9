//! Anonymous initializer resolution.
//!
//! Initializer blocks are legal only in the presence of a primary
//! constructor. When legal, each block is typed in the constructor scope
//! under the assignment-tracking trace, so `$field = ...` marks the
//! property as observed-initialized.

use sable_binder::{ClassId, SymbolArena};
use sable_common::diagnostics::diagnostic_codes;

use crate::error_reporter::push_error;
use crate::scopes;
use crate::state::CheckerState;
use crate::trace::{INITIALIZER_LAYERS, ResolutionTrace};

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn resolve_anonymous_initializers(&mut self) {
        let class_ids: Vec<ClassId> = self.symbols.class_ids().collect();
        for class_id in class_ids {
            self.resolve_anonymous_initializers_in_class(class_id);
        }
    }

    fn resolve_anonymous_initializers_in_class(&mut self, class_id: ClassId) {
        let arena: &SymbolArena = self.symbols;
        let class = arena.class(class_id);
        if class.anonymous_initializers.is_empty() {
            return;
        }
        match class.primary_constructor {
            Some(primary) => {
                let members = scopes::member_scope(arena, class_id);
                let scope = scopes::constructor_scope(arena, &members, primary, true);
                for initializer in &class.anonymous_initializers {
                    let mut trace = ResolutionTrace::new(
                        self.bindings,
                        &mut self.diagnostics,
                        self.types,
                        &self.file,
                        &self.promoted_parameter_properties,
                        INITIALIZER_LAYERS,
                    );
                    self.engine.type_of(&mut trace, &scope, initializer.body, None);
                }
            }
            None => {
                for initializer in &class.anonymous_initializers {
                    push_error(
                        &mut self.diagnostics,
                        &self.file,
                        initializer.span,
                        diagnostic_codes::ANONYMOUS_INITIALIZER_WITHOUT_PRIMARY_CONSTRUCTOR,
                        "Anonymous initializers are only allowed in the presence of a primary constructor",
                    );
                }
            }
        }
    }
}
