//! Shared fixture builder and scripted inference engine.
//!
//! Tests construct the descriptor graph the way header resolution hands it
//! over: descriptors allocated with declared shapes, annotated types in the
//! binding store, and backing-field seeds for plain stored properties
//! (a non-abstract property with no accessor implementation gets storage by
//! default; everything else earns its flag during resolution).
//!
//! The engine is scripted: each expression handle may carry a result type
//! and a list of binding events to replay through the trace.

// Each integration-test binary compiles its own copy of this module and
// uses a different slice of it.
#![allow(dead_code)]

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use sable_binder::{
    AccessorDescriptor, AccessorKind, AnonymousInitializer, BindingStore, ClassDescriptor,
    ClassId, ClassKind, ConstructorDescriptor, ConstructorId, DelegationKind, DelegationSpecifier,
    ExprId, FunctionDescriptor, FunctionId, Modality, Modifiers, PropertyDescriptor, PropertyId,
    PropertyInitializer, Scope, SymbolArena, SymbolRef, TypeRefId, ValueParameter,
};
use sable_checker::{CheckerOptions, CheckerState, InferenceEngine, ResolutionTrace};
use sable_common::{Diagnostic, Span};
use sable_solver::{TypeId, TypeTable, Visibility};
use smallvec::SmallVec;

// ============================================================================
// Scripted engine
// ============================================================================

#[derive(Copy, Clone, Debug)]
pub enum EngineEvent {
    Reference(SymbolRef),
    Assignment(SymbolRef),
}

#[derive(Default)]
pub struct Script {
    pub result: Option<TypeId>,
    pub events: Vec<EngineEvent>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineCallKind {
    TypeOf,
    CheckBody,
    ResolveCall,
}

#[derive(Copy, Clone, Debug)]
pub struct EngineCall {
    pub kind: EngineCallKind,
    pub expr: ExprId,
    pub expected: Option<TypeId>,
}

#[derive(Default)]
pub struct ScriptedEngine {
    scripts: FxHashMap<ExprId, Script>,
    pub calls: RefCell<Vec<EngineCall>>,
}

impl ScriptedEngine {
    fn replay(&self, trace: &mut ResolutionTrace<'_>, expr: ExprId) {
        if let Some(script) = self.scripts.get(&expr) {
            for event in &script.events {
                match *event {
                    EngineEvent::Reference(target) => {
                        trace.record_reference(expr, Span::DUMMY, target);
                    }
                    EngineEvent::Assignment(target) => {
                        trace.record_assignment(expr, Span::DUMMY, target);
                    }
                }
            }
        }
    }

    fn log(&self, kind: EngineCallKind, expr: ExprId, expected: Option<TypeId>) {
        self.calls.borrow_mut().push(EngineCall {
            kind,
            expr,
            expected,
        });
    }
}

impl InferenceEngine for ScriptedEngine {
    fn type_of(
        &self,
        trace: &mut ResolutionTrace<'_>,
        _scope: &Scope<'_>,
        expr: ExprId,
        expected: Option<TypeId>,
    ) -> Option<TypeId> {
        self.log(EngineCallKind::TypeOf, expr, expected);
        self.replay(trace, expr);
        self.scripts.get(&expr).and_then(|script| script.result)
    }

    fn check_body(
        &self,
        trace: &mut ResolutionTrace<'_>,
        _scope: &Scope<'_>,
        body: ExprId,
        declared_return: Option<TypeId>,
    ) {
        self.log(EngineCallKind::CheckBody, body, declared_return);
        self.replay(trace, body);
    }

    fn resolve_call(
        &self,
        trace: &mut ResolutionTrace<'_>,
        _scope: &Scope<'_>,
        call: ExprId,
        expected: Option<TypeId>,
    ) -> Option<TypeId> {
        self.log(EngineCallKind::ResolveCall, call, expected);
        self.replay(trace, call);
        self.scripts.get(&call).and_then(|script| script.result)
    }
}

// ============================================================================
// Declaration specs
// ============================================================================

pub struct FunctionSpec {
    pub name: &'static str,
    pub class: Option<ClassId>,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
    pub modality: Modality,
    pub visibility: Visibility,
    pub override_modifier: bool,
    pub abstract_modifier: bool,
    pub has_body: bool,
    pub body_expr: Option<ExprId>,
}

impl Default for FunctionSpec {
    fn default() -> Self {
        FunctionSpec {
            name: "f",
            class: None,
            params: Vec::new(),
            return_type: TypeId::UNIT,
            modality: Modality::Final,
            visibility: Visibility::Public,
            override_modifier: false,
            abstract_modifier: false,
            has_body: true,
            body_expr: None,
        }
    }
}

#[derive(Default)]
pub struct AccessorSpec {
    pub has_body: bool,
    pub body_expr: Option<ExprId>,
    pub abstract_modifier: bool,
}

impl AccessorSpec {
    pub fn implemented() -> Self {
        AccessorSpec {
            has_body: true,
            ..Default::default()
        }
    }

    pub fn declared_only() -> Self {
        AccessorSpec::default()
    }
}

/// How the fixture seeds the backing-field flag before the pass runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BackingFieldSeed {
    /// The upstream rule: seed unless abstract or an accessor is
    /// implemented.
    #[default]
    Auto,
    Seeded,
    NotSeeded,
}

pub struct PropertySpec {
    pub name: &'static str,
    pub class: Option<ClassId>,
    pub out_type: TypeId,
    pub in_type: Option<TypeId>,
    pub modality: Modality,
    pub abstract_modifier: bool,
    pub has_initializer: bool,
    pub initializer_expr: Option<ExprId>,
    pub getter: Option<AccessorSpec>,
    pub setter: Option<AccessorSpec>,
    pub backing_field: BackingFieldSeed,
}

impl Default for PropertySpec {
    fn default() -> Self {
        PropertySpec {
            name: "x",
            class: None,
            out_type: TypeId::UNIT,
            in_type: None,
            modality: Modality::Final,
            abstract_modifier: false,
            has_initializer: false,
            initializer_expr: None,
            getter: None,
            setter: None,
            backing_field: BackingFieldSeed::Auto,
        }
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub struct Fixture {
    pub symbols: SymbolArena,
    pub types: TypeTable,
    pub bindings: BindingStore,
    pub engine: ScriptedEngine,
    next_expr: u32,
    next_type_ref: u32,
    next_span: u32,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            symbols: SymbolArena::new(),
            types: TypeTable::new(),
            bindings: BindingStore::new(),
            engine: ScriptedEngine::default(),
            next_expr: 0,
            next_type_ref: 0,
            next_span: 1,
        }
    }

    pub fn span(&mut self) -> Span {
        let start = self.next_span;
        self.next_span += 10;
        Span::new(start, start + 1)
    }

    pub fn expr(&mut self) -> ExprId {
        let id = ExprId::new(self.next_expr);
        self.next_expr += 1;
        id
    }

    pub fn script(&mut self, expr: ExprId, result: Option<TypeId>, events: Vec<EngineEvent>) {
        self.engine.scripts.insert(expr, Script { result, events });
    }

    /// A type reference annotated by the earlier type-annotation pass.
    pub fn type_ref_to(&mut self, ty: TypeId) -> TypeRefId {
        let type_ref = TypeRefId::new(self.next_type_ref);
        self.next_type_ref += 1;
        self.bindings.annotate_type_ref(type_ref, ty);
        type_ref
    }

    pub fn unannotated_type_ref(&mut self) -> TypeRefId {
        let type_ref = TypeRefId::new(self.next_type_ref);
        self.next_type_ref += 1;
        type_ref
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn add_class(&mut self, name: &str, kind: ClassKind, modality: Modality) -> ClassId {
        let default_type = self.types.declare(name);
        let name_span = self.span();
        let class_id = self.symbols.alloc_class(ClassDescriptor {
            name: name.to_string(),
            kind,
            modality,
            containing_class: None,
            default_type,
            supertypes: Vec::new(),
            resolved_supertypes: Vec::new(),
            delegation_specifiers: Vec::new(),
            anonymous_initializers: Vec::new(),
            primary_constructor: None,
            secondary_constructors: Vec::new(),
            functions: Vec::new(),
            properties: Vec::new(),
            name_span,
        });
        self.bindings.register_class_type(default_type, class_id);
        class_id
    }

    pub fn class_type(&self, class: ClassId) -> TypeId {
        self.symbols.class(class).default_type
    }

    /// Header-resolved supertypes: the descriptor list plus the type-table
    /// edges subtype queries walk.
    pub fn set_supertypes(&mut self, class: ClassId, supertypes: &[ClassId]) {
        let own = self.class_type(class);
        let types: Vec<TypeId> = supertypes.iter().map(|&s| self.class_type(s)).collect();
        for &supertype in &types {
            self.types.add_supertype(own, supertype);
        }
        self.symbols.class_mut(class).supertypes = types;
    }

    pub fn add_specifier(&mut self, class: ClassId, specifier: DelegationSpecifier) {
        self.symbols
            .class_mut(class)
            .delegation_specifiers
            .push(specifier);
    }

    pub fn super_type_specifier(&mut self, ty: TypeId) -> DelegationSpecifier {
        let type_ref = self.type_ref_to(ty);
        DelegationSpecifier {
            kind: DelegationKind::SuperType,
            type_ref,
            span: self.span(),
        }
    }

    pub fn super_call_specifier(&mut self, ty: TypeId, call: ExprId) -> DelegationSpecifier {
        let type_ref = self.type_ref_to(ty);
        DelegationSpecifier {
            kind: DelegationKind::SuperCall {
                call,
                args_span: None,
            },
            type_ref,
            span: self.span(),
        }
    }

    pub fn by_expression_specifier(
        &mut self,
        ty: TypeId,
        delegate: Option<ExprId>,
    ) -> DelegationSpecifier {
        let type_ref = self.type_ref_to(ty);
        DelegationSpecifier {
            kind: DelegationKind::ByExpression {
                delegate,
                delegate_span: None,
            },
            type_ref,
            span: self.span(),
        }
    }

    pub fn this_call_specifier(&mut self, call: ExprId) -> DelegationSpecifier {
        let type_ref = self.unannotated_type_ref();
        DelegationSpecifier {
            kind: DelegationKind::ThisCall { call },
            type_ref,
            span: self.span(),
        }
    }

    pub fn add_anonymous_initializer(&mut self, class: ClassId, body: ExprId) {
        let span = self.span();
        self.symbols
            .class_mut(class)
            .anonymous_initializers
            .push(AnonymousInitializer { body, span });
    }

    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    pub fn add_primary_constructor(
        &mut self,
        class: ClassId,
        params: Vec<ValueParameter>,
    ) -> ConstructorId {
        let name_span = self.span();
        let constructor_id = self.symbols.alloc_constructor(ConstructorDescriptor {
            class,
            is_primary: true,
            params,
            initializers: Vec::new(),
            body: None,
            name_span,
        });
        self.symbols.class_mut(class).primary_constructor = Some(constructor_id);
        constructor_id
    }

    pub fn add_secondary_constructor(
        &mut self,
        class: ClassId,
        initializers: Vec<DelegationSpecifier>,
        body: Option<ExprId>,
    ) -> ConstructorId {
        let name_span = self.span();
        let constructor_id = self.symbols.alloc_constructor(ConstructorDescriptor {
            class,
            is_primary: false,
            params: Vec::new(),
            initializers,
            body,
            name_span,
        });
        self.symbols
            .class_mut(class)
            .secondary_constructors
            .push(constructor_id);
        constructor_id
    }

    pub fn param(&mut self, name: &str, ty: TypeId) -> ValueParameter {
        ValueParameter {
            name: name.to_string(),
            ty,
            span: self.span(),
            promotes: None,
        }
    }

    pub fn promoted_param(&mut self, name: &str, ty: TypeId, property: PropertyId) -> ValueParameter {
        ValueParameter {
            name: name.to_string(),
            ty,
            span: self.span(),
            promotes: Some(property),
        }
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    pub fn add_function(&mut self, spec: FunctionSpec) -> FunctionId {
        let body = if spec.has_body {
            Some(spec.body_expr.unwrap_or_else(|| self.expr()))
        } else {
            None
        };
        let mut modifiers = Modifiers::none();
        if spec.abstract_modifier {
            let span = self.span();
            modifiers.flags |= sable_binder::ModifierFlags::ABSTRACT;
            modifiers.abstract_span = Some(span);
        }
        if spec.override_modifier {
            let span = self.span();
            modifiers.flags |= sable_binder::ModifierFlags::OVERRIDE;
            modifiers.override_span = Some(span);
        }
        let name_span = self.span();
        let function_id = self.symbols.alloc_function(FunctionDescriptor {
            name: spec.name.to_string(),
            containing_class: spec.class,
            modality: spec.modality,
            visibility: spec.visibility,
            modifiers,
            params: spec
                .params
                .iter()
                .enumerate()
                .map(|(i, &ty)| ValueParameter {
                    name: format!("p{i}"),
                    ty,
                    span: Span::DUMMY,
                    promotes: None,
                })
                .collect(),
            return_type: spec.return_type,
            body,
            overridden: SmallVec::new(),
            name_span,
        });
        if let Some(class) = spec.class {
            self.symbols.class_mut(class).functions.push(function_id);
        }
        function_id
    }

    pub fn add_property(&mut self, spec: PropertySpec) -> PropertyId {
        let initializer = if spec.has_initializer {
            let expr = spec.initializer_expr.unwrap_or_else(|| self.expr());
            Some(PropertyInitializer {
                expr,
                span: self.span(),
            })
        } else {
            None
        };
        let getter = spec
            .getter
            .map(|accessor| self.accessor(AccessorKind::Getter, accessor));
        let setter = spec
            .setter
            .map(|accessor| self.accessor(AccessorKind::Setter, accessor));
        let modifiers = if spec.abstract_modifier {
            Modifiers::abstract_at(self.span())
        } else {
            Modifiers::none()
        };
        let name_span = self.span();
        let has_accessor_implementation = getter.as_ref().is_some_and(|g| g.body.is_some())
            || setter.as_ref().is_some_and(|s| s.body.is_some());
        let property_id = self.symbols.alloc_property(PropertyDescriptor {
            name: spec.name.to_string(),
            containing_class: spec.class,
            modality: spec.modality,
            modifiers,
            in_type: spec.in_type,
            out_type: spec.out_type,
            receiver_type: None,
            type_parameters: Vec::new(),
            initializer,
            getter,
            setter,
            name_span,
        });
        if let Some(class) = spec.class {
            self.symbols.class_mut(class).properties.push(property_id);
        }
        let seed = match spec.backing_field {
            BackingFieldSeed::Auto => {
                spec.modality != Modality::Abstract && !has_accessor_implementation
            }
            BackingFieldSeed::Seeded => true,
            BackingFieldSeed::NotSeeded => false,
        };
        if seed {
            self.bindings.require_backing_field(property_id);
        }
        property_id
    }

    fn accessor(&mut self, kind: AccessorKind, spec: AccessorSpec) -> AccessorDescriptor {
        let body = if spec.has_body {
            Some(spec.body_expr.unwrap_or_else(|| self.expr()))
        } else {
            None
        };
        let modifiers = if spec.abstract_modifier {
            Modifiers::abstract_at(self.span())
        } else {
            Modifiers::none()
        };
        AccessorDescriptor {
            kind,
            body,
            modifiers,
            span: self.span(),
        }
    }

    // ------------------------------------------------------------------
    // Running the pass
    // ------------------------------------------------------------------

    pub fn resolve(self) -> Outcome {
        self.resolve_with_options(CheckerOptions::default())
    }

    pub fn resolve_with_options(mut self, options: CheckerOptions) -> Outcome {
        let diagnostics = {
            let mut checker = CheckerState::new(
                &mut self.symbols,
                &self.types,
                &mut self.bindings,
                &self.engine,
                "test.sable".to_string(),
                options,
            );
            checker.resolve_declaration_bodies();
            checker.take_diagnostics()
        };
        Outcome {
            diagnostics,
            symbols: self.symbols,
            bindings: self.bindings,
            calls: self.engine.calls.into_inner(),
        }
    }
}

pub struct Outcome {
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolArena,
    pub bindings: BindingStore,
    pub calls: Vec<EngineCall>,
}

impl Outcome {
    pub fn count_code(&self, code: u32) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }

    pub fn messages_for(&self, code: u32) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.code == code)
            .map(|d| d.message_text.as_str())
            .collect()
    }

    pub fn assert_no_diagnostics(&self) {
        assert!(
            self.diagnostics.is_empty(),
            "expected no diagnostics, got {:?}",
            self.diagnostics
        );
    }
}
