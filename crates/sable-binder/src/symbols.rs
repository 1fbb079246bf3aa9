//! Descriptor graph handed over by header resolution.
//!
//! Descriptors arrive with their declared-but-unresolved shapes populated.
//! Body resolution never allocates new descriptors; it adds override edges,
//! writes resolved supertype lists, and records per-property facts in the
//! `BindingStore`.

use sable_common::Span;
use sable_solver::{Signature, TypeId, Visibility};
use smallvec::SmallVec;

use crate::ids::{ClassId, ConstructorId, ExprId, FunctionId, PropertyId, TypeRefId};
use crate::modifiers::Modifiers;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Trait,
    Object,
    EnumClass,
    EnumEntry,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Modality {
    Final,
    Open,
    Abstract,
    Sealed,
}

impl Modality {
    /// Whether a member with this modality may be overridden.
    pub fn is_open(self) -> bool {
        matches!(self, Modality::Open | Modality::Abstract)
    }
}

/// One supertype clause of a class header.
#[derive(Debug, Clone)]
pub struct DelegationSpecifier {
    pub kind: DelegationKind,
    pub type_ref: TypeRefId,
    pub span: Span,
}

/// The closed set of delegation forms. `ThisCall` is legal only as the first
/// entry of a secondary constructor's initializer list; the parser rejects it
/// in supertype position.
#[derive(Debug, Clone)]
pub enum DelegationKind {
    ByExpression {
        delegate: Option<ExprId>,
        delegate_span: Option<Span>,
    },
    SuperCall {
        call: ExprId,
        args_span: Option<Span>,
    },
    SuperType,
    ThisCall {
        call: ExprId,
    },
}

#[derive(Debug, Clone)]
pub struct AnonymousInitializer {
    pub body: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ValueParameter {
    pub name: String,
    pub ty: TypeId,
    pub span: Span,
    /// Set when a `val`/`var` primary-constructor parameter was promoted to
    /// a member property by header resolution.
    pub promotes: Option<PropertyId>,
}

#[derive(Debug, Clone)]
pub struct TypeParameter {
    pub name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

#[derive(Debug, Clone)]
pub struct AccessorDescriptor {
    pub kind: AccessorKind,
    pub body: Option<ExprId>,
    pub modifiers: Modifiers,
    pub span: Span,
}

#[derive(Copy, Clone, Debug)]
pub struct PropertyInitializer {
    pub expr: ExprId,
    pub span: Span,
}

#[derive(Debug)]
pub struct ClassDescriptor {
    pub name: String,
    pub kind: ClassKind,
    pub modality: Modality,
    /// Enum entries point at their enum; nested declarations at their owner.
    pub containing_class: Option<ClassId>,
    /// The type this class declares.
    pub default_type: TypeId,
    /// Header-resolved supertypes, available before body resolution.
    pub supertypes: Vec<TypeId>,
    /// Written by body resolution after specifier resolution and validation.
    pub resolved_supertypes: Vec<TypeId>,
    pub delegation_specifiers: Vec<DelegationSpecifier>,
    pub anonymous_initializers: Vec<AnonymousInitializer>,
    pub primary_constructor: Option<ConstructorId>,
    pub secondary_constructors: Vec<ConstructorId>,
    pub functions: Vec<FunctionId>,
    pub properties: Vec<PropertyId>,
    pub name_span: Span,
}

impl ClassDescriptor {
    pub fn has_constructors(&self) -> bool {
        self.primary_constructor.is_some() || !self.secondary_constructors.is_empty()
    }
}

#[derive(Debug)]
pub struct FunctionDescriptor {
    pub name: String,
    pub containing_class: Option<ClassId>,
    pub modality: Modality,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub params: Vec<ValueParameter>,
    pub return_type: TypeId,
    pub body: Option<ExprId>,
    /// Override edges, recorded by the override binder. At most one edge per
    /// supertype.
    pub overridden: SmallVec<[FunctionId; 2]>,
    pub name_span: Span,
}

impl FunctionDescriptor {
    pub fn signature(&self) -> Signature {
        Signature {
            name: self.name.clone(),
            params: self.params.iter().map(|p| p.ty).collect(),
            return_type: self.return_type,
            visibility: self.visibility,
        }
    }
}

#[derive(Debug)]
pub struct PropertyDescriptor {
    pub name: String,
    pub containing_class: Option<ClassId>,
    pub modality: Modality,
    pub modifiers: Modifiers,
    /// Write type; differs from `out_type` under get/set asymmetry.
    pub in_type: Option<TypeId>,
    /// Read type.
    pub out_type: TypeId,
    pub receiver_type: Option<TypeId>,
    pub type_parameters: Vec<TypeParameter>,
    pub initializer: Option<PropertyInitializer>,
    pub getter: Option<AccessorDescriptor>,
    pub setter: Option<AccessorDescriptor>,
    pub name_span: Span,
}

impl PropertyDescriptor {
    /// The type an initializer expression is checked against.
    pub fn expected_type(&self) -> TypeId {
        self.in_type.unwrap_or(self.out_type)
    }

    pub fn has_accessor_implementation(&self) -> bool {
        self.getter.as_ref().is_some_and(|g| g.body.is_some())
            || self.setter.as_ref().is_some_and(|s| s.body.is_some())
    }
}

#[derive(Debug)]
pub struct ConstructorDescriptor {
    pub class: ClassId,
    pub is_primary: bool,
    pub params: Vec<ValueParameter>,
    /// Secondary-constructor initializer list; empty for primaries.
    pub initializers: Vec<DelegationSpecifier>,
    pub body: Option<ExprId>,
    pub name_span: Span,
}

/// Owner of every descriptor in a compilation unit. Ids are indices; the
/// iteration order of each table is declaration order.
#[derive(Debug, Default)]
pub struct SymbolArena {
    classes: Vec<ClassDescriptor>,
    functions: Vec<FunctionDescriptor>,
    properties: Vec<PropertyDescriptor>,
    constructors: Vec<ConstructorDescriptor>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_class(&mut self, descriptor: ClassDescriptor) -> ClassId {
        let id = ClassId::new(self.classes.len() as u32);
        tracing::trace!(name = %descriptor.name, ?id, "alloc class descriptor");
        self.classes.push(descriptor);
        id
    }

    pub fn alloc_function(&mut self, descriptor: FunctionDescriptor) -> FunctionId {
        let id = FunctionId::new(self.functions.len() as u32);
        self.functions.push(descriptor);
        id
    }

    pub fn alloc_property(&mut self, descriptor: PropertyDescriptor) -> PropertyId {
        let id = PropertyId::new(self.properties.len() as u32);
        self.properties.push(descriptor);
        id
    }

    pub fn alloc_constructor(&mut self, descriptor: ConstructorDescriptor) -> ConstructorId {
        let id = ConstructorId::new(self.constructors.len() as u32);
        self.constructors.push(descriptor);
        id
    }

    pub fn class(&self, id: ClassId) -> &ClassDescriptor {
        &self.classes[id.index()]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassDescriptor {
        &mut self.classes[id.index()]
    }

    pub fn function(&self, id: FunctionId) -> &FunctionDescriptor {
        &self.functions[id.index()]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut FunctionDescriptor {
        &mut self.functions[id.index()]
    }

    pub fn property(&self, id: PropertyId) -> &PropertyDescriptor {
        &self.properties[id.index()]
    }

    pub fn property_mut(&mut self, id: PropertyId) -> &mut PropertyDescriptor {
        &mut self.properties[id.index()]
    }

    pub fn constructor(&self, id: ConstructorId) -> &ConstructorDescriptor {
        &self.constructors[id.index()]
    }

    pub fn constructor_mut(&mut self, id: ConstructorId) -> &mut ConstructorDescriptor {
        &mut self.constructors[id.index()]
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + use<> {
        (0..self.classes.len() as u32).map(ClassId::new)
    }

    pub fn function_ids(&self) -> impl Iterator<Item = FunctionId> + use<> {
        (0..self.functions.len() as u32).map(FunctionId::new)
    }

    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> + use<> {
        (0..self.properties.len() as u32).map(PropertyId::new)
    }

    pub fn constructor_ids(&self) -> impl Iterator<Item = ConstructorId> + use<> {
        (0..self.constructors.len() as u32).map(ConstructorId::new)
    }

    /// Display name of a member's containing declaration, for diagnostics.
    pub fn container_name(&self, containing_class: Option<ClassId>) -> &str {
        match containing_class {
            Some(id) => &self.class(id).name,
            None => "<root>",
        }
    }
}
