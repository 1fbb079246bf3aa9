//! Transient lookup environments.
//!
//! A scope is an immutable parent pointer plus a local overlay of
//! name-to-symbol bindings, optionally carrying a `this` receiver type.
//! Scopes are built per resolution unit and discarded when that unit's body
//! has been resolved; they are never persisted. Shadowing is defined once:
//! the overlay is consulted before the parent.

use rustc_hash::FxHashMap;
use sable_solver::TypeId;

use crate::ids::{ClassId, ConstructorId, FunctionId, PropertyId};

/// What a name in scope resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    Class(ClassId),
    Function(FunctionId),
    Constructor(ConstructorId),
    Property(PropertyId),
    /// The `$name` form of a property — physical storage, not the accessor.
    BackingField(PropertyId),
    Parameter {
        constructor: ConstructorId,
        index: u32,
    },
    TypeParameter {
        property: PropertyId,
        index: u32,
    },
}

/// The synthetic name a property's backing field is visible under.
pub fn backing_field_name(property_name: &str) -> String {
    format!("${property_name}")
}

#[derive(Debug, Default)]
pub struct Scope<'a> {
    parent: Option<&'a Scope<'a>>,
    bindings: FxHashMap<String, SymbolRef>,
    this_type: Option<TypeId>,
}

impl<'a> Scope<'a> {
    pub fn root() -> Scope<'static> {
        Scope::default()
    }

    pub fn nested(parent: &'a Scope<'a>) -> Scope<'a> {
        Scope {
            parent: Some(parent),
            bindings: FxHashMap::default(),
            this_type: None,
        }
    }

    /// Insert into the local overlay. A later binding for the same name wins
    /// within one overlay.
    pub fn bind(&mut self, name: impl Into<String>, symbol: SymbolRef) {
        self.bindings.insert(name.into(), symbol);
    }

    pub fn set_this_type(&mut self, ty: TypeId) {
        self.this_type = Some(ty);
    }

    /// Overlay first, then the parent chain.
    pub fn lookup(&self, name: &str) -> Option<SymbolRef> {
        if let Some(&symbol) = self.bindings.get(name) {
            return Some(symbol);
        }
        self.parent.and_then(|parent| parent.lookup(name))
    }

    /// The nearest `this` type on the chain, if any scope set one.
    pub fn this_type(&self) -> Option<TypeId> {
        self.this_type
            .or_else(|| self.parent.and_then(|parent| parent.this_type()))
    }
}
