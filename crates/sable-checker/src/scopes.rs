//! Scope construction for resolution units.
//!
//! Pure construction, no error conditions. Every builder returns a fresh
//! transient scope; nothing here is persisted.

use sable_binder::{
    ClassId, ConstructorId, PropertyId, Scope, SymbolArena, SymbolRef, backing_field_name,
};

/// Top-level declarations of the compilation unit.
pub(crate) fn file_scope(symbols: &SymbolArena) -> Scope<'static> {
    let mut scope = Scope::root();
    for class_id in symbols.class_ids() {
        let class = symbols.class(class_id);
        if class.containing_class.is_none() {
            scope.bind(class.name.clone(), SymbolRef::Class(class_id));
        }
    }
    for function_id in symbols.function_ids() {
        let function = symbols.function(function_id);
        if function.containing_class.is_none() {
            scope.bind(function.name.clone(), SymbolRef::Function(function_id));
        }
    }
    for property_id in symbols.property_ids() {
        let property = symbols.property(property_id);
        if property.containing_class.is_none() {
            scope.bind(property.name.clone(), SymbolRef::Property(property_id));
        }
    }
    scope
}

/// The scope members of `class` resolve in: every member by name, with
/// `this` set to the class's own type.
pub(crate) fn member_scope(symbols: &SymbolArena, class_id: ClassId) -> Scope<'static> {
    let class = symbols.class(class_id);
    let mut scope = Scope::root();
    for &function_id in &class.functions {
        scope.bind(
            symbols.function(function_id).name.clone(),
            SymbolRef::Function(function_id),
        );
    }
    for &property_id in &class.properties {
        scope.bind(
            symbols.property(property_id).name.clone(),
            SymbolRef::Property(property_id),
        );
    }
    scope.set_this_type(class.default_type);
    scope
}

/// The scope inside a constructor and its initializers: the member scope,
/// an overlay exposing every declared property under its backing-field
/// name, `this` set to the class's own type, and the constructor's value
/// parameters. For a primary constructor, parameters promoted to properties
/// are left out — the property binding in the parent already covers them.
pub(crate) fn constructor_scope<'a>(
    symbols: &SymbolArena,
    outer: &'a Scope<'a>,
    constructor_id: ConstructorId,
    primary: bool,
) -> Scope<'a> {
    let constructor = symbols.constructor(constructor_id);
    let class = symbols.class(constructor.class);
    let mut scope = Scope::nested(outer);
    for &property_id in &class.properties {
        scope.bind(
            backing_field_name(&symbols.property(property_id).name),
            SymbolRef::BackingField(property_id),
        );
    }
    scope.set_this_type(class.default_type);
    for (index, parameter) in constructor.params.iter().enumerate() {
        if parameter.promotes.is_none() || !primary {
            scope.bind(
                parameter.name.clone(),
                SymbolRef::Parameter {
                    constructor: constructor_id,
                    index: index as u32,
                },
            );
        }
    }
    scope
}

/// A property declaration's inner scope: its own type parameters, and
/// `this` rebound to the receiver type when the property has one.
pub(crate) fn property_declaration_scope<'a>(
    symbols: &SymbolArena,
    outer: &'a Scope<'a>,
    property_id: PropertyId,
) -> Scope<'a> {
    let property = symbols.property(property_id);
    let mut scope = Scope::nested(outer);
    for (index, type_parameter) in property.type_parameters.iter().enumerate() {
        scope.bind(
            type_parameter.name.clone(),
            SymbolRef::TypeParameter {
                property: property_id,
                index: index as u32,
            },
        );
    }
    if let Some(receiver) = property.receiver_type {
        scope.set_this_type(receiver);
    }
    scope
}

/// Accessor bodies additionally see their own property's backing field.
pub(crate) fn accessor_scope<'a>(
    symbols: &SymbolArena,
    outer: &'a Scope<'a>,
    property_id: PropertyId,
) -> Scope<'a> {
    let mut scope = Scope::nested(outer);
    scope.bind(
        backing_field_name(&symbols.property(property_id).name),
        SymbolRef::BackingField(property_id),
    );
    scope
}
