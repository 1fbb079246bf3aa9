//! Symbol registry for the Sable compiler frontend.
//!
//! Header resolution runs before body resolution and hands over the
//! descriptor graph this crate models:
//! - typed ids and the `SymbolArena` of class / function / property /
//!   constructor descriptors
//! - modifier flags with their source spans
//! - delegation specifiers (a closed union over the legal supertype clauses)
//! - the transient `Scope` chain used while resolving bodies
//! - the `BindingStore` of per-declaration facts (annotated types, reference
//!   targets, and the two monotonic per-property flags)
//!
//! Body resolution mutates descriptors in place (override edges, resolved
//! supertypes) and writes the rest of its output into the `BindingStore`.

pub mod ids;
pub mod modifiers;
pub mod scope;
pub mod store;
pub mod symbols;

pub use ids::{ClassId, ConstructorId, ExprId, FunctionId, PropertyId, TypeRefId};
pub use modifiers::{ModifierFlags, Modifiers};
pub use scope::{Scope, SymbolRef, backing_field_name};
pub use store::BindingStore;
pub use symbols::{
    AccessorDescriptor, AccessorKind, AnonymousInitializer, ClassDescriptor, ClassKind,
    ConstructorDescriptor, DelegationKind, DelegationSpecifier, FunctionDescriptor, Modality,
    PropertyDescriptor, PropertyInitializer, SymbolArena, TypeParameter, ValueParameter,
};
