//! Type algebra for the Sable frontend.
//!
//! Body resolution consumes types as a service: it never builds structural
//! types of its own, it only asks questions about already-interned ones.
//! This crate answers those questions:
//!
//! - O(1) type identity via interning (`TypeId` comparison)
//! - the declared-supertype relation and reflexive-transitive subtyping
//! - member-signature overridability (`is_overridable_by`)
//!
//! Expression typing itself lives behind the checker's `InferenceEngine`
//! trait and is out of scope here.

mod intern;
pub mod overriding;
pub mod subtype;

pub use intern::{TypeData, TypeId, TypeTable};
pub use overriding::{OverrideIncompatibility, Signature, Visibility, is_overridable_by};
pub use subtype::is_subtype_of;
