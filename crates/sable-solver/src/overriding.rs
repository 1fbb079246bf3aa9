//! Member-signature overridability.
//!
//! The override binder asks, per inherited candidate, whether a declared
//! member may override it. The answer is structural: matching name and
//! arity, invariant parameter types, covariant return type, and a visible
//! candidate. Modality (final members cannot be overridden) is deliberately
//! not checked here — the consistency checker reports it separately so the
//! override edge still gets recorded.

use crate::intern::{TypeId, TypeTable};
use crate::subtype::is_subtype_of;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// The comparable shape of a member function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
    pub visibility: Visibility,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverrideIncompatibility {
    NameMismatch,
    ParameterCountMismatch,
    ParameterTypeMismatch { index: usize },
    ReturnTypeMismatch,
    Invisible,
}

/// Whether `declared` may override `candidate` (a member inherited from a
/// supertype).
pub fn is_overridable_by(
    table: &TypeTable,
    candidate: &Signature,
    declared: &Signature,
) -> Result<(), OverrideIncompatibility> {
    if candidate.name != declared.name {
        return Err(OverrideIncompatibility::NameMismatch);
    }
    if candidate.visibility == Visibility::Private {
        return Err(OverrideIncompatibility::Invisible);
    }
    if candidate.params.len() != declared.params.len() {
        return Err(OverrideIncompatibility::ParameterCountMismatch);
    }
    for (index, (&expected, &actual)) in
        candidate.params.iter().zip(declared.params.iter()).enumerate()
    {
        if expected != actual {
            return Err(OverrideIncompatibility::ParameterTypeMismatch { index });
        }
    }
    if !is_subtype_of(table, declared.return_type, candidate.return_type) {
        return Err(OverrideIncompatibility::ReturnTypeMismatch);
    }
    Ok(())
}
