//! Declaration modifiers as recorded by the parser.

use bitflags::bitflags;
use sable_common::Span;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ModifierFlags: u32 {
        const ABSTRACT = 1 << 0;
        const OVERRIDE = 1 << 1;
        const OPEN = 1 << 2;
        const SEALED = 1 << 3;
    }
}

/// Modifier flags plus the spans diagnostics attach to. Only the modifiers
/// body resolution reports on carry spans.
#[derive(Debug, Clone, Default)]
pub struct Modifiers {
    pub flags: ModifierFlags,
    pub abstract_span: Option<Span>,
    pub override_span: Option<Span>,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn abstract_at(span: Span) -> Self {
        Modifiers {
            flags: ModifierFlags::ABSTRACT,
            abstract_span: Some(span),
            override_span: None,
        }
    }

    pub fn override_at(span: Span) -> Self {
        Modifiers {
            flags: ModifierFlags::OVERRIDE,
            abstract_span: None,
            override_span: Some(span),
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ModifierFlags::ABSTRACT)
    }

    pub fn is_override(&self) -> bool {
        self.flags.contains(ModifierFlags::OVERRIDE)
    }
}
