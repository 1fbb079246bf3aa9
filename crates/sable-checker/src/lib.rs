//! Body resolution for the Sable compiler frontend.
//!
//! Runs after header resolution has produced preliminary descriptors and
//! before lowering. The pass resolves everything inside declaration bodies —
//! function bodies, property initializers and accessors, anonymous
//! initializer blocks, constructor delegation chains — binds override
//! relationships across inheritance hierarchies, discovers backing-field
//! requirements by observing reference resolution, and runs the
//! cross-cutting consistency sweep (abstractness, override modifiers,
//! supertype legality, constructor necessity).
//!
//! The module layout follows the pipeline:
//! - `scopes` - scope construction for resolution units
//! - `override_binder` - override-edge recording
//! - `supertypes` - delegation-specifier resolution and supertype validation
//! - `initializers` - anonymous initializer blocks
//! - `constructors` - secondary-constructor delegation chains
//! - `properties` - property initializers, accessors, legality matrices
//! - `functions` - function bodies and the abstract/body matrix
//! - `class_checker` - the final consistency sweep
//! - `trace` - the observer layers feeding the backing-field flags
//! - `engine` - the expression-typing service this phase consumes

mod class_checker;
mod constructors;
pub mod engine;
mod error_reporter;
mod functions;
mod initializers;
mod override_binder;
mod properties;
mod scopes;
pub mod state;
mod supertypes;
pub mod trace;

pub use engine::InferenceEngine;
pub use state::{CheckerOptions, CheckerState};
pub use trace::{ResolutionTrace, TraceLayer};

pub mod diagnostics {
    pub use sable_common::diagnostics::{
        Diagnostic, DiagnosticCategory, diagnostic_codes,
    };
}
