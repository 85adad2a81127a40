//! Annot compiler: a single-pass front end for a small scripting language
//! with optional type annotations.
//!
//! Annotations never change how a program compiles. They are recorded in the
//! side tables from `annot-core` and compared against the types the compiler
//! can see without any inference worth the name:
//! - `lexer` - tokens
//! - `checker` - the single pass: scopes, slots, symbols and type checks
//! - `diagnostics` - error and warning reporting
//! - `config` - which checks run

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod checker;
pub mod config;
pub mod diagnostics;
pub mod lexer;

mod invariants;

#[cfg(test)]
pub mod test_utils;

pub use checker::{
    Compiled, FunctionSummary, LocalSummary, ModuleSummary, PRELUDE, VariableSummary, compile,
};
pub use config::Config;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};

/// Errors that stop a compilation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input nested deeper than [`Config::recursion_limit`] allows.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("compilation failed with {} errors", .0.error_count())]
    CompileFailed(Diagnostics),
}

pub type Result<T> = std::result::Result<T, Error>;
