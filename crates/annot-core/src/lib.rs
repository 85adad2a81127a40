#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Side tables for optional type annotations in a single-pass compiler.
//!
//! The language being compiled stays dynamically typed; annotations only feed
//! advisory warnings. Two tables live here:
//! - [`FunctionTypeScope`]: per function body, annotations by local slot plus
//!   the return type and the type of the last compiled expression
//! - [`ModuleTypeTable`]: per module, annotations by module symbol index
//!
//! Both borrow annotation text from the source buffer and never fail: absent or
//! out-of-range lookups read as `None`, and [`types_match`] treats `None` as
//! matching anything.

mod annotation;
mod module_table;
mod scope;

#[cfg(test)]
mod scope_tests;

pub use annotation::{TypeAnnotation, types_match};
pub use module_table::ModuleTypeTable;
pub use scope::FunctionTypeScope;

/// Maximum number of local slots in one function.
///
/// Compilers driving a [`FunctionTypeScope`] must bound their own locals array
/// with this constant; a larger bound would make high slots read as unannotated.
pub const MAX_LOCALS: usize = 256;

/// Maximum number of annotated module variables tracked per module.
pub const MAX_MODULE_TYPES: usize = 512;
