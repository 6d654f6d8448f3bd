//! Keyword signatures and call validation.
//!
//! - [`ArgumentsDescriptor`] - Formal arguments of a keyword or constructor
//! - [`bind`] - Assign call-site arguments to formal arguments
//! - [`LibrarySpecification`] - Keywords and constructor of a library

pub mod arguments;
pub mod binder;
mod relation;
pub mod specification;

pub use arguments::{Argument, ArgumentKind, ArgumentsDescriptor, ArityRange};
pub use binder::{ArgumentTag, BoundArguments, CallSiteArgument, bind, can_bind};
pub use relation::SymmetricRelation;
pub use specification::{KeywordSpecification, LibrarySpecification, find_specification};

#[cfg(test)]
mod tests;
