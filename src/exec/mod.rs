//! Executable row analysis.
//!
//! This module derives views over the rows of test cases, tasks and
//! keywords:
//! - [`RowDescriptor`] - Row type, action, arguments and variables of one row
//! - [`builders`] - Ordered builders producing descriptors
//! - [`DescriptorCache`] - Descriptors per holder, rebuilt after edits
//! - [`variables`] - Variable expression extractor working on any text
//!
//! Nothing here mutates the model.

pub mod builders;
pub mod cache;
pub mod descriptor;
pub mod variables;

pub use builders::{DescriptorBuilder, describe_all, describe as describe_row, find_loop_start};
pub use cache::DescriptorCache;
pub use descriptor::{RowDescriptor, RowType, VariableReference};
pub use variables::{
    ExtractionResult, Extracted, IndexDeclaration, VariableDeclaration, VariableScope, extract,
    extract_from_token,
};

use crate::model::CodeHolder;

/// Descriptors of every row of `holder`
pub fn describe_holder(holder: &CodeHolder) -> Vec<RowDescriptor> {
    describe_all(holder.rows())
}

#[cfg(test)]
mod tests;
