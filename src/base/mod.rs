//! Foundation types for the robot test data model.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FilePosition`], [`FileRegion`] - Line/column/offset positions of tokens
//! - [`ElementId`] - Stable identity of model elements across edits
//! - Domain constants (file extensions, markers)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod element_id;
mod position;

pub use element_id::ElementId;
pub use position::{FilePosition, FileRegion};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
