//! Build messages reported while reading robot files
//!
//! This module provides the diagnostics surface of the parser and model:
//! - Categorized error codes for filtering and documentation
//! - Severity levels
//! - Fix candidates for recoverable mistakes (e.g. misspelled headers)

mod codes;
mod message;

pub use codes::ErrorCode;
pub use message::{BuildMessage, BuildMessageBuilder, Severity};
