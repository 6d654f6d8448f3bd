//! Error code definitions for build messages
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Header errors
//! - E02xx: Table structure errors
//! - E03xx: Setting errors
//! - E04xx: Variable errors
//! - E05xx: Import errors
//! - E06xx: Loop errors

use std::fmt;

use super::message::Severity;

/// Error codes for build messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Header errors
    // =========================================================================
    /// Header close to a known one (probably misspelled)
    E0101,
    /// Header not recognized at all
    E0102,
    /// Deprecated header name
    E0103,

    // =========================================================================
    // E02xx: Table structure errors
    // =========================================================================
    /// Executable step outside of any test case, task or keyword
    E0201,
    /// Continuation marker without an element to continue
    E0202,
    /// Unknown bracketed setting inside a code holder
    E0203,

    // =========================================================================
    // E03xx: Setting errors
    // =========================================================================
    /// Unknown setting name
    E0301,
    /// Deprecated setting name
    E0302,
    /// Setting declared without a required value
    E0303,

    // =========================================================================
    // E04xx: Variable errors
    // =========================================================================
    /// Invalid variable declaration
    E0401,
    /// Unclosed variable brace or bracket
    E0402,
    /// Environment variable declared in variables table
    E0403,

    // =========================================================================
    // E05xx: Import errors
    // =========================================================================
    /// Import path is ambiguous under robot's escaping rules
    E0501,
    /// Import could not be resolved
    E0502,
    /// Variables file could not be evaluated
    E0503,
    /// Variables file defines no variables
    E0504,
    /// No library specification matches the import
    E0505,

    // =========================================================================
    // E06xx: Loop errors
    // =========================================================================
    /// Loop header without `IN` marker
    E0601,
    /// Loop header without values to iterate
    E0602,
    /// Loop not closed with `END`
    E0603,
    /// `END` without an open loop
    E0604,
    /// Loop header without loop variables
    E0605,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            Self::E0505 => "E0505",
            Self::E0601 => "E0601",
            Self::E0602 => "E0602",
            Self::E0603 => "E0603",
            Self::E0604 => "E0604",
            Self::E0605 => "E0605",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "header error",
            Self::E0201 | Self::E0202 | Self::E0203 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 => "setting error",
            Self::E0401 | Self::E0402 | Self::E0403 => "variable error",
            Self::E0501 | Self::E0502 | Self::E0503 | Self::E0504 | Self::E0505 => "import error",
            Self::E0601 | Self::E0602 | Self::E0603 | Self::E0604 | Self::E0605 => "loop error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "unrecognized table header",
            Self::E0102 => "unknown table header",
            Self::E0103 => "deprecated table header",
            Self::E0201 => "step outside of test case or keyword",
            Self::E0202 => "nothing to continue",
            Self::E0203 => "unknown setting",
            Self::E0301 => "unknown setting",
            Self::E0302 => "deprecated setting",
            Self::E0303 => "missing setting value",
            Self::E0401 => "invalid variable declaration",
            Self::E0402 => "unclosed variable",
            Self::E0403 => "environment variable cannot be declared",
            Self::E0501 => "illegal path",
            Self::E0502 => "unresolved import",
            Self::E0503 => "variables file error",
            Self::E0504 => "empty variables file",
            Self::E0505 => "library not found",
            Self::E0601 => "missing 'IN' in loop",
            Self::E0602 => "missing loop values",
            Self::E0603 => "loop not closed",
            Self::E0604 => "'END' without loop",
            Self::E0605 => "missing loop variable",
        }
    }

    /// Severity used when a message does not specify one
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::E0103 | Self::E0302 => Severity::Info,
            Self::E0504 | Self::E0604 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
