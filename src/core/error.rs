//! Hard failures of the crate.
//!
//! Problems in the parsed content are never errors: they are build messages
//! attached to the file model. These enums cover contract violations only.

use std::path::PathBuf;

use thiserror::Error;

/// Precondition violation of an editor command
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{what} index {index} is out of range (size {size})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        size: usize,
    },

    #[error("no such {0}")]
    NotFound(&'static str),

    #[error("file has no {0} section")]
    MissingTable(&'static str),

    #[error("cannot move {what} at index {index} {direction}")]
    InvalidMove {
        what: &'static str,
        index: usize,
        direction: &'static str,
    },

    #[error("invalid value for {what}: {reason}")]
    InvalidValue { what: &'static str, reason: String },

    #[error("nothing to {0}")]
    EmptyHistory(&'static str),
}

impl CommandError {
    pub fn out_of_range(what: &'static str, index: usize, size: usize) -> Self {
        Self::OutOfRange { what, index, size }
    }

    pub fn invalid_value(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            what,
            reason: reason.into(),
        }
    }
}

/// Failure to load a robot file from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a robot file")]
    UnsupportedExtension { path: PathBuf },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Invalid list of formal arguments
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentsDescriptorError {
    #[error("order of arguments is wrong: '{0}' follows an argument that must come after it")]
    WrongOrder(String),

    #[error("there should be only one vararg")]
    MultipleVarargs,

    #[error("there should be only one kwarg")]
    MultipleKwargs,

    #[error("argument name '{0}' is duplicated")]
    DuplicatedName(String),
}
