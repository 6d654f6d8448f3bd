//! # robotide-base
//!
//! Core library for Robot Framework test data: parsing, an editable
//! document model with exact undo, and import resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Import resolution, file loading, parallel parsing
//!   ↓
//! cmd       → Editor commands, undo/redo session
//!   ↓
//! fixers    → Post-processing passes over a built model
//!   ↓
//! exec      → Row descriptors, variable expressions
//! libraries → Argument descriptors, call-site binding, library specs
//!   ↓
//! model     → File model, tables, setting operations, builder
//!   ↓
//! parser    → Line reader, separator lexer, token types, recognizers
//!   ↓
//! core      → Events, operation results, errors
//!   ↓
//! base      → Positions, element ids, constants
//! ```
//!
//! Parsing never fails: problems in the text are [`BuildMessage`]s attached
//! to the returned [`FileModel`], and dumping an unedited model gives back
//! the original text byte for byte.

// ============================================================================
// MODULES (dependency order: base → core → parser → model → exec/libraries
//          → fixers → cmd → project)
// ============================================================================

/// Foundation types: positions, element ids, constants
pub mod base;

/// Events, operation results and error enums
pub mod core;

/// Line reader, separator lexer, token types and recognizers
pub mod parser;

/// File model, tables and setting operations
pub mod model;

/// Row descriptors and variable expression extraction
pub mod exec;

/// Argument descriptors, call-site binding and library specifications
pub mod libraries;

/// Post-processing passes run after the builder
pub mod fixers;

/// Editor commands with exact undo
pub mod cmd;

/// Import resolution, file loading and parallel parsing
pub mod project;

// Re-export the common surface
pub use crate::base::{ElementId, FilePosition, FileRegion};
pub use crate::core::{CommandError, LoadError, ModelEvent, ModelEventKind};
pub use crate::model::{FileModel, ParseOptions};
pub use crate::parser::{BuildMessage, ErrorCode, FileFormat, FormatHint, Severity};

/// Parse robot test data into a post-processed file model.
///
/// The text is split into lines of cells, built into tables, run through
/// every fixer in [`fixers::FIXERS`] and given fresh token positions.
pub fn parse(text: &str, options: &ParseOptions) -> FileModel {
    let tokenized = parser::tokenize(text, options.format);
    let format = tokenized.format;
    let line_count = tokenized.lines.len();
    let mut model = model::ModelBuilder::new(&tokenized, options.path.clone()).build(tokenized);
    fixers::run_fixers(&mut model);
    model.refresh_positions();
    tracing::debug!(
        path = ?options.path(),
        ?format,
        lines = line_count,
        diagnostics = model.diagnostics().len(),
        "parsed robot file"
    );
    model
}
