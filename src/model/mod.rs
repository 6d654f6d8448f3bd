//! Section-aware document model of a robot file.
//!
//! [`ModelBuilder`] turns tokenized lines into a [`FileModel`]:
//! - one [`SettingTable`] whose elements are driven by per-kind
//!   [`SettingOperation`]s
//! - one [`VariableTable`]
//! - one [`CodeTable`] per holder kind (test cases, tasks, keywords)
//!
//! Every element owns its physical lines, so [`FileModel::dump`] is a plain
//! concatenation and reproduces the input exactly.

pub mod builder;
pub mod cells;
pub mod file;
pub mod holders;
pub mod operations;
pub mod options;
pub mod settings;
pub mod table;
pub mod variables;

pub use builder::ModelBuilder;
pub use file::FileModel;
pub use holders::{CodeHolder, CodeRow, CodeTable, LoopProblem, ROW_DATA_COLUMN, RowKind, classify_row};
pub use operations::{CellAddress, SettingOperation, operation_for, operation_for_token};
pub use options::ParseOptions;
pub use settings::{Setting, SettingTable};
pub use table::{Section, SectionId, Table, TableElement};
pub use variables::{Variable, VariableKind, VariableTable};

#[cfg(test)]
mod tests;
