//! Post-processing passes over a freshly built model.
//!
//! The builder works line by line and leaves a few constructs half done.
//! [`FIXERS`] finish them in order:
//! - [`UnknownSettingsFixer`] - `[Bracketed]` rows that are no known setting
//! - [`EmptyRowsFixer`] - blank lines inside holders become rows
//! - [`DocumentationFixer`] - documentation continued across comment lines
//! - [`ForLoopFixer`] - `FOR`/`END` pairing and loop body tags
//! - [`LibraryAliasFixer`] - `WITH NAME alias` of library imports
//!
//! Every pass is idempotent: running [`run_fixers`] again on its own
//! output changes nothing and reports nothing new.

mod documentation;
mod empty_rows;
mod for_loops;
mod library_alias;
mod unknown_settings;

pub use documentation::DocumentationFixer;
pub use empty_rows::EmptyRowsFixer;
pub use for_loops::ForLoopFixer;
pub use library_alias::LibraryAliasFixer;
pub use unknown_settings::UnknownSettingsFixer;

use crate::base::FileRegion;
use crate::model::{CodeRow, FileModel};
use crate::parser::token::RobotLine;

pub trait PostProcessFixer: Sync {
    fn name(&self) -> &'static str;

    /// Apply the pass, returning whether the model or its diagnostics changed
    fn fix(&self, model: &mut FileModel) -> bool;
}

/// Passes in the order they run; later passes rely on earlier ones
pub static FIXERS: [&dyn PostProcessFixer; 5] = [
    &UnknownSettingsFixer,
    &EmptyRowsFixer,
    &DocumentationFixer,
    &ForLoopFixer,
    &LibraryAliasFixer,
];

/// Run every pass over `model`, returning how many changed something
pub fn run_fixers(model: &mut FileModel) -> usize {
    let mut changed = 0;
    for fixer in FIXERS {
        if fixer.fix(model) {
            tracing::debug!(fixer = fixer.name(), "post-processing changed the model");
            changed += 1;
        }
    }
    changed
}

/// Region of the first non-empty token of `line`
fn line_region(line: &RobotLine) -> Option<FileRegion> {
    line.tokens().find(|t| !t.is_empty()).map(|t| t.region())
}

fn row_region(row: &CodeRow) -> Option<FileRegion> {
    match row.first_cell() {
        Some(token) => Some(token.region()),
        None => row.physical_lines().first().and_then(line_region),
    }
}

#[cfg(test)]
mod tests;
