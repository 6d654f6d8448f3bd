#![allow(clippy::unwrap_used)]


use crate::model::{FileModel, ModelBuilder};
use crate::parser::{ErrorCode, FormatHint, tokenize};

use super::run_fixers;

/// Build a model without post-processing
pub(super) fn build(text: &str) -> FileModel {
    let tokenized = tokenize(text, FormatHint::Auto);
    ModelBuilder::new(&tokenized, None).build(tokenized)
}

/// Build a model and run every fixer once
pub(super) fn fixed(text: &str) -> FileModel {
    let mut model = build(text);
    run_fixers(&mut model);
    model
}

pub(super) fn codes(model: &FileModel) -> Vec<ErrorCode> {
    model.diagnostics().iter().map(|d| d.code).collect()
}
