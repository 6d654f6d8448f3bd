#![allow(clippy::unwrap_used)]

mod tests_builder;
mod tests_holders;
mod tests_operations;
mod tests_round_trip;

use super::{FileModel, ModelBuilder};
use crate::parser::{FormatHint, tokenize};

/// Build a model without running the fixers
pub(super) fn build(text: &str) -> FileModel {
    let tokenized = tokenize(text, FormatHint::Auto);
    ModelBuilder::new(&tokenized, None).build(tokenized)
}
