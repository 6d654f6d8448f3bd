#![allow(clippy::unwrap_used)]

mod tests_cache;

use crate::model::{CodeHolder, FileModel, ModelBuilder};
use crate::parser::kinds::HolderKind;
use crate::parser::{FormatHint, tokenize};

/// Build a model and link the loops of every holder
pub(super) fn build(text: &str) -> FileModel {
    let tokenized = tokenize(text, FormatHint::Auto);
    let mut model = ModelBuilder::new(&tokenized, None).build(tokenized);
    for kind in [HolderKind::TestCase, HolderKind::Task, HolderKind::Keyword] {
        for holder in model.code_table_mut(kind).iter_mut() {
            holder.link_loops();
        }
    }
    model
}

pub(super) fn first_holder(model: &FileModel) -> &CodeHolder {
    model.holders().next().unwrap()
}
