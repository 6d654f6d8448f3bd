//! Shared helpers for the integration tests.

#![allow(dead_code)]

pub mod fixtures;

use robotide::cmd::{EditorSession, HolderRef};
use robotide::parser::HolderKind;
use robotide::{FileModel, ParseOptions};

/// Parse `text` with format detection and no path
pub fn parse(text: &str) -> FileModel {
    robotide::parse(text, &ParseOptions::new())
}

pub fn session(text: &str) -> EditorSession {
    EditorSession::new(parse(text))
}

pub fn holder(model: &FileModel, kind: HolderKind, index: usize) -> HolderRef {
    HolderRef::of(model.code_table(kind).get(index).unwrap())
}

/// Cell texts of every row of the `index`-th holder of `kind`
pub fn row_texts(model: &FileModel, kind: HolderKind, index: usize) -> Vec<Vec<String>> {
    model
        .code_table(kind)
        .get(index)
        .unwrap()
        .rows()
        .iter()
        .map(|row| row.cell_texts())
        .collect()
}
