#![allow(clippy::unwrap_used)]

mod tests_loader;
mod tests_resolver;
mod tests_variables_files;

use std::path::{Path, PathBuf};

use crate::parser::ErrorCode;
use crate::model::FileModel;

/// Write `text` to `dir/name`, creating parent directories
pub(super) fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, text).unwrap();
    path
}

pub(super) fn import_codes(model: &FileModel) -> Vec<ErrorCode> {
    model
        .diagnostics()
        .iter()
        .map(|d| d.code)
        .filter(|code| code.as_str().starts_with("E05"))
        .collect()
}
