//! Loading robot files from disk.

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::base::constants::ROBOT_FILE_EXTENSIONS;
use crate::core::LoadError;
use crate::model::{FileModel, ParseOptions};

use super::resolver::ImportResolver;

/// Whether the extension of `path` is one robot data is read from
pub fn is_robot_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ROBOT_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// All robot files below `dir`, sorted by path.
///
/// Entries that cannot be read while walking are skipped.
pub fn collect_robot_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::io(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "directory not found"),
        ));
    }
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_robot_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read and parse one file; the format is hinted by its extension
pub fn load_file(path: &Path) -> Result<FileModel, LoadError> {
    if !is_robot_file(path) {
        return Err(LoadError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    Ok(crate::parse(&text, &ParseOptions::for_path(path)))
}

/// Parse `paths` in parallel and resolve their imports.
///
/// Returns one result per path, in the order of `paths`. Import problems
/// are build messages on the models, never load errors.
pub fn parse_files(paths: &[PathBuf], resolver: &ImportResolver) -> Vec<Result<FileModel, LoadError>> {
    paths
        .par_iter()
        .map(|path| -> Result<FileModel, LoadError> {
            let mut model = load_file(path)?;
            resolver.resolve_imports(&mut model);
            Ok(model)
        })
        .collect()
}
