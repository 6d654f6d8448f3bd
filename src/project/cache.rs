//! Evaluated variables files, reused while their file is unchanged.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::providers::{VariableValues, VariablesFileEvaluator};

type CacheKey = (PathBuf, Vec<String>);

#[derive(Debug)]
struct CacheEntry {
    modified: Option<SystemTime>,
    variables: Arc<VariableValues>,
}

/// Thread-safe cache of variables file evaluations.
///
/// Entries are keyed by the resolved file and the import arguments. An
/// entry is reused only while the file's last-modified time is the one
/// recorded when it was evaluated. Failed evaluations are not cached.
#[derive(Debug, Default)]
pub struct VariablesFileCache {
    entries: RwLock<FxHashMap<CacheKey, CacheEntry>>,
}

impl VariablesFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached variables of `path` evaluated with `arguments`, evaluating
    /// the file when there is no fresh entry
    pub fn get_or_evaluate(
        &self,
        path: &Path,
        arguments: &[String],
        evaluator: &dyn VariablesFileEvaluator,
    ) -> Result<Arc<VariableValues>, String> {
        let modified = last_modified(path);
        let key = (path.to_path_buf(), arguments.to_vec());

        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(&key) {
                if entry.modified.is_some() && entry.modified == modified {
                    tracing::debug!(path = %path.display(), "variables file cache hit");
                    return Ok(Arc::clone(&entry.variables));
                }
            }
        }

        tracing::debug!(path = %path.display(), "variables file cache miss");
        let variables = Arc::new(evaluator.evaluate(path, arguments)?);
        self.entries.write().insert(
            key,
            CacheEntry {
                modified,
                variables: Arc::clone(&variables),
            },
        );
        Ok(variables)
    }

    /// Drop every entry of `path`, whatever its arguments
    pub fn invalidate(&self, path: &Path) {
        self.entries.write().retain(|(cached, _), _| cached != path);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn last_modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
