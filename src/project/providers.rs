//! Collaborators injected into import resolution.
//!
//! The crate reads no project configuration. Hosts hand in search paths,
//! variable mappings, library specifications and a way to evaluate
//! variables files through these traits.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::core::text_utils::normalize_name;
use crate::libraries::LibrarySpecification;

/// Variables read from a variables file, by declaration (`${name}`)
pub type VariableValues = IndexMap<String, String>;

pub trait PathsProvider: Send + Sync {
    /// Directories searched after the directory of the importing file
    fn search_paths(&self) -> Vec<PathBuf>;
}

impl PathsProvider for Vec<PathBuf> {
    fn search_paths(&self) -> Vec<PathBuf> {
        self.clone()
    }
}

pub trait VariableMappingsProvider: Send + Sync {
    /// Value substituted for the variable named `name` (without `${}`)
    fn value_of(&self, name: &str) -> Option<String>;
}

/// Mappings keyed by bare variable name, matched ignoring case, spaces and
/// underscores
#[derive(Debug, Clone, Default)]
pub struct VariableMappings {
    values: IndexMap<String, String>,
}

impl VariableMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// `name` may be given bare or as `${name}`
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let bare = name
            .strip_prefix("${")
            .and_then(|n| n.strip_suffix('}'))
            .unwrap_or(name);
        self.values.insert(normalize_name(bare), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableMappingsProvider for VariableMappings {
    fn value_of(&self, name: &str) -> Option<String> {
        self.values.get(&normalize_name(name)).cloned()
    }
}

pub trait LibrarySpecificationProvider: Send + Sync {
    /// Every known specification; several may share a name
    fn specifications(&self) -> &[LibrarySpecification];
}

impl LibrarySpecificationProvider for Vec<LibrarySpecification> {
    fn specifications(&self) -> &[LibrarySpecification] {
        self
    }
}

/// Runs a variables file with arguments and reports what it defines
pub trait VariablesFileEvaluator: Send + Sync {
    fn evaluate(&self, path: &Path, arguments: &[String]) -> Result<VariableValues, String>;
}

impl<F> VariablesFileEvaluator for F
where
    F: Fn(&Path, &[String]) -> Result<VariableValues, String> + Send + Sync,
{
    fn evaluate(&self, path: &Path, arguments: &[String]) -> Result<VariableValues, String> {
        self(path, arguments)
    }
}
