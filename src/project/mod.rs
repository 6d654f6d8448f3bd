//! Files in a project: import resolution, loading and parallel parsing.
//!
//! - [`ImportResolver`] - Resolves imports with the collaborators in a
//!   [`ResolverConfig`]
//! - [`VariablesFileCache`] - Variables file evaluations by file and arguments
//! - [`file_loader`] - Robot files from disk, parsed in parallel

mod cache;
pub mod file_loader;
pub mod providers;
pub mod resolver;

pub use cache::VariablesFileCache;
pub use file_loader::{collect_robot_files, is_robot_file, load_file, parse_files};
pub use providers::{
    LibrarySpecificationProvider, PathsProvider, VariableMappings, VariableMappingsProvider,
    VariableValues, VariablesFileEvaluator,
};
pub use resolver::{
    ImportResolver, ImportedLibrary, ImportedResource, ImportedVariables, ResolvedImport,
    ResolverConfig, is_correct_path,
};

#[cfg(test)]
mod tests;
