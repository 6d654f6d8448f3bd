//! Resolution of `Library`, `Resource` and `Variables` imports.
//!
//! Resource and variables imports resolve to a file: first relative to the
//! directory of the importing file, then against each configured search
//! path. `${name}` parts of the declared path are substituted from the
//! variable mappings beforehand. Library imports resolve to a
//! [`LibrarySpecification`] supplied by the host.
//!
//! Nothing here fails hard: an import that cannot be resolved becomes a
//! build message on the import's region and is left out of the result.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::base::{ElementId, FileRegion};
use crate::core::text_utils::unescape_spaces;
use crate::libraries::{LibrarySpecification, find_specification};
use crate::model::{FileModel, Setting};
use crate::parser::kinds::SettingKind;
use crate::parser::{BuildMessage, ErrorCode};

use super::cache::VariablesFileCache;
use super::providers::{
    LibrarySpecificationProvider, PathsProvider, VariableMappings, VariableMappingsProvider,
    VariableValues, VariablesFileEvaluator,
};

/// Whitespace before a path separator; ambiguous under Robot's escaping
static ILLEGAL_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[\\/]").unwrap());
static PARAMETER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^{}]+)\}").unwrap());

/// Whether `path` may be resolved at all
pub fn is_correct_path(path: &str) -> bool {
    !path.trim().is_empty() && !ILLEGAL_PATH.is_match(&unescape_spaces(path))
}

/// Library imports given as a file rather than a module name
fn is_path_like(name: &str) -> bool {
    name.ends_with(".py") || name.contains('/') || name.contains('\\')
}

// ============================================================================
// Configuration
// ============================================================================

/// Collaborators used by an [`ImportResolver`]
#[derive(Clone)]
pub struct ResolverConfig {
    paths: Arc<dyn PathsProvider>,
    mappings: Arc<dyn VariableMappingsProvider>,
    libraries: Arc<dyn LibrarySpecificationProvider>,
    evaluator: Option<Arc<dyn VariablesFileEvaluator>>,
}

impl ResolverConfig {
    /// No search paths, mappings or libraries, and no variables evaluation
    pub fn new() -> Self {
        Self {
            paths: Arc::new(Vec::<PathBuf>::new()),
            mappings: Arc::new(VariableMappings::new()),
            libraries: Arc::new(Vec::<LibrarySpecification>::new()),
            evaluator: None,
        }
    }

    pub fn with_paths(mut self, paths: impl PathsProvider + 'static) -> Self {
        self.paths = Arc::new(paths);
        self
    }

    pub fn with_mappings(mut self, mappings: impl VariableMappingsProvider + 'static) -> Self {
        self.mappings = Arc::new(mappings);
        self
    }

    pub fn with_libraries(mut self, libraries: impl LibrarySpecificationProvider + 'static) -> Self {
        self.libraries = Arc::new(libraries);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl VariablesFileEvaluator + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("search_paths", &self.paths.search_paths())
            .field("libraries", &self.libraries.specifications().len())
            .field("evaluator", &self.evaluator.is_some())
            .finish()
    }
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedLibrary {
    pub setting: ElementId,
    pub specification: LibrarySpecification,
    /// Name given with `WITH NAME` / `AS`
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedResource {
    pub setting: ElementId,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedVariables {
    pub setting: ElementId,
    pub path: PathBuf,
    /// Import arguments after substitution
    pub arguments: Vec<String>,
    /// Empty when no evaluator is configured
    pub variables: Arc<VariableValues>,
}

/// One successfully resolved import
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedImport {
    Library(ImportedLibrary),
    Resource(ImportedResource),
    Variables(ImportedVariables),
}

impl ResolvedImport {
    /// The import setting this was resolved from
    pub fn setting(&self) -> ElementId {
        match self {
            Self::Library(library) => library.setting,
            Self::Resource(resource) => resource.setting,
            Self::Variables(variables) => variables.setting,
        }
    }

    /// Resolved file, if the import refers to one
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Library(_) => None,
            Self::Resource(resource) => Some(&resource.path),
            Self::Variables(variables) => Some(&variables.path),
        }
    }
}

/// What an import setting asks for
#[derive(Debug, Clone)]
struct ImportRequest {
    setting: ElementId,
    kind: SettingKind,
    path: String,
    arguments: Vec<String>,
    alias: Option<String>,
    region: FileRegion,
}

impl ImportRequest {
    fn of(setting: &Setting) -> Option<Self> {
        let path = setting.import_path()?;
        let arguments = setting.arguments();
        let region = arguments
            .last()
            .map_or(path.region(), |last| path.region().merge(&last.region()));
        Some(Self {
            setting: setting.id(),
            kind: setting.kind(),
            path: path.text().to_string(),
            arguments: arguments
                .iter()
                .skip(1)
                .map(|t| t.text().to_string())
                .collect(),
            alias: setting.alias().map(|t| t.text().to_string()),
            region,
        })
    }

    fn message(&self, code: ErrorCode, text: String) -> BuildMessage {
        BuildMessage::new(code, text).with_region(self.region)
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves imports of file models against injected collaborators.
///
/// Shared between threads parsing different files; only the variables
/// file cache is mutable and it locks internally.
#[derive(Debug, Default)]
pub struct ImportResolver {
    config: ResolverConfig,
    cache: VariablesFileCache,
}

impl ImportResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            cache: VariablesFileCache::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &VariablesFileCache {
        &self.cache
    }

    /// Replace every `${name}` that has a mapping; others stay as written
    pub fn substitute(&self, text: &str) -> String {
        if !text.contains("${") {
            return text.to_string();
        }
        PARAMETER
            .replace_all(text, |caps: &Captures<'_>| {
                self.config
                    .mappings
                    .value_of(&caps[1])
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Existing file `declared` refers to when imported from `importing_file`
    pub fn find_file(&self, declared: &str, importing_file: Option<&Path>) -> Option<PathBuf> {
        let text = unescape_spaces(&self.substitute(declared));
        let candidate = PathBuf::from(text.trim());
        if candidate.is_absolute() {
            return candidate.is_file().then_some(candidate);
        }
        importing_file
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .into_iter()
            .chain(self.config.paths.search_paths())
            .map(|dir| dir.join(&candidate))
            .find(|path| path.is_file())
    }

    /// Resolve every import of `model`, attaching a build message to each
    /// import that cannot be resolved
    pub fn resolve_imports(&self, model: &mut FileModel) -> Vec<ResolvedImport> {
        let requests: Vec<ImportRequest> = model
            .setting_table()
            .imports()
            .filter_map(ImportRequest::of)
            .collect();
        let importing = model.path().map(Path::to_path_buf);

        let mut messages = Vec::new();
        let resolved: Vec<ResolvedImport> = requests
            .iter()
            .filter_map(|request| self.resolve(request, importing.as_deref(), &mut messages))
            .collect();
        for message in messages {
            model.add_diagnostic_once(message);
        }
        tracing::debug!(
            path = ?importing,
            imports = requests.len(),
            resolved = resolved.len(),
            "resolved imports"
        );
        resolved
    }

    fn resolve(
        &self,
        request: &ImportRequest,
        importing: Option<&Path>,
        messages: &mut Vec<BuildMessage>,
    ) -> Option<ResolvedImport> {
        let outcome = match request.kind {
            SettingKind::Library => self.resolve_library(request),
            SettingKind::Resource => self.resolve_resource(request, importing),
            SettingKind::Variables => self.resolve_variables(request, importing, messages),
            _ => return None,
        };
        match outcome {
            Ok(import) => Some(import),
            Err(message) => {
                tracing::debug!(import = %request.path, code = %message.code, "import not resolved");
                messages.push(message);
                None
            }
        }
    }

    fn resolve_library(&self, request: &ImportRequest) -> Result<ResolvedImport, BuildMessage> {
        let declared = self.substitute(&request.path);
        let name = if is_path_like(&declared) {
            if !is_correct_path(&declared) {
                return Err(illegal_path(request));
            }
            let stem = Path::new(declared.trim_end_matches(['/', '\\']))
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(declared.as_str());
            stem.to_string()
        } else {
            declared
        };
        let arguments: Vec<String> = request.arguments.iter().map(|a| self.substitute(a)).collect();
        let specifications = self.config.libraries.specifications();
        let Some(specification) = find_specification(specifications, &name, &arguments) else {
            return Err(request.message(
                ErrorCode::E0505,
                format!("Library '{}' could not be found", request.path),
            ));
        };
        Ok(ResolvedImport::Library(ImportedLibrary {
            setting: request.setting,
            specification: specification.clone(),
            alias: request.alias.clone(),
        }))
    }

    fn locate(&self, request: &ImportRequest, importing: Option<&Path>) -> Result<PathBuf, BuildMessage> {
        if !is_correct_path(&request.path) {
            return Err(illegal_path(request));
        }
        self.find_file(&request.path, importing).ok_or_else(|| {
            let what = match request.kind {
                SettingKind::Variables => "Variables",
                _ => "Resource",
            };
            request.message(
                ErrorCode::E0502,
                format!("{what} file '{}' could not be found", request.path),
            )
        })
    }

    fn resolve_resource(
        &self,
        request: &ImportRequest,
        importing: Option<&Path>,
    ) -> Result<ResolvedImport, BuildMessage> {
        let path = self.locate(request, importing)?;
        Ok(ResolvedImport::Resource(ImportedResource {
            setting: request.setting,
            path,
        }))
    }

    fn resolve_variables(
        &self,
        request: &ImportRequest,
        importing: Option<&Path>,
        messages: &mut Vec<BuildMessage>,
    ) -> Result<ResolvedImport, BuildMessage> {
        let path = self.locate(request, importing)?;
        let arguments: Vec<String> = request.arguments.iter().map(|a| self.substitute(a)).collect();
        let variables = match &self.config.evaluator {
            Some(evaluator) => {
                let variables = self
                    .cache
                    .get_or_evaluate(&path, &arguments, evaluator.as_ref())
                    .map_err(|error| {
                        request.message(
                            ErrorCode::E0503,
                            format!("Problem importing variable file '{}'. {error}", request.path),
                        )
                    })?;
                if variables.is_empty() {
                    messages.push(request.message(
                        ErrorCode::E0504,
                        format!("Could not find any variable in variable file '{}'", request.path),
                    ));
                }
                variables
            }
            None => Arc::new(VariableValues::new()),
        };
        Ok(ResolvedImport::Variables(ImportedVariables {
            setting: request.setting,
            path,
            arguments,
            variables,
        }))
    }
}

fn illegal_path(request: &ImportRequest) -> BuildMessage {
    request.message(
        ErrorCode::E0501,
        format!(
            "Path '{}' is invalid: whitespace before a path separator must be escaped",
            request.path
        ),
    )
}
