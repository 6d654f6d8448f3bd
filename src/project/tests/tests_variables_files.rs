use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use crate::parser::{ErrorCode, Severity};
use crate::project::{ImportResolver, ResolvedImport, ResolverConfig, VariableValues, load_file};

use super::{import_codes, write};

/// Evaluator returning `${name}` for every argument and counting its calls
fn counting_evaluator(
    calls: Arc<AtomicUsize>,
) -> impl Fn(&Path, &[String]) -> Result<VariableValues, String> + Send + Sync {
    move |_path, arguments| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(arguments
            .iter()
            .map(|name| (format!("${{{name}}}"), "value".to_string()))
            .collect())
    }
}

fn project(import: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "vars.py", "HOST = 'localhost'\n");
    let suite = write(
        dir.path(),
        "suite.robot",
        &format!("*** Settings ***\n{import}\n"),
    );
    (dir, suite)
}

#[test]
fn test_variables_file_is_evaluated_once_while_unchanged() {
    let (dir, suite) = project("Variables    vars.py    HOST    PORT");
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = ImportResolver::new(
        ResolverConfig::new().with_evaluator(counting_evaluator(Arc::clone(&calls))),
    );

    let mut model = load_file(&suite).unwrap();
    let resolved = resolver.resolve_imports(&mut model);
    let ResolvedImport::Variables(variables) = &resolved[0] else {
        panic!("expected a variables import");
    };
    assert_eq!(variables.arguments, vec!["HOST", "PORT"]);
    assert_eq!(
        variables.variables.keys().collect::<Vec<_>>(),
        vec!["${HOST}", "${PORT}"]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let mut again = load_file(&suite).unwrap();
    resolver.resolve_imports(&mut again);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.cache().len(), 1);

    // a newer modification time invalidates the entry
    let file = std::fs::File::options()
        .write(true)
        .open(dir.path().join("vars.py"))
        .unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();
    resolver.resolve_imports(&mut again);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_different_arguments_are_cached_separately() {
    let (dir, suite) = project("Variables    vars.py    A");
    write(
        dir.path(),
        "other.robot",
        "*** Settings ***\nVariables    vars.py    B\n",
    );
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = ImportResolver::new(
        ResolverConfig::new().with_evaluator(counting_evaluator(Arc::clone(&calls))),
    );

    resolver.resolve_imports(&mut load_file(&suite).unwrap());
    resolver.resolve_imports(&mut load_file(&dir.path().join("other.robot")).unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(resolver.cache().len(), 2);

    resolver.cache().invalidate(&dir.path().join("vars.py"));
    assert!(resolver.cache().is_empty());
}

#[test]
fn test_empty_variables_file_warns() {
    let (_dir, suite) = project("Variables    vars.py");
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = ImportResolver::new(
        ResolverConfig::new().with_evaluator(counting_evaluator(calls)),
    );

    let mut model = load_file(&suite).unwrap();
    assert_eq!(resolver.resolve_imports(&mut model).len(), 1);
    assert_eq!(import_codes(&model), vec![ErrorCode::E0504]);
    assert_eq!(model.diagnostics()[0].severity, Severity::Warning);
    assert_eq!(
        model.diagnostics()[0].message,
        "Could not find any variable in variable file 'vars.py'"
    );
}

#[test]
fn test_evaluation_failure_is_reported() {
    let (_dir, suite) = project("Variables    vars.py");
    let resolver = ImportResolver::new(ResolverConfig::new().with_evaluator(
        |_: &Path, _: &[String]| -> Result<VariableValues, String> { Err("SyntaxError".to_string()) },
    ));

    let mut model = load_file(&suite).unwrap();
    assert!(resolver.resolve_imports(&mut model).is_empty());
    assert_eq!(import_codes(&model), vec![ErrorCode::E0503]);
    assert_eq!(
        model.diagnostics()[0].message,
        "Problem importing variable file 'vars.py'. SyntaxError"
    );
    assert!(resolver.cache().is_empty());
}

#[test]
fn test_without_evaluator_variables_stay_empty() {
    let (_dir, suite) = project("Variables    vars.py");
    let mut model = load_file(&suite).unwrap();
    let resolved = ImportResolver::default().resolve_imports(&mut model);
    let ResolvedImport::Variables(variables) = &resolved[0] else {
        panic!("expected a variables import");
    };
    assert!(variables.variables.is_empty());
    assert!(model.diagnostics().is_empty());
}
