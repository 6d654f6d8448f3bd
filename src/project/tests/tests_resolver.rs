use rstest::rstest;
use tempfile::TempDir;

use crate::libraries::{ArgumentsDescriptor, LibrarySpecification};
use crate::parser::ErrorCode;
use crate::project::{
    ImportResolver, ResolvedImport, ResolverConfig, VariableMappings, is_correct_path, load_file,
};

use super::{import_codes, write};

#[rstest]
#[case::plain("common.resource", true)]
#[case::nested("dir/common.resource", true)]
#[case::escaped_space("my\\ dir/common.resource", true)]
#[case::space_before_slash("my dir /common.resource", false)]
#[case::escaped_space_before_slash("dir\\ /common.resource", false)]
#[case::space_before_backslash("dir \\common.resource", false)]
#[case::empty("", false)]
#[case::blank("   ", false)]
fn test_is_correct_path(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_correct_path(path), expected);
}

#[test]
fn test_substitute_uses_mappings() {
    let resolver = ImportResolver::new(
        ResolverConfig::new().with_mappings(VariableMappings::new().with("${Res Dir}", "/data")),
    );
    assert_eq!(resolver.substitute("${res_dir}/a.resource"), "/data/a.resource");
    assert_eq!(resolver.substitute("${OTHER}/a.resource"), "${OTHER}/a.resource");
    assert_eq!(resolver.substitute("plain"), "plain");
}

#[test]
fn test_resource_next_to_importing_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "common.resource", "*** Keywords ***\nKw\n    No Operation\n");
    let suite = write(
        dir.path(),
        "suite.robot",
        "*** Settings ***\nResource    common.resource\n",
    );

    let mut model = load_file(&suite).unwrap();
    let resolved = ImportResolver::default().resolve_imports(&mut model);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].path(), Some(dir.path().join("common.resource").as_path()));
    assert!(import_codes(&model).is_empty());
}

#[test]
fn test_resource_from_search_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/shared.resource", "*** Keywords ***\n");
    let suite = write(
        dir.path(),
        "tests/suite.robot",
        "*** Settings ***\nResource    shared.resource\n",
    );
    let resolver =
        ImportResolver::new(ResolverConfig::new().with_paths(vec![dir.path().join("lib")]));

    let mut model = load_file(&suite).unwrap();
    let resolved = resolver.resolve_imports(&mut model);
    assert_eq!(
        resolved[0].path(),
        Some(dir.path().join("lib").join("shared.resource").as_path())
    );
}

#[test]
fn test_parameterized_resource_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "res/common.resource", "*** Keywords ***\n");
    let suite = write(
        dir.path(),
        "suite.robot",
        "*** Settings ***\nResource    ${RESOURCES}/common.resource\n",
    );
    let resources = dir.path().join("res");
    let resolver = ImportResolver::new(
        ResolverConfig::new()
            .with_mappings(VariableMappings::new().with("RESOURCES", resources.to_str().unwrap())),
    );

    let mut model = load_file(&suite).unwrap();
    let resolved = resolver.resolve_imports(&mut model);
    assert_eq!(resolved[0].path(), Some(resources.join("common.resource").as_path()));
}

#[test]
fn test_unresolved_and_illegal_paths_are_reported() {
    let dir = TempDir::new().unwrap();
    let suite = write(
        dir.path(),
        "suite.robot",
        "*** Settings ***\nResource    missing.resource\nResource    my dir /x.resource\n",
    );

    let mut model = load_file(&suite).unwrap();
    let resolver = ImportResolver::default();
    assert!(resolver.resolve_imports(&mut model).is_empty());
    assert_eq!(import_codes(&model), vec![ErrorCode::E0502, ErrorCode::E0501]);

    let missing = model
        .diagnostics()
        .iter()
        .find(|d| d.code == ErrorCode::E0502)
        .unwrap();
    assert_eq!(missing.message, "Resource file 'missing.resource' could not be found");
    let region = missing.region.unwrap();
    assert_eq!((region.start.line, region.start.column), (1, 12));
    assert_eq!(missing.file.as_deref(), Some(suite.as_path()));

    // resolving again reports nothing new
    resolver.resolve_imports(&mut model);
    assert_eq!(import_codes(&model).len(), 2);
}

fn libraries() -> Vec<LibrarySpecification> {
    vec![
        LibrarySpecification::new("Collections"),
        LibrarySpecification::new("Dyn")
            .dynamic(ArgumentsDescriptor::parse(&["a"]))
            .with_constructor_value("a", "1"),
        LibrarySpecification::new("Dyn")
            .dynamic(ArgumentsDescriptor::parse(&["b"]))
            .with_constructor_value("b", "2"),
        LibrarySpecification::new("Custom"),
    ]
}

fn resolve_library(line: &str) -> (Vec<ResolvedImport>, Vec<ErrorCode>) {
    let mut model = crate::parse(
        &format!("*** Settings ***\n{line}\n"),
        &crate::ParseOptions::new(),
    );
    let resolver = ImportResolver::new(ResolverConfig::new().with_libraries(libraries()));
    let resolved = resolver.resolve_imports(&mut model);
    (resolved, import_codes(&model))
}

#[test]
fn test_static_library_with_alias() {
    let (resolved, codes) = resolve_library("Library    Collections    WITH NAME    Coll");
    assert!(codes.is_empty());
    let ResolvedImport::Library(library) = &resolved[0] else {
        panic!("expected a library");
    };
    assert_eq!(library.specification.name, "Collections");
    assert_eq!(library.alias.as_deref(), Some("Coll"));
}

#[rstest]
#[case::first_constructor("Library    Dyn    1", Some("a"))]
#[case::by_name("Library    Dyn    b=2", Some("b"))]
#[case::no_constructor_matches("Library    Dyn    3", None)]
#[case::missing_arguments("Library    Dyn", None)]
fn test_dynamic_library_matching(#[case] line: &str, #[case] formal: Option<&str>) {
    let (resolved, codes) = resolve_library(line);
    match formal {
        Some(formal) => {
            let ResolvedImport::Library(library) = &resolved[0] else {
                panic!("expected a library");
            };
            assert!(library.specification.constructor_values.contains_key(formal));
            assert!(codes.is_empty());
        }
        None => {
            assert!(resolved.is_empty());
            assert_eq!(codes, vec![ErrorCode::E0505]);
        }
    }
}

#[test]
fn test_library_by_path_uses_file_stem() {
    let (resolved, codes) = resolve_library("Library    libs/Custom.py");
    assert!(codes.is_empty());
    let ResolvedImport::Library(library) = &resolved[0] else {
        panic!("expected a library");
    };
    assert_eq!(library.specification.name, "Custom");

    let (resolved, codes) = resolve_library("Library    Unknown");
    assert!(resolved.is_empty());
    assert_eq!(codes, vec![ErrorCode::E0505]);
}
