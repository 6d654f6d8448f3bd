use std::path::Path;

use tempfile::TempDir;

use robotide::libraries::LibrarySpecification;
use robotide::project::{
    ImportResolver, ResolvedImport, ResolverConfig, VariableMappings, VariableValues,
    collect_robot_files, parse_files,
};

use crate::helpers::fixtures::SUITE;

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

#[test]
fn test_project_imports_resolve() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "suite.robot", SUITE);
    write(dir.path(), "res/common.resource", "*** Keywords ***\nLogout\n    No Operation\n");
    write(dir.path(), "vars.py", "HOST = 'staging'\n");

    let resources = dir.path().join("res");
    let config = ResolverConfig::new()
        .with_mappings(VariableMappings::new().with("RESOURCES", resources.display().to_string()))
        .with_libraries(vec![
            LibrarySpecification::new("Collections"),
            LibrarySpecification::new("Remote"),
        ])
        .with_evaluator(|_: &Path, arguments: &[String]| -> Result<VariableValues, String> {
            Ok(VariableValues::from([(
                "${HOST}".to_string(),
                arguments.join(" "),
            )]))
        });
    let resolver = ImportResolver::new(config);

    let files = collect_robot_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);
    let models = parse_files(&files, &resolver);
    let suite = models[1].as_ref().unwrap();
    assert_eq!(suite.dump(), SUITE);
    assert!(
        suite.diagnostics().iter().all(|d| !d.code.as_str().starts_with("E05")),
        "{:?}",
        suite.diagnostics()
    );

    // parse_files does not hand back the resolved imports; resolve again
    let mut suite = models.into_iter().nth(1).unwrap().unwrap();
    let resolved = resolver.resolve_imports(&mut suite);
    assert_eq!(resolved.len(), 4);
    let ResolvedImport::Library(remote) = &resolved[1] else {
        panic!("expected a library");
    };
    assert_eq!(remote.alias.as_deref(), Some("Staging"));
    let ResolvedImport::Resource(resource) = &resolved[2] else {
        panic!("expected a resource");
    };
    assert_eq!(resource.path, resources.join("common.resource"));
    let ResolvedImport::Variables(variables) = &resolved[3] else {
        panic!("expected a variables file");
    };
    assert_eq!(variables.variables["${HOST}"], "staging");
    assert_eq!(resolver.cache().len(), 1);
}
