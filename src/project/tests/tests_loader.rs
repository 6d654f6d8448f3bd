use rstest::rstest;
use tempfile::TempDir;

use crate::core::LoadError;
use crate::parser::FileFormat;
use crate::project::{ImportResolver, collect_robot_files, is_robot_file, load_file, parse_files};

use super::{import_codes, write};

#[rstest]
#[case("suite.robot", true)]
#[case("common.resource", true)]
#[case("old.txt", true)]
#[case("data.TSV", true)]
#[case("vars.py", false)]
#[case("README", false)]
fn test_is_robot_file(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_robot_file(std::path::Path::new(name)), expected);
}

#[test]
fn test_collect_robot_files_walks_subdirectories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.robot", "");
    write(dir.path(), "a/nested.resource", "");
    write(dir.path(), "a/deeper/data.tsv", "");
    write(dir.path(), "a/vars.py", "");

    let files = collect_robot_files(dir.path()).unwrap();
    let relative: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            std::path::PathBuf::from("a/deeper/data.tsv"),
            std::path::PathBuf::from("a/nested.resource"),
            std::path::PathBuf::from("b.robot"),
        ]
    );
}

#[test]
fn test_collect_from_missing_directory() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        collect_robot_files(&dir.path().join("missing")),
        Err(LoadError::Io { .. })
    ));
}

#[test]
fn test_load_file_uses_extension_hint() {
    let dir = TempDir::new().unwrap();
    let text = "*** Test Cases ***\nCase\tLog\tx\n";
    let tsv = write(dir.path(), "data.tsv", text);

    let model = load_file(&tsv).unwrap();
    assert_eq!(model.format(), FileFormat::Tsv);
    assert_eq!(model.path(), Some(tsv.as_path()));
    assert_eq!(model.dump(), text);

    let script = write(dir.path(), "vars.py", "X = 1\n");
    assert!(matches!(
        load_file(&script),
        Err(LoadError::UnsupportedExtension { .. })
    ));
}

#[test]
fn test_parse_files_keeps_input_order() {
    let dir = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for index in 0..8 {
        paths.push(write(
            dir.path(),
            &format!("suite_{index}.robot"),
            &format!("*** Test Cases ***\nCase {index}\n    Log    {index}\n"),
        ));
    }
    paths.push(dir.path().join("missing.robot"));
    paths.push(write(
        dir.path(),
        "imports.robot",
        "*** Settings ***\nResource    nowhere.resource\n",
    ));

    let results = parse_files(&paths, &ImportResolver::default());
    assert_eq!(results.len(), paths.len());
    for (index, result) in results.iter().take(8).enumerate() {
        let model = result.as_ref().unwrap();
        assert_eq!(model.test_cases().get(0).unwrap().name(), format!("Case {index}"));
    }
    assert!(matches!(results[8], Err(LoadError::Io { .. })));
    let imports = results[9].as_ref().unwrap();
    assert_eq!(import_codes(imports).len(), 1);
}
