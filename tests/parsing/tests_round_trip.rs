use robotide::parser::{HolderKind, SettingKind};
use robotide::{FileFormat, FormatHint, ParseOptions, Severity};

use crate::helpers::fixtures::{PIPES, SUITE, TSV};
use crate::helpers::{parse, row_texts};

#[test]
fn test_suite_round_trips() {
    let model = parse(SUITE);
    assert_eq!(model.dump(), SUITE);
    let errors: Vec<_> = model
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_line_endings_round_trip() {
    let crlf = SUITE.replace('\n', "\r\n");
    assert_eq!(parse(&crlf).dump(), crlf);
}

#[test]
fn test_pipe_and_tab_files_round_trip() {
    let pipes = parse(PIPES);
    assert_eq!(pipes.dump(), PIPES);
    assert_eq!(
        row_texts(&pipes, HolderKind::TestCase, 0),
        vec![vec!["Log", "one"], vec!["Log", "two"]]
    );

    let tsv = robotide::parse(TSV, &ParseOptions::new().with_format(FormatHint::Tsv));
    assert_eq!(tsv.format(), FileFormat::Tsv);
    assert_eq!(tsv.dump(), TSV);
}

#[test]
fn test_suite_structure() {
    let model = parse(SUITE);
    let settings = model.setting_table();
    assert_eq!(settings.libraries().count(), 2);
    assert_eq!(settings.imports().count(), 4);

    let remote = settings.by_kind(SettingKind::Library).nth(1).unwrap();
    assert_eq!(remote.alias().unwrap().text(), "Staging");
    assert_eq!(remote.argument_texts(), vec!["Remote", "http://localhost:8270"]);

    assert_eq!(model.variable_table().len(), 3);
    assert_eq!(model.test_cases().len(), 2);
    assert_eq!(model.keywords().len(), 1);
    assert_eq!(model.keywords().get(0).unwrap().name(), "Login As");
}
