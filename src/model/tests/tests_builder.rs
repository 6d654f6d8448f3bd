use rstest::rstest;

use super::build;
use crate::model::{RowKind, TableElement, VariableKind};
use crate::parser::errors::{ErrorCode, Severity};
use crate::parser::kinds::{HolderKind, LocalSettingKind, SectionKind, SettingKind, SettingsGroup};
use crate::parser::token_type::RobotTokenType;

fn codes(model: &crate::model::FileModel) -> Vec<ErrorCode> {
    model.diagnostics().iter().map(|d| d.code).collect()
}

// ============================================================================
// Sections
// ============================================================================

#[test]
fn test_sections_in_file_order() {
    let model = build(
        "intro\n*** Settings ***\n*** Variables ***\n*** Test Cases ***\n*** Tasks ***\n*** Keywords ***\n*** Comments ***\n",
    );
    let kinds: Vec<_> = model.sections().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Preamble,
            SectionKind::Settings,
            SectionKind::Variables,
            SectionKind::TestCases,
            SectionKind::Tasks,
            SectionKind::Keywords,
            SectionKind::Comments,
        ]
    );
    assert!(model.diagnostics().is_empty());
}

#[rstest]
#[case("*** Setting ***", SectionKind::Settings)]
#[case("***Variables***", SectionKind::Variables)]
#[case("*** test case ***", SectionKind::TestCases)]
#[case("*** KEYWORDS ***", SectionKind::Keywords)]
#[case("* Task", SectionKind::Tasks)]
fn test_header_spellings(#[case] header: &str, #[case] kind: SectionKind) {
    let model = build(&format!("{header}\n"));
    assert_eq!(model.sections()[0].kind, kind);
}

#[test]
fn test_misspelled_header_suggests_fix() {
    let model = build("*** Test Csaes ***\nT\n    Log    x\n");
    assert_eq!(model.sections()[0].kind, SectionKind::Unknown);
    let message = &model.diagnostics()[0];
    assert_eq!(message.code, ErrorCode::E0101);
    assert_eq!(message.fixes, vec!["*** Test Cases ***".to_string()]);
    assert!(model.test_cases().is_empty());
}

#[test]
fn test_deprecated_header_is_info() {
    let model = build("*** User Keywords ***\nKw\n    No Operation\n");
    assert_eq!(model.keywords().len(), 1);
    assert_eq!(model.diagnostics()[0].code, ErrorCode::E0103);
    assert_eq!(model.diagnostics()[0].severity, Severity::Info);
}

#[test]
fn test_header_token_types() {
    let model = build("*** Test Cases ***    Action    Argument\n");
    let header = model.sections()[0].header.as_ref().unwrap();
    let types: Vec<_> = header.tokens().map(|t| t.primary_type()).collect();
    assert_eq!(
        types,
        vec![
            RobotTokenType::TableHeader(SectionKind::TestCases),
            RobotTokenType::TableHeaderColumn,
            RobotTokenType::TableHeaderColumn,
        ]
    );
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_settings_kinds_and_groups() {
    let model = build(
        "*** Settings ***\nLibrary    Collections\nResource    common.resource\nVariables    vars.py    arg\nMetadata    Version    1.0\nSuite Setup    Open    url\nForce Tags    smoke\n",
    );
    let table = model.setting_table();
    let kinds: Vec<_> = table.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SettingKind::Library,
            SettingKind::Resource,
            SettingKind::Variables,
            SettingKind::Metadata,
            SettingKind::SuiteSetup,
            SettingKind::ForceTags,
        ]
    );
    assert_eq!(table.imports().count(), 3);
    assert_eq!(table.get(3).unwrap().group(), SettingsGroup::Metadata);
    assert_eq!(table.get(2).unwrap().argument_texts(), vec!["vars.py", "arg"]);
}

#[test]
fn test_setting_column_types() {
    let model = build("*** Settings ***\nTest Timeout    1 min    message    extra\n");
    let setting = model.setting_table().get(0).unwrap();
    let types: Vec<_> = setting.cells().iter().map(|t| t.primary_type()).collect();
    assert_eq!(
        types,
        vec![
            RobotTokenType::SettingDeclaration(SettingKind::TestTimeout),
            RobotTokenType::TimeoutValue,
            RobotTokenType::TimeoutMessage,
            RobotTokenType::UnwantedArgument,
        ]
    );
}

#[test]
fn test_unknown_and_deprecated_settings() {
    let model = build("*** Settings ***\nLibary    X\nSuite Precondition    Setup\n");
    assert_eq!(codes(&model), vec![ErrorCode::E0301, ErrorCode::E0302]);
    assert_eq!(model.setting_table().get(0).unwrap().kind(), SettingKind::Unknown);
    assert_eq!(model.setting_table().get(1).unwrap().kind(), SettingKind::SuiteSetup);
    assert_eq!(model.diagnostics()[1].fixes, vec!["Suite Setup".to_string()]);
}

#[test]
fn test_import_without_path() {
    let model = build("*** Settings ***\nResource\n");
    assert_eq!(codes(&model), vec![ErrorCode::E0303]);
}

#[test]
fn test_setting_continuation_across_blank_lines() {
    let model = build("*** Settings ***\nForce Tags    a\n\n...    b\nLibrary    X\n");
    let table = model.setting_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0).unwrap().argument_texts(), vec!["a", "b"]);
    assert_eq!(table.get(0).unwrap().physical_lines().len(), 3);
}

#[test]
fn test_comment_stops_setting_continuation() {
    let model = build("*** Settings ***\nForce Tags    a\n# note\n...    b\n");
    let table = model.setting_table();
    assert_eq!(table.len(), 2);
    assert!(table.get(1).unwrap().is_orphan_continuation());
}

// ============================================================================
// Variables
// ============================================================================

#[rstest]
#[case("${scalar}    1", VariableKind::Scalar)]
#[case("@{list}    a    b", VariableKind::List)]
#[case("&{dict}    k=v", VariableKind::Dictionary)]
#[case("${with equals}=    x", VariableKind::Scalar)]
#[case("${with space} =    x", VariableKind::Scalar)]
#[case("notavar    x", VariableKind::Invalid)]
fn test_variable_kinds(#[case] line: &str, #[case] kind: VariableKind) {
    let model = build(&format!("*** Variables ***\n{line}\n"));
    assert_eq!(model.variable_table().get(0).unwrap().kind(), kind);
}

#[test]
fn test_invalid_variables_reported() {
    let model = build("*** Variables ***\nbad    1\n%{ENV}    2\n");
    assert_eq!(codes(&model), vec![ErrorCode::E0401, ErrorCode::E0403]);
}

#[test]
fn test_variable_values_continue() {
    let model = build("*** Variables ***\n@{L}    a    b\n...    c    # tail\n");
    let variable = model.variable_table().get(0).unwrap();
    assert_eq!(variable.value_texts(), vec!["a", "b", "c"]);
    assert_eq!(variable.comment(), vec!["# tail"]);
    assert_eq!(variable.bare_name(), Some("L"));
}

// ============================================================================
// Code tables
// ============================================================================

#[test]
fn test_holders_and_rows() {
    let model = build(
        "*** Test Cases ***\nFirst\n    [Documentation]    doc\n    Log    one\n\nSecond    Log    inline\n    ${x}=    Get    y\n",
    );
    let table = model.test_cases();
    assert_eq!(table.len(), 2);
    let first = table.get(0).unwrap();
    assert_eq!(first.name(), "First");
    assert_eq!(first.rows()[0].kind(), RowKind::Setting(LocalSettingKind::Documentation));
    assert_eq!(first.rows()[1].cell_texts(), vec!["Log", "one"]);
    assert_eq!(first.pending_lines().len(), 1);

    let second = table.get(1).unwrap();
    assert_eq!(second.name(), "Second");
    assert_eq!(second.rows()[0].cell_texts(), vec!["Log", "inline"]);
    let types: Vec<_> = second.rows()[1].cells().iter().map(|t| t.primary_type()).collect();
    assert_eq!(
        types,
        vec![
            RobotTokenType::Assignment,
            RobotTokenType::Action,
            RobotTokenType::ActionArgument,
        ]
    );
}

#[test]
fn test_repeated_sections_share_table() {
    let model = build("*** Keywords ***\nA\n    No Operation\n*** Keywords ***\nB\n    No Operation\n");
    assert_eq!(model.keywords().len(), 2);
    let sections: Vec<_> = model.keywords().iter().map(|h| h.section()).collect();
    assert_ne!(sections[0], sections[1]);
}

#[test]
fn test_row_continuation_merges_across_blank_line() {
    let model = build("*** Test Cases ***\nT\n    Log Many    a\n\n    ...    b\n");
    let holder = model.test_cases().get(0).unwrap();
    assert_eq!(holder.rows().len(), 1);
    assert_eq!(holder.rows()[0].cell_texts(), vec!["Log Many", "a", "b"]);
    assert!(holder.pending_lines().is_empty());
}

#[test]
fn test_continuation_after_comment_row_is_orphan() {
    let model = build("*** Test Cases ***\nT\n    Log    a\n    # note\n    ...    b\n");
    let holder = model.test_cases().get(0).unwrap();
    assert_eq!(holder.rows().len(), 3);
    assert!(holder.rows()[1].is_comment_only());
    assert!(holder.rows()[2].is_orphan_continuation());
}

#[test]
fn test_step_outside_holder() {
    let model = build("*** Test Cases ***\n    Log    x\n");
    assert!(model.test_cases().is_empty());
    assert_eq!(codes(&model), vec![ErrorCode::E0201]);
}

#[test]
fn test_inapplicable_setting_left_executable() {
    let model = build("*** Keywords ***\nKw\n    [Setup]    Foo\n    [Arguments]    ${a}\n");
    let holder = model.keywords().get(0).unwrap();
    assert_eq!(holder.kind(), HolderKind::Keyword);
    assert_eq!(holder.rows()[0].kind(), RowKind::Executable);
    assert_eq!(holder.rows()[1].kind(), RowKind::Setting(LocalSettingKind::Arguments));
}

#[test]
fn test_pipe_rows() {
    let model = build("| *** Test Cases *** |\n| T | Log | x |\n| | Log | y |\n");
    let holder = model.test_cases().get(0).unwrap();
    assert_eq!(holder.name(), "T");
    assert_eq!(holder.rows().len(), 2);
    assert_eq!(holder.rows()[1].cell_texts(), vec!["Log", "y"]);
}

#[test]
fn test_for_loop_rows_typed() {
    let model = build("*** Test Cases ***\nT\n    FOR    ${i}    IN RANGE    3\n        Log    ${i}\n    END\n");
    let holder = model.test_cases().get(0).unwrap();
    let types: Vec<_> = holder.rows()[0].cells().iter().map(|t| t.primary_type()).collect();
    assert_eq!(
        types,
        vec![
            RobotTokenType::ForMarker,
            RobotTokenType::Assignment,
            RobotTokenType::ForInMarker,
            RobotTokenType::ActionArgument,
        ]
    );
}
