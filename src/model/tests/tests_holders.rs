use rstest::rstest;

use super::build;
use crate::model::{LoopProblem, RowKind, TableElement, classify_row};
use crate::parser::kinds::{HolderKind, LocalSettingKind};
use crate::parser::token::EolKind;
use crate::parser::token_type::RobotTokenType;

#[rstest]
#[case(Some("[Setup]"), HolderKind::TestCase, RowKind::Setting(LocalSettingKind::Setup))]
#[case(Some("[ tags ]"), HolderKind::Task, RowKind::Setting(LocalSettingKind::Tags))]
#[case(Some("[Setup]"), HolderKind::Keyword, RowKind::Setting(LocalSettingKind::Unknown))]
#[case(Some("[Arguments]"), HolderKind::TestCase, RowKind::Setting(LocalSettingKind::Unknown))]
#[case(Some("[Whatever]"), HolderKind::Keyword, RowKind::Setting(LocalSettingKind::Unknown))]
#[case(Some("Log"), HolderKind::Keyword, RowKind::Executable)]
#[case(None, HolderKind::TestCase, RowKind::Executable)]
fn test_classify_row(#[case] first: Option<&str>, #[case] holder: HolderKind, #[case] expected: RowKind) {
    assert_eq!(classify_row(first, holder), expected);
}

#[test]
fn test_link_loops_tags_body_and_end() {
    let mut model = build(
        "*** Test Cases ***\nT\n    FOR    ${i}    IN    a    b\n        Log    ${i}\n    END\n    Log    after\n",
    );
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    assert!(holder.link_loops().is_empty());
    let rows = holder.rows();
    assert!(!rows[0].first_cell().unwrap().has_type(RobotTokenType::ForContinue));
    assert!(rows[1].first_cell().unwrap().has_type(RobotTokenType::ForContinue));
    assert_eq!(rows[2].first_cell().unwrap().primary_type(), RobotTokenType::ForEndMarker);
    assert!(!rows[3].first_cell().unwrap().has_type(RobotTokenType::ForContinue));
}

#[test]
fn test_link_loops_nested() {
    let mut model = build(
        "*** Test Cases ***\nT\n    FOR    ${i}    IN    a\n        FOR    ${j}    IN    b\n            Log    ${j}\n        END\n    END\n",
    );
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    assert!(holder.link_loops().is_empty());
    let inner = holder.rows()[1].first_cell().unwrap();
    assert_eq!(inner.primary_type(), RobotTokenType::ForMarker);
    assert!(inner.has_type(RobotTokenType::ForContinue));
    assert_eq!(holder.rows()[3].first_cell().unwrap().primary_type(), RobotTokenType::ForEndMarker);
    assert_eq!(holder.rows()[4].first_cell().unwrap().primary_type(), RobotTokenType::ForEndMarker);
}

#[test]
fn test_link_loops_reports_problems() {
    let mut model = build("*** Test Cases ***\nT\n    END\n    FOR    ${i}    IN    a\n        Log    ${i}\n");
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    assert_eq!(
        holder.link_loops(),
        vec![LoopProblem::UnmatchedEnd { row: 0 }, LoopProblem::Unclosed { row: 1 }]
    );
    assert_eq!(holder.rows()[0].first_cell().unwrap().primary_type(), RobotTokenType::Action);
}

#[test]
fn test_link_loops_is_repeatable() {
    let mut model = build("*** Test Cases ***\nT\n    FOR    ${i}    IN    a\n        Log    ${i}\n    END\n");
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    holder.link_loops();
    let first: Vec<_> = holder.rows().iter().map(|r| r.first_cell().unwrap().types.clone()).collect();
    holder.link_loops();
    let second: Vec<_> = holder.rows().iter().map(|r| r.first_cell().unwrap().types.clone()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_remove_inline_first_row_restores_name_line() {
    let mut model = build("*** Test Cases ***\nMy Test    Log    one\n    Log    two\n");
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    assert_eq!(holder.name_line().eol.kind, EolKind::Partial);
    let removed = holder.remove_row(0).unwrap();
    assert_eq!(removed.cell_texts(), vec!["Log", "one"]);
    assert_eq!(holder.name_line().eol.kind, EolKind::Lf);
    assert_eq!(model.dump(), "*** Test Cases ***\nMy Test\n    Log    two\n");
}

#[test]
fn test_pending_lines_follow_row_edits() {
    let mut model = build("*** Keywords ***\nKw\n    Log    a\n\n    Log    b\n");
    let holder = model.code_table_mut(HolderKind::Keyword).get_mut(0).unwrap();
    assert_eq!(holder.pending_lines()[0].0, 1);
    holder.remove_row(0).unwrap();
    assert_eq!(holder.pending_lines()[0].0, 0);
    assert_eq!(model.dump(), "*** Keywords ***\nKw\n\n    Log    b\n");
}

#[test]
fn test_move_rows() {
    let mut model = build("*** Keywords ***\nKw\n    Log    a\n    Log    b\n");
    let holder = model.code_table_mut(HolderKind::Keyword).get_mut(0).unwrap();
    assert!(!holder.move_row_up(0));
    assert!(holder.move_row_down(0));
    assert_eq!(holder.rows()[0].cell_texts(), vec!["Log", "b"]);
    assert!(!holder.move_row_down(1));
    assert_eq!(model.dump(), "*** Keywords ***\nKw\n    Log    b\n    Log    a\n");
}

#[test]
fn test_retype_row_after_edit() {
    let mut model = build("*** Test Cases ***\nT\n    Log    x\n");
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    let row = holder.row_mut(0).unwrap();
    crate::model::cells::set_cell(&mut row.lines, crate::model::ROW_DATA_COLUMN, 0, "[Tags]");
    holder.retype_row(0);
    assert_eq!(holder.rows()[0].kind(), RowKind::Setting(LocalSettingKind::Tags));
    assert_eq!(holder.rows()[0].cells()[1].primary_type(), RobotTokenType::TagName);
}

#[test]
fn test_revision_changes_on_edit() {
    let mut model = build("*** Test Cases ***\nT\n    Log    x\n");
    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    let before = holder.revision();
    holder.move_row_down(0);
    assert_eq!(holder.revision(), before);
    holder.remove_row(0);
    assert!(holder.revision() > before);
}

#[test]
fn test_by_name_ignores_case_and_spaces() {
    let model = build("*** Keywords ***\nOpen Browser To Page\n    No Operation\n");
    assert!(model.keywords().by_name("open browser topage").is_some());
    assert!(model.keywords().by_name("close browser").is_none());
    let holder = model.keywords().get(0).unwrap();
    assert_eq!(holder.lines().len(), 2);
}
