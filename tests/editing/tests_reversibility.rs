//! Every command undone gives back the text it started from, and redone
//! gives back the edited text.

use robotide::FileModel;
use robotide::cmd::{
    DeleteCell, DeleteHolders, DeleteRows, DeleteSetting, DeleteSettingCell, DeleteVariable,
    DeleteVariableCell, Direction, EditorCommand, InsertCell, InsertHolders, InsertRows,
    InsertSetting, InsertSettingCell, InsertVariable, InsertVariableCell, MoveHolder, MoveRow,
    MoveSetting, MoveVariable, RenameHolder, RenameSetting, RenameVariable, SetCellValue,
    SetComment, SetSettingArgument, SetVariableValue,
};
use robotide::model::CellAddress;
use robotide::parser::{HolderKind, SettingKind};

use crate::helpers::fixtures::SUITE;
use crate::helpers::{holder, row_texts, session};

fn assert_reversible<C: EditorCommand>(make: impl FnOnce(&FileModel) -> C) {
    let mut session = session(SUITE);
    let command = make(session.model());
    session.execute(command).unwrap();
    let edited = session.model().dump();
    assert_ne!(edited, SUITE);

    session.undo().unwrap();
    assert_eq!(session.model().dump(), SUITE);
    session.redo().unwrap();
    assert_eq!(session.model().dump(), edited);
}

fn case(model: &FileModel) -> robotide::cmd::HolderRef {
    holder(model, HolderKind::TestCase, 0)
}

#[test]
fn test_cell_commands_reverse() {
    assert_reversible(|m| SetCellValue::new(case(m), 3, 1, "dave"));
    assert_reversible(|m| SetCellValue::new(case(m), 1, 4, "extra"));
    assert_reversible(|m| InsertCell::new(case(m), 3, 1).with_value("first"));
    assert_reversible(|m| DeleteCell::new(case(m), 1, 2));
    assert_reversible(|m| SetComment::new(case(m), 3, vec!["each user".to_string()]));
}

#[test]
fn test_row_commands_reverse() {
    assert_reversible(|m| InsertRows::single(case(m), 2, vec!["No Operation".to_string()]));
    assert_reversible(|m| DeleteRows::new(case(m), 2, 4));
    assert_reversible(|m| MoveRow::down(case(m), 0));
    assert_reversible(|m| MoveRow::up(case(m), 6));
}

#[test]
fn test_holder_commands_reverse() {
    assert_reversible(|_| InsertHolders::new(HolderKind::Keyword, 1, vec!["Logout".to_string()]));
    assert_reversible(|_| DeleteHolders::new(HolderKind::TestCase, 0, 1));
    assert_reversible(|_| MoveHolder::new(HolderKind::TestCase, 0, Direction::Down));
    assert_reversible(|m| RenameHolder::new(case(m), "Invalid Login"));
}

#[test]
fn test_setting_commands_reverse() {
    let id = |m: &FileModel, index: usize| m.setting_table().get(index).unwrap().id();
    assert_reversible(|m| RenameSetting::new(id(m, 1), "Resource"));
    assert_reversible(|m| SetSettingArgument::new(id(m, 2), CellAddress::Argument(1), "8271"));
    assert_reversible(|m| SetSettingArgument::new(id(m, 3), CellAddress::Comment, ""));
    assert_reversible(|m| DeleteSetting::new(id(m, 4)));
    assert_reversible(|_| {
        InsertSetting::new(SettingKind::Library, 2, vec!["OperatingSystem".to_string()])
    });
    assert_reversible(|m| InsertSettingCell::new(id(m, 2), 2, "8271"));
    assert_reversible(|m| DeleteSettingCell::new(id(m, 5), 2));
    assert_reversible(|_| MoveSetting::new(1, Direction::Down));
}

#[test]
fn test_variable_commands_reverse() {
    let id = |m: &FileModel, index: usize| m.variable_table().get(index).unwrap().id();
    assert_reversible(|_| InsertVariable::new(0, "${PORT}", vec!["8270".to_string()]));
    assert_reversible(|m| DeleteVariable::new(id(m, 1)));
    assert_reversible(|m| RenameVariable::new(id(m, 0), "${SERVER}"));
    assert_reversible(|m| SetVariableValue::new(id(m, 1), 0, "dave"));
    assert_reversible(|m| InsertVariableCell::new(id(m, 2), 1, "avg=5"));
    assert_reversible(|m| DeleteVariableCell::new(id(m, 1), 3));
    assert_reversible(|_| MoveVariable::new(2, Direction::Up));
}

#[test]
fn test_deleting_a_cell_keeps_the_others_in_order() {
    let mut session = session(SUITE);
    let login = holder(session.model(), HolderKind::Keyword, 0);
    let before = row_texts(session.model(), HolderKind::Keyword, 0)[0].clone();
    assert_eq!(before, vec!["[Arguments]", "${name}", "${password}=secret"]);

    session.execute(DeleteCell::new(login, 0, 1)).unwrap();

    let after = row_texts(session.model(), HolderKind::Keyword, 0)[0].clone();
    assert_eq!(after, vec!["[Arguments]", "${password}=secret"]);
}

#[test]
fn test_deleting_a_setting_cell_keeps_the_others_in_order() {
    let text = "*** Settings ***\nLibrary    lib    arg1    arg2    arg3\n";
    let mut session = session(text);
    let library = session.model().setting_table().get(0).unwrap().id();

    session.execute(DeleteSettingCell::new(library, 3)).unwrap();
    let edited = "*** Settings ***\nLibrary    lib    arg1    arg3\n";
    assert_eq!(session.model().dump(), edited);

    session.undo().unwrap();
    assert_eq!(session.model().dump(), text);
    session.redo().unwrap();
    assert_eq!(session.model().dump(), edited);
}
