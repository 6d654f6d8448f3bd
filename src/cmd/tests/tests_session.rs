use crate::cmd::{EditorSession, InsertRows, SetCellValue};
use crate::core::CommandError;
use crate::parser::kinds::HolderKind;

use super::{holder, record, session};

const CASE: &str = "*** Test Cases ***\nCase\n    Log    one\n";

#[test]
fn test_empty_history() {
    let mut session = session(CASE);
    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert_eq!(session.undo(), Err(CommandError::EmptyHistory("undo")));
    assert_eq!(session.redo(), Err(CommandError::EmptyHistory("redo")));
}

#[test]
fn test_new_edit_clears_redo() {
    let mut session = session(CASE);
    let case = holder(&session, HolderKind::TestCase, 0);

    session.execute(SetCellValue::new(case, 0, 1, "two")).unwrap();
    session.undo().unwrap();
    assert!(session.can_redo());

    session.execute(SetCellValue::new(case, 0, 1, "three")).unwrap();
    assert!(!session.can_redo());
    assert_eq!(session.redo(), Err(CommandError::EmptyHistory("redo")));
}

#[test]
fn test_undo_redo_chain() {
    let mut session = session(CASE);
    let case = holder(&session, HolderKind::TestCase, 0);
    let mut states = vec![session.model().dump()];

    session.execute(SetCellValue::new(case, 0, 1, "two")).unwrap();
    states.push(session.model().dump());
    session
        .execute(InsertRows::single(case, 1, vec!["No Operation".to_string()]))
        .unwrap();
    states.push(session.model().dump());
    session.execute(SetCellValue::new(case, 1, 0, "Fail")).unwrap();
    states.push(session.model().dump());

    for expected in states.iter().rev().skip(1) {
        session.undo().unwrap();
        assert_eq!(&session.model().dump(), expected);
    }
    assert!(!session.can_undo());
    for expected in states.iter().skip(1) {
        session.redo().unwrap();
        assert_eq!(&session.model().dump(), expected);
    }
}

#[test]
fn test_failed_command_publishes_nothing() {
    let mut session = session(CASE);
    let case = holder(&session, HolderKind::TestCase, 0);
    let events = record(&mut session);

    assert!(session.execute(SetCellValue::new(case, 3, 0, "x")).is_err());
    assert!(events.lock().is_empty());
    assert!(!session.can_undo());
}

#[test]
fn test_positions_follow_edits() {
    let mut session = session(CASE);
    let case = holder(&session, HolderKind::TestCase, 0);

    session.execute(SetCellValue::new(case, 0, 0, "Log Many")).unwrap();
    let model = session.into_model();
    let row = &model.test_cases().get(0).unwrap().rows()[0];
    let value = row.data_cells()[1];
    assert_eq!(value.position.line, 2);
    assert_eq!(value.position.column, 16);

    let session = EditorSession::new(model);
    assert!(!session.can_undo());
}
