//! Editor commands with exact undo.
//!
//! Every edit of a [`FileModel`] is an [`EditorCommand`]. Executing a
//! command returns the [`ModelEvent`]s it caused; afterwards
//! [`EditorCommand::undo_commands`] gives the commands that put the model
//! back, whose own undo commands redo the edit. An edit that changes
//! nothing emits no events and has no undo commands.
//!
//! [`EditorSession`] keeps the undo and redo stacks and forwards events to
//! its subscribers.

pub mod cells;
pub mod holders;
pub mod rows;
pub mod session;
pub mod settings;
pub mod variables;

pub use cells::{DeleteCell, InsertCell, RestoreRow, SetCellValue, SetComment};
pub use holders::{DeleteHolders, InsertHolders, MoveHolder, RenameHolder};
pub use rows::{DeleteRows, InsertRows, MoveRow};
pub use session::EditorSession;
pub use settings::{
    DeleteSetting, DeleteSettingCell, InsertSetting, InsertSettingCell, MoveSetting, RenameSetting,
    RestoreSetting, SetSettingArgument,
};
pub use variables::{
    DeleteVariable, DeleteVariableCell, InsertVariable, InsertVariableCell, MoveVariable,
    RenameVariable, RestoreVariable, SetVariableValue,
};

use std::fmt;

use crate::base::ElementId;
use crate::base::constants::{COMMENT_START, CONTINUATION_MARKER};
use crate::core::{CommandError, ModelEvent, OperationResult};
use crate::model::{CodeHolder, FileModel, Setting, Variable};
use crate::parser::kinds::HolderKind;

pub type CommandResult = OperationResult<(), CommandError, ModelEvent>;

pub trait EditorCommand: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Apply the edit. Preconditions are checked before anything changes.
    fn execute(&mut self, model: &mut FileModel) -> CommandResult;

    /// Commands reverting the last successful [`execute`](Self::execute),
    /// in the order they must run
    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>>;
}

/// Direction of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Index an element at `index` ends up at
    fn target(self, index: usize) -> usize {
        match self {
            Self::Up => index.saturating_sub(1),
            Self::Down => index + 1,
        }
    }
}

/// A test case, task or keyword addressed by identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolderRef {
    pub kind: HolderKind,
    pub id: ElementId,
}

impl HolderRef {
    pub fn new(kind: HolderKind, id: ElementId) -> Self {
        Self { kind, id }
    }

    pub fn of(holder: &CodeHolder) -> Self {
        Self::new(holder.kind(), holder.id())
    }
}

/// Reject names that would read back as something else than a name: a
/// comment or a continuation marker
fn check_name(what: &'static str, name: &str) -> Result<(), CommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::invalid_value(what, "name cannot be empty"));
    }
    if name.starts_with(COMMENT_START) || name == CONTINUATION_MARKER {
        return Err(CommandError::invalid_value(
            what,
            format!("'{name}' would be read back as a comment or continuation"),
        ));
    }
    Ok(())
}

fn holder_mut(model: &mut FileModel, holder: HolderRef) -> Result<&mut CodeHolder, CommandError> {
    model
        .code_table_mut(holder.kind)
        .find_mut(holder.id)
        .ok_or(CommandError::NotFound(holder.kind.display_name()))
}

fn setting_mut(model: &mut FileModel, id: ElementId) -> Result<&mut Setting, CommandError> {
    model
        .setting_table_mut()
        .find_mut(id)
        .ok_or(CommandError::NotFound("setting"))
}

fn variable_mut(model: &mut FileModel, id: ElementId) -> Result<&mut Variable, CommandError> {
    model
        .variable_table_mut()
        .find_mut(id)
        .ok_or(CommandError::NotFound("variable"))
}

#[cfg(test)]
mod tests;
