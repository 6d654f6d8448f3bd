//! Cell edits of holder rows.
//!
//! Cell indexes count data cells of a row, starting at the keyword or
//! setting name. Every edit reclassifies the row, so renaming the first
//! cell to `[Tags]` turns a call into a local setting and back.

use crate::base::constants::EMPTY_CELL_MARKER;
use crate::core::{CommandError, ModelEvent, ModelEventKind};
use crate::model::{CodeRow, FileModel, ROW_DATA_COLUMN, RowKind, cells};
use crate::parser::token::RobotLine;

use super::{CommandResult, EditorCommand, HolderRef, holder_mut};

/// Run `edit` on the lines of row `index` and retype the row.
///
/// `edit` checks its preconditions before changing anything and returns
/// `false` when there is nothing to do. Returns the row as it was before
/// together with its new kind, or `None` when the text did not change.
fn edit_row(
    model: &mut FileModel,
    holder: HolderRef,
    index: usize,
    edit: impl FnOnce(&mut Vec<RobotLine>) -> Result<bool, CommandError>,
) -> Result<Option<(CodeRow, RowKind)>, CommandError> {
    let target = holder_mut(model, holder)?;
    let size = target.rows().len();
    let before = target
        .row(index)
        .cloned()
        .ok_or(CommandError::out_of_range("row", index, size))?;
    let Some(row) = target.row_mut(index) else {
        return Ok(None);
    };
    if !edit(&mut row.lines)? {
        return Ok(None);
    }
    if cells::same_text(&row.lines, &before.lines) {
        *row = before;
        return Ok(None);
    }
    target.retype_row(index);
    let kind = target.row(index).map_or(before.kind(), CodeRow::kind);
    Ok(Some((before, kind)))
}

fn data_count(lines: &[RobotLine]) -> usize {
    cells::data_cell_count(lines, ROW_DATA_COLUMN)
}

fn row_events(holder: HolderRef, row: &CodeRow, kinds: &[ModelEventKind]) -> Vec<ModelEvent> {
    kinds
        .iter()
        .map(|kind| ModelEvent::new(*kind, row.id()).with_parent(holder.id))
        .collect()
}

/// State needed to undo a row edit
#[derive(Debug, Clone, Default)]
struct Undo {
    before: Option<CodeRow>,
    events: Vec<ModelEventKind>,
}

impl Undo {
    fn record(
        &mut self,
        holder: HolderRef,
        outcome: Option<(CodeRow, RowKind)>,
        event: ModelEventKind,
    ) -> Vec<ModelEvent> {
        let Some((before, kind)) = outcome else {
            *self = Self::default();
            return Vec::new();
        };
        let mut kinds = vec![event];
        if kind != before.kind() {
            kinds.push(ModelEventKind::RowConverted);
        }
        let events = row_events(holder, &before, &kinds);
        self.before = Some(before);
        self.events = kinds;
        events
    }

    fn commands(&self, holder: HolderRef, index: usize) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(row) => vec![Box::new(RestoreRow::new(holder, index, row.clone(), self.events.clone()))],
            None => Vec::new(),
        }
    }
}

// ============================================================================
// Set value
// ============================================================================

/// Write a value into a cell.
///
/// An empty value in the middle of a row becomes `\`; an empty last cell
/// is removed together with trailing `\` cells.
#[derive(Debug, Clone)]
pub struct SetCellValue {
    holder: HolderRef,
    row: usize,
    column: usize,
    value: String,
    undo: Undo,
}

impl SetCellValue {
    pub fn new(holder: HolderRef, row: usize, column: usize, value: impl Into<String>) -> Self {
        Self {
            holder,
            row,
            column,
            value: value.into(),
            undo: Undo::default(),
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let (column, value) = (self.column, self.value.as_str());
        let outcome = edit_row(model, self.holder, self.row, |lines| {
            cells::write_cell(lines, ROW_DATA_COLUMN, column, value, 0);
            Ok(true)
        })?;
        let event = if column == 0 {
            ModelEventKind::CallNameChanged
        } else {
            ModelEventKind::CellValueChanged
        };
        Ok(self.undo.record(self.holder, outcome, event))
    }
}

impl EditorCommand for SetCellValue {
    fn name(&self) -> &'static str {
        "set-cell-value"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        self.undo.commands(self.holder, self.row)
    }
}

// ============================================================================
// Insert and delete
// ============================================================================

/// Insert a cell before `column`; the new cell holds `\` unless given a value
#[derive(Debug, Clone)]
pub struct InsertCell {
    holder: HolderRef,
    row: usize,
    column: usize,
    value: String,
    undo: Undo,
}

impl InsertCell {
    pub fn new(holder: HolderRef, row: usize, column: usize) -> Self {
        Self {
            holder,
            row,
            column,
            value: EMPTY_CELL_MARKER.to_string(),
            undo: Undo::default(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.value = value;
        }
        self
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let (column, value) = (self.column, self.value.as_str());
        let outcome = edit_row(model, self.holder, self.row, |lines| {
            let count = data_count(lines);
            if column > count {
                return Err(CommandError::out_of_range("cell", column, count));
            }
            Ok(cells::insert_cell(lines, ROW_DATA_COLUMN, column, value))
        })?;
        Ok(self.undo.record(self.holder, outcome, ModelEventKind::CellInserted))
    }
}

impl EditorCommand for InsertCell {
    fn name(&self) -> &'static str {
        "insert-cell"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        self.undo.commands(self.holder, self.row)
    }
}

/// Delete a cell; later cells shift left and trailing `\` cells go away
#[derive(Debug, Clone)]
pub struct DeleteCell {
    holder: HolderRef,
    row: usize,
    column: usize,
    undo: Undo,
}

impl DeleteCell {
    pub fn new(holder: HolderRef, row: usize, column: usize) -> Self {
        Self {
            holder,
            row,
            column,
            undo: Undo::default(),
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let column = self.column;
        let outcome = edit_row(model, self.holder, self.row, |lines| {
            let count = data_count(lines);
            if column >= count {
                return Err(CommandError::out_of_range("cell", column, count));
            }
            cells::remove_cell(lines, ROW_DATA_COLUMN, column);
            cells::trim_trailing_empty(lines, ROW_DATA_COLUMN, 0);
            Ok(true)
        })?;
        Ok(self.undo.record(self.holder, outcome, ModelEventKind::CellRemoved))
    }
}

impl EditorCommand for DeleteCell {
    fn name(&self) -> &'static str {
        "delete-cell"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        self.undo.commands(self.holder, self.row)
    }
}

// ============================================================================
// Comment
// ============================================================================

/// Replace the comment of a row; an empty list removes it
#[derive(Debug, Clone)]
pub struct SetComment {
    holder: HolderRef,
    row: usize,
    comment: Vec<String>,
    undo: Undo,
}

impl SetComment {
    pub fn new(holder: HolderRef, row: usize, comment: Vec<String>) -> Self {
        Self {
            holder,
            row,
            comment,
            undo: Undo::default(),
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let comment = &self.comment;
        let outcome = edit_row(model, self.holder, self.row, |lines| {
            if cells::comment_texts(lines, ROW_DATA_COLUMN) == cells::comment_cells(comment) {
                return Ok(false);
            }
            cells::set_comment(lines, ROW_DATA_COLUMN, comment);
            Ok(true)
        })?;
        Ok(self.undo.record(self.holder, outcome, ModelEventKind::CommentChanged))
    }
}

impl EditorCommand for SetComment {
    fn name(&self) -> &'static str {
        "set-comment"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        self.undo.commands(self.holder, self.row)
    }
}

// ============================================================================
// Restore
// ============================================================================

/// Put a saved row back in place of row `index`
#[derive(Debug, Clone)]
pub struct RestoreRow {
    holder: HolderRef,
    index: usize,
    row: CodeRow,
    events: Vec<ModelEventKind>,
    replaced: Option<CodeRow>,
}

impl RestoreRow {
    pub fn new(holder: HolderRef, index: usize, row: CodeRow, events: Vec<ModelEventKind>) -> Self {
        Self {
            holder,
            index,
            row,
            events,
            replaced: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let target = holder_mut(model, self.holder)?;
        let size = target.rows().len();
        let Some(row) = target.row_mut(self.index) else {
            return Err(CommandError::out_of_range("row", self.index, size));
        };
        let replaced = std::mem::replace(row, self.row.clone());
        target.link_loops();
        let events = row_events(self.holder, &self.row, &self.events);
        self.replaced = Some(replaced);
        Ok(events)
    }
}

impl EditorCommand for RestoreRow {
    fn name(&self) -> &'static str {
        "restore-row"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.replaced {
            Some(row) => vec![Box::new(RestoreRow::new(
                self.holder,
                self.index,
                row.clone(),
                self.events.clone(),
            ))],
            None => Vec::new(),
        }
    }
}
