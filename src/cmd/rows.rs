//! Row edits of test cases, tasks and keywords.

use crate::core::{CommandError, ModelEvent, ModelEventKind};
use crate::model::{CodeRow, FileModel, ROW_DATA_COLUMN, RowKind, cells};
use crate::parser::kinds::HolderKind;
use crate::parser::recognizer::tag_lexical;
use crate::parser::token::{EolKind, RobotLine};

use super::{CommandResult, Direction, EditorCommand, HolderRef, holder_mut};

#[derive(Debug, Clone)]
enum NewRows {
    Cells(Vec<Vec<String>>),
    Saved(Vec<CodeRow>),
}

/// Row holding `texts`; no texts give an empty row
fn new_row(texts: &[String], template: &RobotLine, holder: HolderKind) -> CodeRow {
    if texts.is_empty() {
        return CodeRow::empty(template.clone());
    }
    let mut line = cells::new_line(texts, template, ROW_DATA_COLUMN);
    tag_lexical(&mut line, ROW_DATA_COLUMN);
    let mut row = CodeRow::new(RowKind::Executable, line);
    row.reclassify(holder);
    row
}

/// Insert rows before `index`
#[derive(Debug, Clone)]
pub struct InsertRows {
    holder: HolderRef,
    index: usize,
    rows: NewRows,
    /// Line ending of the name line to put back with restored rows
    name_eol: Option<EolKind>,
    inserted: usize,
}

impl InsertRows {
    /// One row per entry of `rows`, each given by its cell texts
    pub fn new(holder: HolderRef, index: usize, rows: Vec<Vec<String>>) -> Self {
        Self {
            holder,
            index,
            rows: NewRows::Cells(rows),
            name_eol: None,
            inserted: 0,
        }
    }

    pub fn single(holder: HolderRef, index: usize, cells: Vec<String>) -> Self {
        Self::new(holder, index, vec![cells])
    }

    fn restore(holder: HolderRef, index: usize, rows: Vec<CodeRow>, name_eol: EolKind) -> Self {
        Self {
            holder,
            index,
            rows: NewRows::Saved(rows),
            name_eol: Some(name_eol),
            inserted: 0,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let template = model.line_template();
        let target = holder_mut(model, self.holder)?;
        let size = target.rows().len();
        if self.index > size {
            return Err(CommandError::out_of_range("row", self.index, size));
        }
        let rows: Vec<CodeRow> = match &self.rows {
            NewRows::Cells(texts) => texts
                .iter()
                .map(|texts| new_row(texts, &template, self.holder.kind))
                .collect(),
            NewRows::Saved(rows) => rows.clone(),
        };
        if rows.is_empty() {
            return Err(CommandError::invalid_value("rows", "nothing to insert"));
        }
        let mut events = Vec::with_capacity(rows.len());
        for (offset, row) in rows.into_iter().enumerate() {
            events.push(ModelEvent::new(ModelEventKind::RowsInserted, row.id()).with_parent(self.holder.id));
            target.insert_row(self.index + offset, row);
        }
        if let Some(eol) = self.name_eol {
            target.name_line.eol.kind = eol;
        }
        target.link_loops();
        self.inserted = events.len();
        Ok(events)
    }
}

impl EditorCommand for InsertRows {
    fn name(&self) -> &'static str {
        "insert-rows"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if self.inserted == 0 {
            return Vec::new();
        }
        vec![Box::new(DeleteRows::new(self.holder, self.index, self.inserted))]
    }
}

/// Delete `count` rows starting at `index`
#[derive(Debug, Clone)]
pub struct DeleteRows {
    holder: HolderRef,
    index: usize,
    count: usize,
    removed: Vec<CodeRow>,
    name_eol: EolKind,
}

impl DeleteRows {
    pub fn new(holder: HolderRef, index: usize, count: usize) -> Self {
        Self {
            holder,
            index,
            count,
            removed: Vec::new(),
            name_eol: EolKind::Lf,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let target = holder_mut(model, self.holder)?;
        let size = target.rows().len();
        if self.count == 0 || self.index + self.count > size {
            return Err(CommandError::out_of_range("row", self.index + self.count.max(1) - 1, size));
        }
        self.name_eol = target.name_line.eol.kind;
        self.removed = (0..self.count)
            .filter_map(|_| target.remove_row(self.index))
            .collect();
        target.link_loops();
        Ok(self
            .removed
            .iter()
            .map(|row| ModelEvent::new(ModelEventKind::RowsRemoved, row.id()).with_parent(self.holder.id))
            .collect())
    }
}

impl EditorCommand for DeleteRows {
    fn name(&self) -> &'static str {
        "delete-rows"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if self.removed.is_empty() {
            return Vec::new();
        }
        vec![Box::new(InsertRows::restore(
            self.holder,
            self.index,
            self.removed.clone(),
            self.name_eol,
        ))]
    }
}

/// Swap a row with its neighbor
#[derive(Debug, Clone)]
pub struct MoveRow {
    holder: HolderRef,
    index: usize,
    direction: Direction,
    moved: bool,
}

impl MoveRow {
    pub fn new(holder: HolderRef, index: usize, direction: Direction) -> Self {
        Self {
            holder,
            index,
            direction,
            moved: false,
        }
    }

    pub fn up(holder: HolderRef, index: usize) -> Self {
        Self::new(holder, index, Direction::Up)
    }

    pub fn down(holder: HolderRef, index: usize) -> Self {
        Self::new(holder, index, Direction::Down)
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let target = holder_mut(model, self.holder)?;
        let id = target.row(self.index).map(CodeRow::id);
        let moved = match self.direction {
            Direction::Up => target.move_row_up(self.index),
            Direction::Down => target.move_row_down(self.index),
        };
        let (true, Some(id)) = (moved, id) else {
            return Err(CommandError::InvalidMove {
                what: "row",
                index: self.index,
                direction: self.direction.as_str(),
            });
        };
        target.link_loops();
        self.moved = true;
        Ok(vec![ModelEvent::new(ModelEventKind::RowMoved, id).with_parent(self.holder.id)])
    }
}

impl EditorCommand for MoveRow {
    fn name(&self) -> &'static str {
        "move-row"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if !self.moved {
            return Vec::new();
        }
        vec![Box::new(MoveRow::new(
            self.holder,
            self.direction.target(self.index),
            self.direction.reverse(),
        ))]
    }
}
