//! Test case, task and keyword edits.

use crate::core::{CommandError, ModelEvent, ModelEventKind};
use crate::model::{CodeHolder, FileModel, cells};
use crate::parser::kinds::HolderKind;

use super::{CommandResult, Direction, EditorCommand, HolderRef, check_name, holder_mut};

#[derive(Debug, Clone)]
enum NewHolders {
    Names(Vec<String>),
    Saved(Vec<CodeHolder>),
}

/// Insert holders before `index` of a code table
#[derive(Debug, Clone)]
pub struct InsertHolders {
    kind: HolderKind,
    index: usize,
    holders: NewHolders,
    inserted: usize,
}

impl InsertHolders {
    /// New holders with the given names and no rows
    pub fn new(kind: HolderKind, index: usize, names: Vec<String>) -> Self {
        Self {
            kind,
            index,
            holders: NewHolders::Names(names),
            inserted: 0,
        }
    }

    fn restore(kind: HolderKind, index: usize, holders: Vec<CodeHolder>) -> Self {
        Self {
            kind,
            index,
            holders: NewHolders::Saved(holders),
            inserted: 0,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let table = model.code_table(self.kind);
        if self.index > table.len() {
            return Err(CommandError::out_of_range(
                self.kind.display_name(),
                self.index,
                table.len(),
            ));
        }
        let neighbor = table.section_for_insert(self.index);
        let section = model.insertion_section(self.kind.section(), neighbor)?;
        let template = model.line_template();
        let holders = match &self.holders {
            NewHolders::Names(names) => names
                .iter()
                .map(|name| {
                    check_name("name", name)?;
                    let line = cells::new_line(std::slice::from_ref(name), &template, 0);
                    Ok(CodeHolder::new(self.kind, section, line))
                })
                .collect::<Result<Vec<_>, CommandError>>()?,
            NewHolders::Saved(holders) => holders.clone(),
        };
        if holders.is_empty() {
            return Err(CommandError::invalid_value("holders", "nothing to insert"));
        }
        let table = model.code_table_mut(self.kind);
        let mut events = Vec::with_capacity(holders.len());
        for (offset, holder) in holders.into_iter().enumerate() {
            events.push(ModelEvent::new(ModelEventKind::HoldersInserted, holder.id()));
            table.insert(self.index + offset, holder);
        }
        self.inserted = events.len();
        Ok(events)
    }
}

impl EditorCommand for InsertHolders {
    fn name(&self) -> &'static str {
        "insert-holders"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if self.inserted == 0 {
            return Vec::new();
        }
        vec![Box::new(DeleteHolders::new(self.kind, self.index, self.inserted))]
    }
}

/// Delete `count` holders starting at `index`
#[derive(Debug, Clone)]
pub struct DeleteHolders {
    kind: HolderKind,
    index: usize,
    count: usize,
    removed: Vec<CodeHolder>,
}

impl DeleteHolders {
    pub fn new(kind: HolderKind, index: usize, count: usize) -> Self {
        Self {
            kind,
            index,
            count,
            removed: Vec::new(),
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let table = model.code_table_mut(self.kind);
        let size = table.len();
        if self.count == 0 || self.index + self.count > size {
            return Err(CommandError::out_of_range(
                self.kind.display_name(),
                self.index + self.count.max(1) - 1,
                size,
            ));
        }
        self.removed = (0..self.count)
            .filter_map(|_| table.remove(self.index))
            .collect();
        Ok(self
            .removed
            .iter()
            .map(|holder| ModelEvent::new(ModelEventKind::HoldersRemoved, holder.id()))
            .collect())
    }
}

impl EditorCommand for DeleteHolders {
    fn name(&self) -> &'static str {
        "delete-holders"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if self.removed.is_empty() {
            return Vec::new();
        }
        vec![Box::new(InsertHolders::restore(
            self.kind,
            self.index,
            self.removed.clone(),
        ))]
    }
}

/// Give a holder a new name
#[derive(Debug, Clone)]
pub struct RenameHolder {
    holder: HolderRef,
    name: String,
    previous: Option<String>,
}

impl RenameHolder {
    pub fn new(holder: HolderRef, name: impl Into<String>) -> Self {
        Self {
            holder,
            name: name.into(),
            previous: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.previous = None;
        check_name("name", &self.name)?;
        let target = holder_mut(model, self.holder)?;
        if target.name() == self.name {
            return Ok(Vec::new());
        }
        self.previous = Some(target.name().to_string());
        target.set_name(&self.name);
        Ok(vec![ModelEvent::new(ModelEventKind::HolderNameChanged, self.holder.id)])
    }
}

impl EditorCommand for RenameHolder {
    fn name(&self) -> &'static str {
        "rename-holder"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.previous {
            Some(name) => vec![Box::new(RenameHolder::new(self.holder, name.clone()))],
            None => Vec::new(),
        }
    }
}

/// Swap a holder with its neighbor in the table
#[derive(Debug, Clone)]
pub struct MoveHolder {
    kind: HolderKind,
    index: usize,
    direction: Direction,
    moved: bool,
}

impl MoveHolder {
    pub fn new(kind: HolderKind, index: usize, direction: Direction) -> Self {
        Self {
            kind,
            index,
            direction,
            moved: false,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let table = model.code_table_mut(self.kind);
        let id = table.get(self.index).map(CodeHolder::id);
        let moved = match self.direction {
            Direction::Up => table.move_up(self.index),
            Direction::Down => table.move_down(self.index),
        };
        let (true, Some(id)) = (moved, id) else {
            return Err(CommandError::InvalidMove {
                what: self.kind.display_name(),
                index: self.index,
                direction: self.direction.as_str(),
            });
        };
        self.moved = true;
        Ok(vec![ModelEvent::new(ModelEventKind::HolderMoved, id)])
    }
}

impl EditorCommand for MoveHolder {
    fn name(&self) -> &'static str {
        "move-holder"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if !self.moved {
            return Vec::new();
        }
        vec![Box::new(MoveHolder::new(
            self.kind,
            self.direction.target(self.index),
            self.direction.reverse(),
        ))]
    }
}
