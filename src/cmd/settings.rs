//! Settings table edits.
//!
//! Settings are created, updated and removed through their kind's
//! [`SettingOperation`](crate::model::SettingOperation), so column typing
//! stays in one place.

use crate::base::ElementId;
use crate::core::{CommandError, ModelEvent, ModelEventKind};
use crate::model::{CellAddress, FileModel, Setting, cells, operation_for};
use crate::parser::kinds::{SectionKind, SettingKind};
use crate::parser::recognizer::recognize_setting;
use crate::parser::token::RobotLine;

use super::{CommandResult, Direction, EditorCommand, check_name, setting_mut};

#[derive(Debug, Clone)]
enum NewSetting {
    Fresh {
        kind: SettingKind,
        arguments: Vec<String>,
        comment: Vec<String>,
    },
    Saved(Box<Setting>),
}

/// Insert a setting before `index` of the settings table
#[derive(Debug, Clone)]
pub struct InsertSetting {
    index: usize,
    setting: NewSetting,
    inserted: Option<ElementId>,
}

impl InsertSetting {
    pub fn new(kind: SettingKind, index: usize, arguments: Vec<String>) -> Self {
        Self {
            index,
            setting: NewSetting::Fresh {
                kind,
                arguments,
                comment: Vec::new(),
            },
            inserted: None,
        }
    }

    pub fn with_comment(mut self, comment: Vec<String>) -> Self {
        if let NewSetting::Fresh { comment: current, .. } = &mut self.setting {
            *current = comment;
        }
        self
    }

    fn restore(index: usize, setting: Setting) -> Self {
        Self {
            index,
            setting: NewSetting::Saved(Box::new(setting)),
            inserted: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.inserted = None;
        let size = model.setting_table().len();
        if self.index > size {
            return Err(CommandError::out_of_range("setting", self.index, size));
        }
        let neighbor = model.setting_table().section_for_insert(self.index);
        let section = model.insertion_section(SectionKind::Settings, neighbor)?;
        let template = model.line_template();
        let id = match &self.setting {
            NewSetting::Fresh {
                kind: SettingKind::Unknown,
                ..
            } => {
                return Err(CommandError::invalid_value(
                    "setting",
                    "cannot insert a setting of unknown kind",
                ));
            }
            NewSetting::Fresh {
                kind,
                arguments,
                comment,
            } => operation_for(*kind).create(
                model.setting_table_mut(),
                self.index,
                section,
                &template,
                arguments,
                comment,
            ),
            NewSetting::Saved(setting) => {
                let id = setting.id();
                model
                    .setting_table_mut()
                    .insert(self.index, setting.as_ref().clone());
                id
            }
        };
        self.inserted = Some(id);
        Ok(vec![ModelEvent::new(ModelEventKind::SettingInserted, id)])
    }
}

impl EditorCommand for InsertSetting {
    fn name(&self) -> &'static str {
        "insert-setting"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match self.inserted {
            Some(id) => vec![Box::new(DeleteSetting::new(id))],
            None => Vec::new(),
        }
    }
}

/// Remove a setting from the settings table
#[derive(Debug, Clone)]
pub struct DeleteSetting {
    id: ElementId,
    removed: Option<(usize, Setting)>,
}

impl DeleteSetting {
    pub fn new(id: ElementId) -> Self {
        Self { id, removed: None }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let kind = setting_mut(model, self.id)?.kind();
        self.removed = operation_for(kind).remove(model.setting_table_mut(), self.id);
        if self.removed.is_none() {
            return Err(CommandError::NotFound("setting"));
        }
        Ok(vec![ModelEvent::new(ModelEventKind::SettingRemoved, self.id)])
    }
}

impl EditorCommand for DeleteSetting {
    fn name(&self) -> &'static str {
        "delete-setting"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.removed {
            Some((index, setting)) => vec![Box::new(InsertSetting::restore(*index, setting.clone()))],
            None => Vec::new(),
        }
    }
}

/// Change the declaration of a setting.
///
/// The kind, and with it the group, follow the new name: renaming
/// `Library` to `Resource` moves the import to the resources.
#[derive(Debug, Clone)]
pub struct RenameSetting {
    id: ElementId,
    name: String,
    before: Option<Vec<RobotLine>>,
}

impl RenameSetting {
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            before: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.before = None;
        check_name("setting", &self.name)?;
        let setting = setting_mut(model, self.id)?;
        if setting.name() == self.name {
            return Ok(Vec::new());
        }
        let before = setting.lines.clone();
        if !cells::set_cell(&mut setting.lines, 0, 0, &self.name) {
            return Err(CommandError::invalid_value("setting", "setting has no declaration"));
        }
        redeclare(setting);
        self.before = Some(before);
        Ok(vec![ModelEvent::new(ModelEventKind::CallNameChanged, self.id)])
    }
}

/// Argument index of cell `column`; the declaration cell is not an argument
fn argument_column(column: usize) -> Result<usize, CommandError> {
    column
        .checked_sub(1)
        .ok_or_else(|| CommandError::invalid_value("setting cell", "cell 0 holds the declaration"))
}

/// Derive the kind from the declaration cell and retype the columns
fn redeclare(setting: &mut Setting) {
    let (kind, _) = recognize_setting(setting.name());
    setting.set_kind(kind);
    operation_for(kind).retype(setting);
}

impl EditorCommand for RenameSetting {
    fn name(&self) -> &'static str {
        "rename-setting"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreSetting::new(
                self.id,
                lines.clone(),
                ModelEventKind::CallNameChanged,
            ))],
            None => Vec::new(),
        }
    }
}

/// Write an argument or the comment of a setting through its operation
#[derive(Debug, Clone)]
pub struct SetSettingArgument {
    id: ElementId,
    address: CellAddress,
    value: String,
    before: Option<Vec<RobotLine>>,
}

impl SetSettingArgument {
    pub fn new(id: ElementId, address: CellAddress, value: impl Into<String>) -> Self {
        Self {
            id,
            address,
            value: value.into(),
            before: None,
        }
    }

    fn event(&self) -> ModelEventKind {
        match self.address {
            CellAddress::Argument(_) => ModelEventKind::CellValueChanged,
            CellAddress::Comment => ModelEventKind::CommentChanged,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.before = None;
        let setting = setting_mut(model, self.id)?;
        if self.address == CellAddress::Comment {
            let wanted = if self.value.is_empty() {
                Vec::new()
            } else {
                cells::comment_cells(std::slice::from_ref(&self.value))
            };
            if setting.comment() == wanted {
                return Ok(Vec::new());
            }
        }
        let before = setting.lines.clone();
        operation_for(setting.kind()).update(setting, self.address, &self.value);
        if cells::same_text(&setting.lines, &before) {
            setting.lines = before;
            return Ok(Vec::new());
        }
        self.before = Some(before);
        Ok(vec![ModelEvent::new(self.event(), self.id)])
    }
}

impl EditorCommand for SetSettingArgument {
    fn name(&self) -> &'static str {
        "set-setting-argument"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreSetting::new(self.id, lines.clone(), self.event()))],
            None => Vec::new(),
        }
    }
}

/// Insert a cell before cell `column` of a setting.
///
/// Columns count the declaration as 0, which cannot be displaced.
#[derive(Debug, Clone)]
pub struct InsertSettingCell {
    id: ElementId,
    column: usize,
    value: String,
    before: Option<Vec<RobotLine>>,
}

impl InsertSettingCell {
    pub fn new(id: ElementId, column: usize, value: impl Into<String>) -> Self {
        Self {
            id,
            column,
            value: value.into(),
            before: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.before = None;
        let setting = setting_mut(model, self.id)?;
        let argument = argument_column(self.column)?;
        let before = setting.lines.clone();
        if !operation_for(setting.kind()).insert_argument(setting, argument, &self.value) {
            let size = cells::data_cell_count(&setting.lines, 0);
            return Err(CommandError::out_of_range("setting cell", self.column, size));
        }
        if cells::same_text(&setting.lines, &before) {
            setting.lines = before;
            return Ok(Vec::new());
        }
        self.before = Some(before);
        Ok(vec![ModelEvent::new(ModelEventKind::CellInserted, self.id)])
    }
}

impl EditorCommand for InsertSettingCell {
    fn name(&self) -> &'static str {
        "insert-setting-cell"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreSetting::new(
                self.id,
                lines.clone(),
                ModelEventKind::CellInserted,
            ))],
            None => Vec::new(),
        }
    }
}

/// Remove cell `column` of a setting; the following cells shift left
#[derive(Debug, Clone)]
pub struct DeleteSettingCell {
    id: ElementId,
    column: usize,
    before: Option<Vec<RobotLine>>,
}

impl DeleteSettingCell {
    pub fn new(id: ElementId, column: usize) -> Self {
        Self {
            id,
            column,
            before: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.before = None;
        let setting = setting_mut(model, self.id)?;
        let argument = argument_column(self.column)?;
        let before = setting.lines.clone();
        if operation_for(setting.kind()).remove_argument(setting, argument).is_none() {
            let size = cells::data_cell_count(&setting.lines, 0);
            return Err(CommandError::out_of_range("setting cell", self.column, size));
        }
        self.before = Some(before);
        Ok(vec![ModelEvent::new(ModelEventKind::CellRemoved, self.id)])
    }
}

impl EditorCommand for DeleteSettingCell {
    fn name(&self) -> &'static str {
        "delete-setting-cell"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreSetting::new(
                self.id,
                lines.clone(),
                ModelEventKind::CellRemoved,
            ))],
            None => Vec::new(),
        }
    }
}

/// Swap the setting at `index` with its neighbor
#[derive(Debug, Clone)]
pub struct MoveSetting {
    index: usize,
    direction: Direction,
    moved: bool,
}

impl MoveSetting {
    pub fn new(index: usize, direction: Direction) -> Self {
        Self {
            index,
            direction,
            moved: false,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.moved = false;
        let table = model.setting_table_mut();
        let id = table.get(self.index).map(Setting::id);
        let moved = match self.direction {
            Direction::Up => table.move_up(self.index),
            Direction::Down => table.move_down(self.index),
        };
        let (true, Some(id)) = (moved, id) else {
            return Err(CommandError::InvalidMove {
                what: "setting",
                index: self.index,
                direction: self.direction.as_str(),
            });
        };
        self.moved = true;
        Ok(vec![ModelEvent::new(ModelEventKind::SettingMoved, id)])
    }
}

impl EditorCommand for MoveSetting {
    fn name(&self) -> &'static str {
        "move-setting"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if !self.moved {
            return Vec::new();
        }
        vec![Box::new(MoveSetting::new(
            self.direction.target(self.index),
            self.direction.reverse(),
        ))]
    }
}

/// Put saved lines back into a setting; the kind follows the restored
/// declaration
#[derive(Debug, Clone)]
pub struct RestoreSetting {
    id: ElementId,
    lines: Vec<RobotLine>,
    event: ModelEventKind,
    replaced: Option<Vec<RobotLine>>,
}

impl RestoreSetting {
    pub fn new(id: ElementId, lines: Vec<RobotLine>, event: ModelEventKind) -> Self {
        Self {
            id,
            lines,
            event,
            replaced: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let setting = setting_mut(model, self.id)?;
        let replaced = std::mem::replace(&mut setting.lines, self.lines.clone());
        redeclare(setting);
        self.replaced = Some(replaced);
        Ok(vec![ModelEvent::new(self.event, self.id)])
    }
}

impl EditorCommand for RestoreSetting {
    fn name(&self) -> &'static str {
        "restore-setting"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.replaced {
            Some(lines) => vec![Box::new(RestoreSetting::new(self.id, lines.clone(), self.event))],
            None => Vec::new(),
        }
    }
}
