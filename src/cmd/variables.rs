//! Variables table edits.

use crate::base::ElementId;
use crate::base::constants::EMPTY_CELL_MARKER;
use crate::core::{CommandError, ModelEvent, ModelEventKind};
use crate::model::variables::is_variable_declaration;
use crate::model::{FileModel, Variable, cells};
use crate::parser::kinds::SectionKind;
use crate::parser::recognizer::tag_lexical;
use crate::parser::token::RobotLine;

use super::{CommandResult, Direction, EditorCommand, variable_mut};

fn check_declaration(name: &str) -> Result<(), CommandError> {
    if !is_variable_declaration(name) {
        return Err(CommandError::invalid_value(
            "variable",
            format!("'{name}' is not a variable declaration"),
        ));
    }
    Ok(())
}

fn check_value_column(column: usize) -> Result<(), CommandError> {
    if column == 0 {
        return Err(CommandError::invalid_value(
            "variable cell",
            "cell 0 holds the declaration",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum NewVariable {
    Fresh {
        name: String,
        values: Vec<String>,
        comment: Vec<String>,
    },
    Saved(Box<Variable>),
}

/// Insert a variable before `index` of the variables table
#[derive(Debug, Clone)]
pub struct InsertVariable {
    index: usize,
    variable: NewVariable,
    inserted: Option<ElementId>,
}

impl InsertVariable {
    pub fn new(index: usize, name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            index,
            variable: NewVariable::Fresh {
                name: name.into(),
                values,
                comment: Vec::new(),
            },
            inserted: None,
        }
    }

    pub fn with_comment(mut self, comment: Vec<String>) -> Self {
        if let NewVariable::Fresh { comment: current, .. } = &mut self.variable {
            *current = comment;
        }
        self
    }

    fn restore(index: usize, variable: Variable) -> Self {
        Self {
            index,
            variable: NewVariable::Saved(Box::new(variable)),
            inserted: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.inserted = None;
        let size = model.variable_table().len();
        if self.index > size {
            return Err(CommandError::out_of_range("variable", self.index, size));
        }
        let neighbor = model.variable_table().section_for_insert(self.index);
        let section = model.insertion_section(SectionKind::Variables, neighbor)?;
        let variable = match &self.variable {
            NewVariable::Fresh {
                name,
                values,
                comment,
            } => {
                check_declaration(name)?;
                let mut texts = vec![name.clone()];
                texts.extend(values.iter().cloned());
                let mut line = cells::new_line(&texts, &model.line_template(), 0);
                tag_lexical(&mut line, 0);
                let mut variable = Variable::new(section, line);
                if !comment.is_empty() {
                    cells::set_comment(&mut variable.lines, 0, comment);
                    variable.retype();
                }
                variable
            }
            NewVariable::Saved(variable) => variable.as_ref().clone(),
        };
        let id = variable.id();
        model.variable_table_mut().insert(self.index, variable);
        self.inserted = Some(id);
        Ok(vec![ModelEvent::new(ModelEventKind::VariablesInserted, id)])
    }
}

impl EditorCommand for InsertVariable {
    fn name(&self) -> &'static str {
        "insert-variable"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match self.inserted {
            Some(id) => vec![Box::new(DeleteVariable::new(id))],
            None => Vec::new(),
        }
    }
}

/// Remove a variable from the variables table
#[derive(Debug, Clone)]
pub struct DeleteVariable {
    id: ElementId,
    removed: Option<(usize, Variable)>,
}

impl DeleteVariable {
    pub fn new(id: ElementId) -> Self {
        Self { id, removed: None }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let table = model.variable_table_mut();
        let index = table.position(self.id).ok_or(CommandError::NotFound("variable"))?;
        self.removed = table.remove(index).map(|variable| (index, variable));
        Ok(vec![ModelEvent::new(ModelEventKind::VariablesRemoved, self.id)])
    }
}

impl EditorCommand for DeleteVariable {
    fn name(&self) -> &'static str {
        "delete-variable"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.removed {
            Some((index, variable)) => {
                vec![Box::new(InsertVariable::restore(*index, variable.clone()))]
            }
            None => Vec::new(),
        }
    }
}

/// Change the declaration of a variable; its kind follows the sigil
#[derive(Debug, Clone)]
pub struct RenameVariable {
    id: ElementId,
    name: String,
    previous: Option<String>,
}

impl RenameVariable {
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            previous: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.previous = None;
        check_declaration(&self.name)?;
        let variable = variable_mut(model, self.id)?;
        if variable.name() == self.name {
            return Ok(Vec::new());
        }
        let previous = variable.name().to_string();
        if !cells::set_cell(&mut variable.lines, 0, 0, &self.name) {
            return Err(CommandError::invalid_value("variable", "variable has no declaration"));
        }
        variable.retype();
        self.previous = Some(previous);
        Ok(vec![ModelEvent::new(ModelEventKind::VariableNameChanged, self.id)])
    }
}

impl EditorCommand for RenameVariable {
    fn name(&self) -> &'static str {
        "rename-variable"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.previous {
            Some(name) => vec![Box::new(RenameVariable::new(self.id, name.clone()))],
            None => Vec::new(),
        }
    }
}

/// Write value `index` (0 is the first value after the declaration)
#[derive(Debug, Clone)]
pub struct SetVariableValue {
    id: ElementId,
    index: usize,
    value: String,
    before: Option<Vec<RobotLine>>,
}

impl SetVariableValue {
    pub fn new(id: ElementId, index: usize, value: impl Into<String>) -> Self {
        Self {
            id,
            index,
            value: value.into(),
            before: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.before = None;
        let variable = variable_mut(model, self.id)?;
        let before = variable.lines.clone();
        cells::write_cell(&mut variable.lines, 0, self.index + 1, &self.value, 1);
        if cells::same_text(&variable.lines, &before) {
            variable.lines = before;
            return Ok(Vec::new());
        }
        variable.retype();
        self.before = Some(before);
        Ok(vec![ModelEvent::new(ModelEventKind::VariableValueChanged, self.id)])
    }
}

impl EditorCommand for SetVariableValue {
    fn name(&self) -> &'static str {
        "set-variable-value"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreVariable::new(self.id, lines.clone()))],
            None => Vec::new(),
        }
    }
}

/// Insert a cell before cell `column` of a variable; column 0 is the
/// declaration
#[derive(Debug, Clone)]
pub struct InsertVariableCell {
    id: ElementId,
    column: usize,
    value: String,
    before: Option<Vec<RobotLine>>,
}

impl InsertVariableCell {
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
        check_value_column(self.column)?;
        let variable = variable_mut(model, self.id)?;
        let size = cells::data_cell_count(&variable.lines, 0);
        if self.column > size || variable.declaration().is_none() {
            return Err(CommandError::out_of_range("variable cell", self.column, size));
        }
        let before = variable.lines.clone();
        let text = if self.value.is_empty() {
            EMPTY_CELL_MARKER
        } else {
            self.value.as_str()
        };
        cells::insert_cell(&mut variable.lines, 0, self.column, text);
        cells::trim_trailing_empty(&mut variable.lines, 0, 1);
        if cells::same_text(&variable.lines, &before) {
            variable.lines = before;
            return Ok(Vec::new());
        }
        variable.retype();
        self.before = Some(before);
        Ok(vec![ModelEvent::new(ModelEventKind::CellInserted, self.id)])
    }
}

impl EditorCommand for InsertVariableCell {
    fn name(&self) -> &'static str {
        "insert-variable-cell"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreVariable::new(self.id, lines.clone()))],
            None => Vec::new(),
        }
    }
}

/// Remove cell `column` of a variable; the following cells shift left
#[derive(Debug, Clone)]
pub struct DeleteVariableCell {
    id: ElementId,
    column: usize,
    before: Option<Vec<RobotLine>>,
}

impl DeleteVariableCell {
    pub fn new(id: ElementId, column: usize) -> Self {
        Self {
            id,
            column,
            before: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.before = None;
        check_value_column(self.column)?;
        let variable = variable_mut(model, self.id)?;
        let size = cells::data_cell_count(&variable.lines, 0);
        let before = variable.lines.clone();
        if self.column >= size || cells::remove_cell(&mut variable.lines, 0, self.column).is_none() {
            return Err(CommandError::out_of_range("variable cell", self.column, size));
        }
        cells::trim_trailing_empty(&mut variable.lines, 0, 1);
        variable.retype();
        self.before = Some(before);
        Ok(vec![ModelEvent::new(ModelEventKind::CellRemoved, self.id)])
    }
}

impl EditorCommand for DeleteVariableCell {
    fn name(&self) -> &'static str {
        "delete-variable-cell"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.before {
            Some(lines) => vec![Box::new(RestoreVariable::new(self.id, lines.clone()))],
            None => Vec::new(),
        }
    }
}

/// Swap the variable at `index` with its neighbor
#[derive(Debug, Clone)]
pub struct MoveVariable {
    index: usize,
    direction: Direction,
    moved: bool,
}

impl MoveVariable {
    pub fn new(index: usize, direction: Direction) -> Self {
        Self {
            index,
            direction,
            moved: false,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        self.moved = false;
        let table = model.variable_table_mut();
        let id = table.get(self.index).map(Variable::id);
        let moved = match self.direction {
            Direction::Up => table.move_up(self.index),
            Direction::Down => table.move_down(self.index),
        };
        let (true, Some(id)) = (moved, id) else {
            return Err(CommandError::InvalidMove {
                what: "variable",
                index: self.index,
                direction: self.direction.as_str(),
            });
        };
        self.moved = true;
        Ok(vec![ModelEvent::new(ModelEventKind::VariableMoved, id)])
    }
}

impl EditorCommand for MoveVariable {
    fn name(&self) -> &'static str {
        "move-variable"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        if !self.moved {
            return Vec::new();
        }
        vec![Box::new(MoveVariable::new(
            self.direction.target(self.index),
            self.direction.reverse(),
        ))]
    }
}

/// Put saved lines back into a variable
#[derive(Debug, Clone)]
pub struct RestoreVariable {
    id: ElementId,
    lines: Vec<RobotLine>,
    replaced: Option<Vec<RobotLine>>,
}

impl RestoreVariable {
    pub fn new(id: ElementId, lines: Vec<RobotLine>) -> Self {
        Self {
            id,
            lines,
            replaced: None,
        }
    }

    fn apply(&mut self, model: &mut FileModel) -> Result<Vec<ModelEvent>, CommandError> {
        let variable = variable_mut(model, self.id)?;
        let replaced = std::mem::replace(&mut variable.lines, self.lines.clone());
        variable.retype();
        self.replaced = Some(replaced);
        Ok(vec![ModelEvent::new(ModelEventKind::VariableValueChanged, self.id)])
    }
}

impl EditorCommand for RestoreVariable {
    fn name(&self) -> &'static str {
        "restore-variable"
    }

    fn execute(&mut self, model: &mut FileModel) -> CommandResult {
        CommandResult::from_events(self.apply(model))
    }

    fn undo_commands(&self) -> Vec<Box<dyn EditorCommand>> {
        match &self.replaced {
            Some(lines) => vec![Box::new(RestoreVariable::new(self.id, lines.clone()))],
            None => Vec::new(),
        }
    }
}
