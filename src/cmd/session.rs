//! Undo and redo over one file model.

use crate::core::{CommandError, EventBus, EventEmitter, ModelEvent};
use crate::model::FileModel;

use super::EditorCommand;

type Commands = Vec<Box<dyn EditorCommand>>;

/// One file model together with its edit history.
///
/// Every executed command pushes its undo commands; undoing runs them and
/// pushes what reverts the undo onto the redo stack. A new edit clears the
/// redo stack. Token positions are refreshed after every command.
pub struct EditorSession {
    model: FileModel,
    undo: Vec<Commands>,
    redo: Vec<Commands>,
    pub events: EventEmitter<ModelEvent, FileModel>,
}

impl EditorSession {
    pub fn new(model: FileModel) -> Self {
        Self {
            model,
            undo: Vec::new(),
            redo: Vec::new(),
            events: EventEmitter::new(),
        }
    }

    pub fn model(&self) -> &FileModel {
        &self.model
    }

    pub fn into_model(self) -> FileModel {
        self.model
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Execute `command` and record how to undo it
    pub fn execute(&mut self, mut command: impl EditorCommand) -> Result<(), CommandError> {
        let undo = self.run(&mut command)?;
        if !undo.is_empty() {
            self.undo.push(undo);
            self.redo.clear();
        }
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), CommandError> {
        let commands = self.undo.pop().ok_or(CommandError::EmptyHistory("undo"))?;
        let redo = self.run_all(commands)?;
        self.redo.push(redo);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), CommandError> {
        let commands = self.redo.pop().ok_or(CommandError::EmptyHistory("redo"))?;
        let undo = self.run_all(commands)?;
        self.undo.push(undo);
        Ok(())
    }

    /// Run `commands` in order, returning the commands reverting all of them
    fn run_all(&mut self, commands: Commands) -> Result<Commands, CommandError> {
        let mut inverse = Vec::new();
        for mut command in commands {
            let mut undo = self.run(command.as_mut())?;
            undo.append(&mut inverse);
            inverse = undo;
        }
        Ok(inverse)
    }

    fn run(&mut self, command: &mut dyn EditorCommand) -> Result<Commands, CommandError> {
        tracing::trace!(command = command.name(), "execute");
        let outcome = command.execute(&mut self.model);
        let undo = match &outcome.result {
            Ok(()) => command.undo_commands(),
            Err(_) => Vec::new(),
        };
        outcome.publish(self)?;
        self.model.refresh_positions();
        Ok(undo)
    }
}

impl EventBus<ModelEvent> for EditorSession {
    fn publish(&mut self, event: &ModelEvent) {
        let emitter = std::mem::take(&mut self.events);
        self.events = emitter.emit(event.clone(), &mut self.model);
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .field("events", &self.events)
            .finish()
    }
}
