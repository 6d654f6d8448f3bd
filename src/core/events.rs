//! Change notifications emitted by editor commands.
//!
//! Commands never talk to observers directly. They return [`ModelEvent`]s
//! describing what changed and the owner of an [`EventEmitter`] decides
//! who hears about them.

use crate::base::ElementId;

/// What kind of change happened to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEventKind {
    CellValueChanged,
    CellInserted,
    CellRemoved,
    CommentChanged,
    /// A keyword call or setting declaration was renamed
    CallNameChanged,
    /// A row changed between executable call and local setting
    RowConverted,
    RowsInserted,
    RowsRemoved,
    RowMoved,
    HolderNameChanged,
    HoldersInserted,
    HoldersRemoved,
    HolderMoved,
    SettingInserted,
    SettingRemoved,
    SettingMoved,
    VariableNameChanged,
    VariableValueChanged,
    VariablesInserted,
    VariablesRemoved,
    VariableMoved,
}

/// A single change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub kind: ModelEventKind,
    /// Element affected by the change
    pub element: ElementId,
    /// Parent of the affected element, when it has one
    pub parent: Option<ElementId>,
}

impl ModelEvent {
    pub fn new(kind: ModelEventKind, element: ElementId) -> Self {
        Self {
            kind,
            element,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }
}

type Listener<E, C> = Box<dyn Fn(&E, &mut C) + Send + Sync>;

/// Listener registry for events of type `E` delivered with a context `C`
pub struct EventEmitter<E, C> {
    listeners: Vec<Listener<E, C>>,
}

impl<E, C> EventEmitter<E, C> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&E, &mut C) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver `event` to every listener in subscription order.
    ///
    /// Consumes and returns the emitter so the owner can lend itself out as
    /// the context while the emitter is detached.
    pub fn emit(self, event: E, context: &mut C) -> Self {
        for listener in &self.listeners {
            listener(&event, context);
        }
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E, C> Default for EventEmitter<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> std::fmt::Debug for EventEmitter<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
