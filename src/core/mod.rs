//! Cross-cutting infrastructure: model events, operation results, errors
//! and text helpers.

pub mod error;
pub mod events;
pub mod operation;
pub mod text_utils;

pub use error::{ArgumentsDescriptorError, CommandError, LoadError};
pub use events::{EventEmitter, ModelEvent, ModelEventKind};
pub use operation::{EventBus, OperationResult};

#[cfg(test)]
mod tests;
