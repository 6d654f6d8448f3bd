#![allow(clippy::unwrap_used)]

mod tests_session;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{ModelEvent, ModelEventKind};
use crate::fixers::run_fixers;
use crate::model::ModelBuilder;
use crate::parser::kinds::HolderKind;
use crate::parser::{FormatHint, tokenize};

use super::{EditorSession, HolderRef};

/// Session over a fully post-processed model of `text`
pub(super) fn session(text: &str) -> EditorSession {
    let tokenized = tokenize(text, FormatHint::Auto);
    let mut model = ModelBuilder::new(&tokenized, None).build(tokenized);
    run_fixers(&mut model);
    EditorSession::new(model)
}

pub(super) fn holder(session: &EditorSession, kind: HolderKind, index: usize) -> HolderRef {
    HolderRef::of(session.model().code_table(kind).get(index).unwrap())
}

/// Collect every event the session publishes from now on
pub(super) fn record(session: &mut EditorSession) -> Arc<Mutex<Vec<ModelEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session
        .events
        .subscribe(move |event: &ModelEvent, _| sink.lock().push(event.clone()));
    events
}

pub(super) fn kinds(events: &Arc<Mutex<Vec<ModelEvent>>>) -> Vec<ModelEventKind> {
    events.lock().iter().map(|event| event.kind).collect()
}
