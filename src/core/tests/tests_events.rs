use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::base::ElementId;
use crate::core::{EventBus, EventEmitter, ModelEvent, ModelEventKind, OperationResult};

#[derive(Default)]
struct Recorder {
    emitter: EventEmitter<ModelEvent, Vec<ModelEventKind>>,
    seen: Vec<ModelEventKind>,
}

impl EventBus<ModelEvent> for Recorder {
    fn publish(&mut self, event: &ModelEvent) {
        let emitter = std::mem::take(&mut self.emitter);
        self.emitter = emitter.emit(event.clone(), &mut self.seen);
    }
}

#[test]
fn test_emitter_delivers_to_all_listeners() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut recorder = Recorder::default();
    recorder
        .emitter
        .subscribe(|event: &ModelEvent, seen: &mut Vec<ModelEventKind>| seen.push(event.kind));
    let counter = Arc::clone(&calls);
    recorder.emitter.subscribe(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    recorder.publish(&ModelEvent::new(ModelEventKind::RowsInserted, ElementId::new()));

    assert_eq!(recorder.seen, vec![ModelEventKind::RowsInserted]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.emitter.listener_count(), 2);
}

#[test]
fn test_failed_operation_publishes_nothing() {
    let mut recorder = Recorder::default();
    recorder
        .emitter
        .subscribe(|event: &ModelEvent, seen: &mut Vec<ModelEventKind>| seen.push(event.kind));

    let result = OperationResult::<(), String, ModelEvent>::failure("boom".to_string())
        .publish(&mut recorder);

    assert!(result.is_err());
    assert!(recorder.seen.is_empty());
}

#[test]
fn test_successful_operation_publishes_in_order() {
    let mut recorder = Recorder::default();
    recorder
        .emitter
        .subscribe(|event: &ModelEvent, seen: &mut Vec<ModelEventKind>| seen.push(event.kind));
    let id = ElementId::new();

    let events = vec![
        ModelEvent::new(ModelEventKind::CellInserted, id),
        ModelEvent::new(ModelEventKind::CommentChanged, id),
    ];
    OperationResult::<(), String, ModelEvent>::success((), events)
        .publish(&mut recorder)
        .unwrap();

    assert_eq!(
        recorder.seen,
        vec![ModelEventKind::CellInserted, ModelEventKind::CommentChanged]
    );
}
