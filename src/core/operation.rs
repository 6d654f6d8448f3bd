/// Something events can be published to
pub trait EventBus<E> {
    fn publish(&mut self, event: &E);
}

/// Outcome of a model operation together with the events it produced
#[derive(Debug)]
pub struct OperationResult<T, Err, E> {
    pub result: Result<T, Err>,
    pub events: Vec<E>,
}

impl<T, Err, E> OperationResult<T, Err, E> {
    pub fn success(value: T, events: Vec<E>) -> Self {
        Self {
            result: Ok(value),
            events,
        }
    }

    pub fn failure(error: Err) -> Self {
        Self {
            result: Err(error),
            events: Vec::new(),
        }
    }

    /// Publish the collected events (only on success) and hand back the result
    pub fn publish<B: EventBus<E>>(self, bus: &mut B) -> Result<T, Err> {
        if self.result.is_ok() {
            for event in &self.events {
                bus.publish(event);
            }
        }
        self.result
    }
}

impl<Err, E> OperationResult<(), Err, E> {
    /// Result of an operation whose only output is its events
    pub fn from_events(result: Result<Vec<E>, Err>) -> Self {
        match result {
            Ok(events) => Self::success((), events),
            Err(error) => Self::failure(error),
        }
    }
}
