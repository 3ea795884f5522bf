use crate::domain::event::EntryEvent;
use crate::domain::ports::EntryListener;

/// A listener that records every event in memory.
///
/// Used by the replay binary, which drains it after each step, and by tests
/// that assert on the exact event sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<EntryEvent>,
}

impl EventLog {
    /// Creates a new, empty event log.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EntryEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recorded events equal to `event`.
    pub fn count(&self, event: EntryEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    /// Takes all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<EntryEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EntryListener for EventLog {
    fn on_event(&mut self, event: EntryEvent) {
        self.events.push(event);
    }
}
