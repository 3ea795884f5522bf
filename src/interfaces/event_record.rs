use crate::application::machine::EntryState;
use crate::domain::card::CardType;
use crate::domain::event::EntryEvent;
use crate::error::Result;
use serde::Serialize;

/// One emitted event as written by the replay binary.
///
/// `state` and `card_type` are the machine's values after the step that
/// produced the event.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct EventRecord {
    pub step: usize,
    pub event: &'static str,
    pub card_type: CardType,
    pub state: EntryState,
}

impl EventRecord {
    pub fn new(step: usize, event: EntryEvent, card_type: CardType, state: EntryState) -> Self {
        Self {
            step,
            event: event.name(),
            card_type,
            state,
        }
    }
}

/// Output port for event records.
pub trait EventRecordWriter {
    fn write_record(&mut self, record: &EventRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub type EventRecordWriterBox<'a> = Box<dyn EventRecordWriter + 'a>;
