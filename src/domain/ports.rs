use super::event::EntryEvent;

/// Receives the events of a card entry session.
///
/// The host UI implements this to update the icon, colors and focus. Any
/// `FnMut(EntryEvent)` closure is a listener.
pub trait EntryListener {
    fn on_event(&mut self, event: EntryEvent);
}

impl<F> EntryListener for F
where
    F: FnMut(EntryEvent),
{
    fn on_event(&mut self, event: EntryEvent) {
        self(event)
    }
}
