//! Domain layer: card numbers, the form, entry events and the listener port.
//!
//! Nothing here knows about CSV, terminals or the binary.

pub mod card;
pub mod event;
pub mod form;
pub mod ports;
