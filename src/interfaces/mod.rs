//! Input and output adapters for the replay binary.

pub mod csv;
pub mod event_record;
pub mod json;
