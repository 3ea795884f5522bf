pub mod entry_reader;
pub mod event_writer;
