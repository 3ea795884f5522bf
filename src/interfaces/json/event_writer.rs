use crate::error::Result;
use crate::interfaces::event_record::{EventRecord, EventRecordWriter};
use std::io::Write;

/// Writes event records as JSON lines, one object per event.
pub struct JsonEventWriter<W: Write> {
    sink: W,
}

impl<W: Write> JsonEventWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> EventRecordWriter for JsonEventWriter<W> {
    fn write_record(&mut self, record: &EventRecord) -> Result<()> {
        serde_json::to_writer(&mut self.sink, record)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}
