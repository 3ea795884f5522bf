use crate::error::Result;
use crate::interfaces::event_record::{EventRecord, EventRecordWriter};
use std::io::Write;

/// Writes event records as CSV with a `step,event,card_type,state` header.
pub struct CsvEventWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvEventWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> EventRecordWriter for CsvEventWriter<W> {
    fn write_record(&mut self, record: &EventRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::machine::EntryState;
    use crate::domain::card::CardType;
    use crate::domain::event::EntryEvent;

    #[test]
    fn test_writes_header_and_rows() {
        let mut writer = CsvEventWriter::new(Vec::new());
        writer
            .write_record(&EventRecord::new(
                1,
                EntryEvent::Edit {
                    card_type: CardType::Visa,
                },
                CardType::Visa,
                EntryState::EnteringNumber,
            ))
            .unwrap();
        writer
            .write_record(&EventRecord::new(
                1,
                EntryEvent::FormInvalidated,
                CardType::Visa,
                EntryState::EnteringNumber,
            ))
            .unwrap();

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "step,event,card_type,state\n\
             1,edit,visa,entering_number\n\
             1,form_invalidated,visa,entering_number\n"
        );
    }
}
