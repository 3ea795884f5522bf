use crate::application::machine::EntryCommand;
use crate::error::{CardEntryError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EntryAction {
    Number,
    Expiration,
    Cvv,
    Back,
    Reenter,
    Lock,
    Focus,
}

impl EntryAction {
    fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Expiration => "expiration",
            Self::Cvv => "cvv",
            Self::Back => "back",
            Self::Reenter => "reenter",
            Self::Lock => "lock",
            Self::Focus => "focus",
        }
    }
}

/// One row of an entry script: an action and the field text it carries.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EntryRecord {
    pub action: EntryAction,
    pub value: Option<String>,
}

impl EntryRecord {
    fn required_value(self) -> Result<String> {
        let action = self.action;
        self.value.ok_or_else(|| CardEntryError::MissingValue {
            action: action.name().to_string(),
        })
    }
}

impl TryFrom<EntryRecord> for EntryCommand {
    type Error = CardEntryError;

    fn try_from(record: EntryRecord) -> Result<Self> {
        Ok(match record.action {
            // An empty text field is a legitimate edit (everything deleted).
            EntryAction::Number => Self::EditCardNumber(record.value.unwrap_or_default()),
            EntryAction::Expiration => Self::EditExpiration(record.value.unwrap_or_default()),
            EntryAction::Cvv => Self::EditCvv(record.value.unwrap_or_default()),
            EntryAction::Back => Self::BackFromCvv,
            EntryAction::Reenter => Self::ReEnter,
            EntryAction::Lock => Self::LockCardNumber,
            EntryAction::Focus => Self::Focus(record.required_value()?.parse()?),
        })
    }
}

/// Reads entry scripts from a CSV source.
///
/// The header is `action,value`. Whitespace around fields is trimmed and
/// rows without a value column are accepted.
pub struct EntryReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EntryReader<R> {
    /// Creates a new `EntryReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows.
    pub fn records(self) -> impl Iterator<Item = Result<EntryRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CardEntryError::from))
    }

    /// Like [`EntryReader::records`], converted into machine commands.
    pub fn commands(self) -> impl Iterator<Item = Result<EntryCommand>> {
        self.records()
            .map(|record| record.and_then(EntryCommand::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::Field;

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, value\nnumber, 4111 1111 1111 1111\nexpiration, 12/25\nback,\nfocus, cvv";
        let reader = EntryReader::new(data.as_bytes());
        let results: Vec<Result<EntryCommand>> = reader.commands().collect();

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &EntryCommand::EditCardNumber("4111 1111 1111 1111".to_string())
        );
        assert_eq!(
            results[1].as_ref().unwrap(),
            &EntryCommand::EditExpiration("12/25".to_string())
        );
        assert_eq!(results[2].as_ref().unwrap(), &EntryCommand::BackFromCvv);
        assert_eq!(results[3].as_ref().unwrap(), &EntryCommand::Focus(Field::Cvv));
    }

    #[test]
    fn test_reader_row_without_value_column() {
        let data = "action, value\nlock\ncvv,";
        let reader = EntryReader::new(data.as_bytes());
        let results: Vec<Result<EntryCommand>> = reader.commands().collect();

        assert_eq!(results[0].as_ref().unwrap(), &EntryCommand::LockCardNumber);
        assert_eq!(
            results[1].as_ref().unwrap(),
            &EntryCommand::EditCvv(String::new())
        );
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "action, value\nswipe, 4111";
        let reader = EntryReader::new(data.as_bytes());
        let results: Vec<Result<EntryRecord>> = reader.records().collect();

        assert!(matches!(results[0], Err(CardEntryError::Csv(_))));
    }

    #[test]
    fn test_focus_requires_known_field() {
        let data = "action, value\nfocus,\nfocus, zip";
        let reader = EntryReader::new(data.as_bytes());
        let results: Vec<Result<EntryCommand>> = reader.commands().collect();

        assert!(matches!(results[0], Err(CardEntryError::MissingValue { .. })));
        assert!(matches!(results[1], Err(CardEntryError::UnknownField(_))));
    }
}
