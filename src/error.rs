use crate::application::machine::EntryState;
use crate::domain::form::Field;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CardEntryError>;

#[derive(Error, Debug)]
pub enum CardEntryError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} field is hidden while the card number is being entered")]
    FieldHidden { field: Field },
    #[error("{request} request not accepted in state {state}")]
    UnexpectedRequest {
        request: &'static str,
        state: EntryState,
    },
    #[error("action '{action}' requires a value")]
    MissingValue { action: String },
    #[error("unknown field '{0}'")]
    UnknownField(String),
}
