//! Notifications the entry machine sends to the host UI.

use super::card::CardType;

/// An event emitted by [`crate::application::machine::CardEntryMachine`].
///
/// Field-level events come first for a given edit; every edit ends with
/// exactly one of [`EntryEvent::ValidFormComplete`] or
/// [`EntryEvent::FormInvalidated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEvent {
    /// The number field reached the length of its card type.
    CardNumberInputComplete,
    /// The number field changed. Carries the type to show on the icon.
    Edit { card_type: CardType },
    /// The user went back to a locked number field.
    CardNumberInputReEntry,
    /// A complete number failed the checksum.
    InvalidCardNumber,
    /// Expiration is done, the CVV field takes over.
    CvvEntry,
    /// The CVV field holds as many digits as the card type requires.
    CvvEntryComplete,
    /// The user stepped back from the CVV field to the expiration field.
    BackFromCvv,
    /// Every field is filled in and the number passes validation.
    ValidFormComplete,
    /// Some field is incomplete or the number fails validation.
    FormInvalidated,
}

impl EntryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CardNumberInputComplete => "card_number_input_complete",
            Self::Edit { .. } => "edit",
            Self::CardNumberInputReEntry => "card_number_input_re_entry",
            Self::InvalidCardNumber => "invalid_card_number",
            Self::CvvEntry => "cvv_entry",
            Self::CvvEntryComplete => "cvv_entry_complete",
            Self::BackFromCvv => "back_from_cvv",
            Self::ValidFormComplete => "valid_form_complete",
            Self::FormInvalidated => "form_invalidated",
        }
    }

    /// True for the form-level events that close every edit.
    pub fn is_validity(&self) -> bool {
        matches!(self, Self::ValidFormComplete | Self::FormInvalidated)
    }
}
