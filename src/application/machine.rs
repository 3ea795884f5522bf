use crate::domain::card::CardType;
use crate::domain::event::EntryEvent;
use crate::domain::form::{Field, FormState};
use crate::domain::ports::EntryListener;
use crate::error::{CardEntryError, Result};
use crate::infrastructure::in_memory::EventLog;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Progress of a card entry session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    #[default]
    EnteringNumber,
    EnteringExpiration,
    EnteringCvv,
    Complete,
    /// A completed form that a later edit broke.
    Invalid,
}

impl EntryState {
    /// The number field is hidden behind its overlay in every state but
    /// `EnteringNumber`.
    pub fn is_number_locked(self) -> bool {
        self != Self::EnteringNumber
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::EnteringNumber => "entering_number",
            Self::EnteringExpiration => "entering_expiration",
            Self::EnteringCvv => "entering_cvv",
            Self::Complete => "complete",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side of the card icon the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

/// A single host input, as replayed from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCommand {
    EditCardNumber(String),
    EditExpiration(String),
    EditCvv(String),
    BackFromCvv,
    ReEnter,
    LockCardNumber,
    Focus(Field),
}

/// The card entry state machine.
///
/// Consumes text changes and requests from the host, keeps the
/// [`FormState`], and reports every transition to its [`EntryListener`].
/// All work happens synchronously inside the calling method.
#[derive(Debug)]
pub struct CardEntryMachine<L: EntryListener = EventLog> {
    state: EntryState,
    form: FormState,
    number_marked_invalid: bool,
    listener: L,
}

impl Default for CardEntryMachine {
    fn default() -> Self {
        Self::new(EventLog::new())
    }
}

impl<L: EntryListener> CardEntryMachine<L> {
    /// Creates a machine with an empty form, focused on the card number.
    pub fn new(listener: L) -> Self {
        Self {
            state: EntryState::EnteringNumber,
            form: FormState::new(),
            number_marked_invalid: false,
            listener,
        }
    }

    /// Handles a text change on the card-number field.
    ///
    /// Editing a locked number re-enters it first. Reaching the full length
    /// either locks the number (valid checksum) or marks it invalid.
    pub fn edit_card_number(&mut self, text: &str) {
        if self.state.is_number_locked() {
            self.reopen_number();
        }
        self.form.focus = Field::CardNumber;

        let previous_type = self.form.card_type();
        if self.form.set_card_number(text) {
            debug!(cvv_length = self.form.card_type().cvv_length(), "cvv shortened");
        }
        let card_type = self.form.card_type();
        if card_type != previous_type {
            debug!(from = %previous_type, to = %card_type, "card type changed");
        }
        self.emit(EntryEvent::Edit { card_type });

        if self.form.number().is_complete() {
            self.emit(EntryEvent::CardNumberInputComplete);
            if self.form.number().passes_luhn() {
                self.number_marked_invalid = false;
                self.form.focus = Field::Expiration;
                self.transition(EntryState::EnteringExpiration);
                self.settle_locked_form();
            } else {
                self.number_marked_invalid = true;
                self.emit(EntryEvent::InvalidCardNumber);
            }
        } else {
            self.number_marked_invalid = false;
        }

        self.emit_validity();
    }

    /// Handles a text change on the expiration field.
    pub fn edit_expiration(&mut self, text: &str) -> Result<()> {
        self.ensure_visible(Field::Expiration)?;
        self.form.focus = Field::Expiration;
        self.form.set_expiration(text);

        match self.state {
            _ if self.form.is_valid() => self.transition(EntryState::Complete),
            EntryState::EnteringExpiration if self.form.is_expiration_complete() => {
                self.form.focus = Field::Cvv;
                self.transition(EntryState::EnteringCvv);
                self.emit(EntryEvent::CvvEntry);
            }
            EntryState::Complete => self.transition(EntryState::Invalid),
            _ => {}
        }

        self.emit_validity();
        Ok(())
    }

    /// Handles a text change on the CVV field.
    pub fn edit_cvv(&mut self, text: &str) -> Result<()> {
        self.ensure_visible(Field::Cvv)?;
        self.form.focus = Field::Cvv;
        self.form.set_cvv(text);

        if self.form.is_cvv_complete() {
            self.emit(EntryEvent::CvvEntryComplete);
            if self.form.is_valid() {
                self.transition(EntryState::Complete);
            } else if self.state == EntryState::Complete {
                self.transition(EntryState::Invalid);
            }
        } else if self.state == EntryState::Complete {
            self.transition(EntryState::Invalid);
        }

        self.emit_validity();
        Ok(())
    }

    /// Explicit request to go back to the number field.
    ///
    /// Does nothing while the number is already being entered.
    pub fn re_enter(&mut self) {
        if self.state.is_number_locked() {
            self.reopen_number();
        }
    }

    /// Explicit request to step back from the CVV to the expiration field.
    pub fn back_from_cvv(&mut self) -> Result<()> {
        if self.state != EntryState::EnteringCvv {
            return Err(self.unexpected("back"));
        }
        self.form.focus = Field::Expiration;
        self.transition(EntryState::EnteringExpiration);
        self.emit(EntryEvent::BackFromCvv);
        Ok(())
    }

    /// Locks the number field without validating it.
    ///
    /// For hosts that pre-fill a number they already trust.
    pub fn lock_card_number(&mut self) -> Result<()> {
        if self.state.is_number_locked() {
            return Err(self.unexpected("lock"));
        }
        self.number_marked_invalid = false;
        self.form.focus = Field::Expiration;
        self.transition(EntryState::EnteringExpiration);
        self.settle_locked_form();
        Ok(())
    }

    /// Moves focus as requested by the host.
    ///
    /// Focusing a locked number field is a re-entry.
    pub fn request_focus(&mut self, field: Field) -> Result<()> {
        match field {
            Field::CardNumber => self.re_enter(),
            Field::Expiration | Field::Cvv => self.ensure_visible(field)?,
        }
        self.form.focus = field;
        Ok(())
    }

    /// Dispatches a replayed command to the matching operation.
    pub fn apply(&mut self, command: EntryCommand) -> Result<()> {
        match command {
            EntryCommand::EditCardNumber(text) => {
                self.edit_card_number(&text);
                Ok(())
            }
            EntryCommand::EditExpiration(text) => self.edit_expiration(&text),
            EntryCommand::EditCvv(text) => self.edit_cvv(&text),
            EntryCommand::BackFromCvv => self.back_from_cvv(),
            EntryCommand::ReEnter => {
                self.re_enter();
                Ok(())
            }
            EntryCommand::LockCardNumber => self.lock_card_number(),
            EntryCommand::Focus(field) => self.request_focus(field),
        }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn card_type(&self) -> CardType {
        self.form.card_type()
    }

    pub fn is_fields_valid(&self) -> bool {
        self.form.is_valid()
    }

    /// True while a complete number that failed the checksum is on screen.
    pub fn is_card_number_marked_invalid(&self) -> bool {
        self.number_marked_invalid
    }

    /// The icon shows its back while the CVV is being typed.
    pub fn card_face(&self) -> CardFace {
        if self.form.focus == Field::Cvv && self.state != EntryState::Complete {
            CardFace::Back
        } else {
            CardFace::Front
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn reopen_number(&mut self) {
        self.form.focus = Field::CardNumber;
        self.transition(EntryState::EnteringNumber);
        self.emit(EntryEvent::CardNumberInputReEntry);
    }

    /// A locked number with every field filled in is a complete form.
    fn settle_locked_form(&mut self) {
        if self.state.is_number_locked() && self.form.is_valid() {
            self.transition(EntryState::Complete);
        }
    }

    fn ensure_visible(&self, field: Field) -> Result<()> {
        if self.state.is_number_locked() {
            Ok(())
        } else {
            Err(CardEntryError::FieldHidden { field })
        }
    }

    fn unexpected(&self, request: &'static str) -> CardEntryError {
        CardEntryError::UnexpectedRequest {
            request,
            state: self.state,
        }
    }

    fn transition(&mut self, next: EntryState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "entry state changed");
            self.state = next;
        }
    }

    fn emit_validity(&mut self) {
        if self.form.is_valid() {
            self.emit(EntryEvent::ValidFormComplete);
        } else {
            self.emit(EntryEvent::FormInvalidated);
        }
    }

    fn emit(&mut self, event: EntryEvent) {
        trace!(event = event.name(), state = %self.state, "emit");
        self.listener.on_event(event);
    }
}
