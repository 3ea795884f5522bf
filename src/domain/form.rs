use super::card::{CardNumber, CardType};
use crate::error::CardEntryError;
use std::fmt;
use std::str::FromStr;

/// Exact length of a complete expiration field (`MM/YY`).
pub const EXPIRATION_LENGTH: usize = 5;

/// The input fields of the card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field {
    #[default]
    CardNumber,
    Expiration,
    Cvv,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardNumber => f.write_str("card number"),
            Self::Expiration => f.write_str("expiration"),
            Self::Cvv => f.write_str("cvv"),
        }
    }
}

impl FromStr for Field {
    type Err = CardEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "card_number" => Ok(Self::CardNumber),
            "expiration" => Ok(Self::Expiration),
            "cvv" => Ok(Self::Cvv),
            other => Err(CardEntryError::UnknownField(other.to_string())),
        }
    }
}

/// Values of the three fields plus the focused one.
///
/// Lives as long as the form is on screen. Length limits on the expiration
/// and CVV fields are applied on every write, and the CVV limit always
/// follows the current card type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    number: CardNumber,
    expiration: String,
    cvv: String,
    pub focus: Field,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    pub fn card_type(&self) -> CardType {
        self.number.card_type()
    }

    /// Replaces the card number and re-gates the CVV to the new type.
    ///
    /// Returns `true` when the CVV had to be shortened.
    pub fn set_card_number(&mut self, text: &str) -> bool {
        self.number = CardNumber::parse(text);
        let max = self.card_type().cvv_length();
        if self.cvv.len() > max {
            self.cvv.truncate(max);
            true
        } else {
            false
        }
    }

    pub fn set_expiration(&mut self, text: &str) {
        self.expiration = text.chars().take(EXPIRATION_LENGTH).collect();
    }

    pub fn set_cvv(&mut self, text: &str) {
        self.cvv = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.card_type().cvv_length())
            .collect();
    }

    /// Only the length is checked; `expiration_parts` parses the date.
    pub fn is_expiration_complete(&self) -> bool {
        self.expiration.chars().count() == EXPIRATION_LENGTH
    }

    pub fn is_cvv_complete(&self) -> bool {
        self.cvv.len() == self.card_type().cvv_length()
    }

    /// Month and two-digit year when the expiration reads `MM/YY` with a real month.
    pub fn expiration_parts(&self) -> Option<(u8, u8)> {
        let (month, year) = self.expiration.split_once('/')?;
        if month.len() != 2 || year.len() != 2 {
            return None;
        }
        let month: u8 = month.parse().ok()?;
        let year: u8 = year.parse().ok()?;
        (1..=12).contains(&month).then_some((month, year))
    }

    /// Every field is filled in and the card number checks out.
    pub fn is_valid(&self) -> bool {
        self.is_expiration_complete() && self.is_cvv_complete() && self.number.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(number: &str, expiration: &str, cvv: &str) -> FormState {
        let mut form = FormState::new();
        form.set_card_number(number);
        form.set_expiration(expiration);
        form.set_cvv(cvv);
        form
    }

    #[test]
    fn test_valid_form() {
        assert!(filled("4111 1111 1111 1111", "12/25", "123").is_valid());
        assert!(filled("3782 822463 10005", "01/30", "1234").is_valid());
    }

    #[test]
    fn test_form_invalid_when_any_field_falls_short() {
        assert!(!filled("4111 1111 1111 1112", "12/25", "123").is_valid());
        assert!(!filled("4111 1111 1111 111", "12/25", "123").is_valid());
        assert!(!filled("4111 1111 1111 1111", "12/2", "123").is_valid());
        assert!(!filled("4111 1111 1111 1111", "12/25", "12").is_valid());
        assert!(!filled("3782 822463 10005", "12/25", "123").is_valid());
    }

    #[test]
    fn test_cvv_regated_when_type_changes() {
        let mut form = filled("3782 822463 10005", "12/25", "1234");
        assert_eq!(form.cvv(), "1234");

        let cut = form.set_card_number("4111 1111 1111 1111");
        assert!(cut);
        assert_eq!(form.cvv(), "123");
        assert!(form.is_valid());

        assert!(!form.set_card_number("4111 1111 1111 1111"));
    }

    #[test]
    fn test_cvv_keeps_digits_up_to_type_length() {
        let mut form = FormState::new();
        form.set_card_number("4111");
        form.set_cvv("1a2b34");
        assert_eq!(form.cvv(), "123");

        form.set_card_number("37");
        form.set_cvv("12345");
        assert_eq!(form.cvv(), "1234");
    }

    #[test]
    fn test_expiration_capped_at_five_chars() {
        let mut form = FormState::new();
        form.set_expiration("12/2025");
        assert_eq!(form.expiration(), "12/20");
        assert!(form.is_expiration_complete());
    }

    #[test]
    fn test_expiration_parts() {
        assert_eq!(filled("", "07/29", "").expiration_parts(), Some((7, 29)));
        assert_eq!(filled("", "13/29", "").expiration_parts(), None);
        assert_eq!(filled("", "0729", "").expiration_parts(), None);
        assert_eq!(filled("", "ab/cd", "").expiration_parts(), None);
    }

    #[test]
    fn test_expiration_completeness_ignores_date() {
        let form = filled("", "13/29", "");
        assert!(form.is_expiration_complete());
        assert_eq!(form.expiration_parts(), None);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("number".parse::<Field>().unwrap(), Field::CardNumber);
        assert_eq!(" CVV ".parse::<Field>().unwrap(), Field::Cvv);
        assert!(matches!(
            "zip".parse::<Field>(),
            Err(CardEntryError::UnknownField(_))
        ));
    }
}
