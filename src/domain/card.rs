use serde::Serialize;
use std::fmt;

/// Formatted length of a complete American Express number (15 digits, 2 separators).
pub const AMEX_FORMATTED_LENGTH: usize = 17;
/// Formatted length of a complete number for every other card type (16 digits, 3 separators).
pub const NON_AMEX_FORMATTED_LENGTH: usize = 19;

const AMEX_GROUPS: &[usize] = &[4, 6, 5];
const DEFAULT_GROUPS: &[usize] = &[4, 4, 4, 4];

/// Card network, inferred from the leading digits of the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Visa,
    MasterCard,
    AmericanExpress,
    Discover,
    #[default]
    Unknown,
}

impl CardType {
    /// Detects the card type from a digit string.
    ///
    /// Only the prefix is inspected; length is not considered, so a partially
    /// typed number is classified as soon as its prefix is unambiguous.
    pub fn detect(digits: &str) -> Self {
        if digits.starts_with('4') {
            return Self::Visa;
        }
        if digits.starts_with("34") || digits.starts_with("37") {
            return Self::AmericanExpress;
        }
        if prefix_in(digits, 2, 51..=55) || prefix_in(digits, 4, 2221..=2720) {
            return Self::MasterCard;
        }
        if digits.starts_with("6011")
            || digits.starts_with("65")
            || prefix_in(digits, 3, 644..=649)
            || prefix_in(digits, 6, 622126..=622925)
        {
            return Self::Discover;
        }
        Self::Unknown
    }

    /// Maximum number of digits in a card number of this type.
    pub fn max_digits(self) -> usize {
        match self {
            Self::AmericanExpress => 15,
            _ => 16,
        }
    }

    /// Number of digits in the card verification value.
    pub fn cvv_length(self) -> usize {
        match self {
            Self::AmericanExpress => 4,
            _ => 3,
        }
    }

    /// Length of a complete number once grouped for display.
    pub fn formatted_length(self) -> usize {
        match self {
            Self::AmericanExpress => AMEX_FORMATTED_LENGTH,
            _ => NON_AMEX_FORMATTED_LENGTH,
        }
    }

    fn groups(self) -> &'static [usize] {
        match self {
            Self::AmericanExpress => AMEX_GROUPS,
            _ => DEFAULT_GROUPS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::MasterCard => "master_card",
            Self::AmericanExpress => "american_express",
            Self::Discover => "discover",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn prefix_in(digits: &str, len: usize, range: std::ops::RangeInclusive<u32>) -> bool {
    digits
        .get(..len)
        .and_then(|prefix| prefix.parse::<u32>().ok())
        .is_some_and(|value| range.contains(&value))
}

/// Validates a number with the Luhn checksum.
///
/// Non-digit characters are ignored. Input without any digit fails.
pub fn luhn(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// The content of the card-number field.
///
/// Recomputed from the field text on every keystroke: separators are
/// stripped, the type is detected from the prefix and digits past the
/// type-specific maximum are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardNumber {
    digits: String,
    card_type: CardType,
}

impl CardNumber {
    pub fn parse(input: &str) -> Self {
        let mut digits: String = input.chars().filter(char::is_ascii_digit).collect();
        let card_type = CardType::detect(&digits);
        digits.truncate(card_type.max_digits());
        Self { digits, card_type }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// True once the digit count reaches the maximum for the detected type.
    pub fn is_complete(&self) -> bool {
        self.digits.len() == self.card_type.max_digits()
    }

    pub fn passes_luhn(&self) -> bool {
        luhn(&self.digits)
    }

    /// A complete number with a valid checksum.
    pub fn is_valid(&self) -> bool {
        self.is_complete() && self.passes_luhn()
    }

    /// Digits grouped the way the number field displays them.
    pub fn formatted(&self) -> String {
        let mut out = String::with_capacity(self.card_type.formatted_length());
        let mut rest = self.digits.as_str();
        for &group in self.card_type.groups() {
            if rest.is_empty() {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            let (head, tail) = rest.split_at(group.min(rest.len()));
            out.push_str(head);
            rest = tail;
        }
        out
    }

    /// Trailing four digits, shown in the overlay of a locked number field.
    pub fn last_four(&self) -> Option<&str> {
        self.digits.len().checked_sub(4).map(|start| &self.digits[start..])
    }
}
