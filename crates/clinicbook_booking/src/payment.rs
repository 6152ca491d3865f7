// --- File: crates/clinicbook_booking/src/payment.rs ---
//! Card form handling for new patients. Nothing here is ever transmitted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
}

impl CardBrand {
    /// Digit group sizes used for display.
    pub fn groups(&self) -> &'static [usize] {
        match self {
            CardBrand::Visa | CardBrand::Mastercard => &[4, 4, 4, 4],
            CardBrand::Amex => &[4, 6, 5],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "Amex",
        }
    }
}

pub const DEFAULT_CARD_DIGITS: usize = 16;
pub const AMEX_CARD_DIGITS: usize = 15;
pub const CVV_MAX_LENGTH: usize = 4;
/// Years offered in the expiry selector, counting the current one.
pub const EXPIRY_YEARS: i32 = 12;

/// Maximum digits accepted for a (possibly unknown) brand.
pub fn max_card_digits(brand: Option<CardBrand>) -> usize {
    match brand {
        Some(CardBrand::Amex) => AMEX_CARD_DIGITS,
        _ => DEFAULT_CARD_DIGITS,
    }
}

struct CardRule {
    brand: CardBrand,
    prefixes: &'static [&'static str],
}

// first match wins
const CARD_RULES: &[CardRule] = &[
    CardRule {
        brand: CardBrand::Visa,
        prefixes: &["4"],
    },
    CardRule {
        brand: CardBrand::Mastercard,
        prefixes: &["51", "52", "53", "54", "55"],
    },
    CardRule {
        brand: CardBrand::Amex,
        prefixes: &["34", "37"],
    },
];

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Detects the brand from the leading digits. Non-digits are ignored.
pub fn detect_card_brand(number: &str) -> Option<CardBrand> {
    let digits = digits_only(number);
    CARD_RULES
        .iter()
        .find(|rule| rule.prefixes.iter().any(|p| digits.starts_with(p)))
        .map(|rule| rule.brand)
}

/// Groups the digits for display: by brand when known, otherwise runs of four.
/// Digits past the last group are left in a trailing group.
pub fn format_card_number(number: &str) -> String {
    let digits = digits_only(number);
    let groups: &[usize] = match detect_card_brand(&digits) {
        Some(brand) => brand.groups(),
        None => &[],
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut rest = digits.as_str();
    for size in groups {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at((*size).min(rest.len()));
        parts.push(head);
        rest = tail;
    }
    while !rest.is_empty() {
        let (head, tail) = rest.split_at(4.min(rest.len()));
        parts.push(head);
        rest = tail;
    }
    parts.join(" ")
}

/// `01` through `12`.
pub fn expiry_month_options() -> Vec<String> {
    (1..=12).map(|m| format!("{:02}", m)).collect()
}

pub fn expiry_year_options(current_year: i32) -> Vec<String> {
    (current_year..current_year + EXPIRY_YEARS)
        .map(|y| y.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    FirstName,
    LastName,
    Address,
    City,
    State,
    Zipcode,
    CardNumber,
    ExpMonth,
    ExpYear,
    Cvv,
}

/// The payment form as typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFormDraft {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// Digits only.
    pub card_number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvv: String,
}

impl PaymentFormDraft {
    /// Applies one keystroke's worth of input. Never rejects anything; card
    /// digits beyond the brand's length and CVV characters beyond four are
    /// dropped.
    pub fn set(&mut self, field: PaymentField, value: &str) {
        match field {
            PaymentField::FirstName => self.first_name = value.to_string(),
            PaymentField::LastName => self.last_name = value.to_string(),
            PaymentField::Address => self.address = value.to_string(),
            PaymentField::City => self.city = value.to_string(),
            PaymentField::State => self.state = value.to_string(),
            PaymentField::Zipcode => self.zipcode = value.to_string(),
            PaymentField::CardNumber => {
                let digits = digits_only(value);
                let max = max_card_digits(detect_card_brand(&digits));
                self.card_number = digits.chars().take(max).collect();
            }
            PaymentField::ExpMonth => self.exp_month = value.to_string(),
            PaymentField::ExpYear => self.exp_year = value.to_string(),
            PaymentField::Cvv => self.cvv = value.chars().take(CVV_MAX_LENGTH).collect(),
        }
    }

    pub fn card_brand(&self) -> Option<CardBrand> {
        detect_card_brand(&self.card_number)
    }

    pub fn formatted_card_number(&self) -> String {
        format_card_number(&self.card_number)
    }
}
