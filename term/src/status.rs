//! Input cleanup and a simple validity classifier for the demo form.
//!
//! This only checks shapes (digit counts, month range, non-empty name). It
//! does not run a Luhn check or detect the brand; the brand comes from
//! configuration.

use cardform::field::{FieldId, Status};

/// Digits in a card number
pub const NUMBER_LENGTH: usize = 16;
/// Digits in an American Express card number
pub const AMEX_NUMBER_LENGTH: usize = 15;
/// Digits in a CVC
pub const CVC_LENGTH: usize = 3;
/// Digits in an American Express CVC
pub const AMEX_CVC_LENGTH: usize = 4;
/// Digits in a postal code
pub const POSTAL_CODE_LENGTH: usize = 5;
/// Digits in an expiry date (MMYY)
pub const EXPIRY_LENGTH: usize = 4;

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Maximum digits accepted for a field, `None` for free text
pub fn max_digits(field: FieldId, is_amex: bool) -> Option<usize> {
    match field {
        FieldId::Number if is_amex => Some(AMEX_NUMBER_LENGTH),
        FieldId::Number => Some(NUMBER_LENGTH),
        FieldId::Expiry => Some(EXPIRY_LENGTH),
        FieldId::Cvc if is_amex => Some(AMEX_CVC_LENGTH),
        FieldId::Cvc => Some(CVC_LENGTH),
        FieldId::PostalCode => Some(POSTAL_CODE_LENGTH),
        FieldId::Name => None,
    }
}

/// Strips characters a field cannot hold, truncates to its length and
/// applies display formatting (number groups, `MM/YY`)
pub fn sanitize(field: FieldId, raw: &str, is_amex: bool) -> String {
    let Some(max) = max_digits(field, is_amex) else {
        return raw.trim_start().to_string();
    };

    let digits: String = digits(raw).chars().take(max).collect();

    match field {
        FieldId::Number => digits
            .chars()
            .enumerate()
            .fold(String::new(), |mut out, (i, c)| {
                if i > 0 && i % 4 == 0 {
                    out.push(' ');
                }
                out.push(c);
                out
            }),
        FieldId::Expiry if digits.len() > 2 => {
            format!("{}/{}", &digits[..2], &digits[2..])
        }
        _ => digits,
    }
}

/// Classifies a sanitized value
pub fn classify(field: FieldId, value: &str, is_amex: bool) -> Status {
    if field == FieldId::Name {
        return if value.trim().is_empty() {
            Status::Incomplete
        } else {
            Status::Valid
        };
    }

    let digits = digits(value);
    let max = max_digits(field, is_amex).unwrap_or_default();

    if field == FieldId::Expiry && digits.len() >= 2 {
        let month: u32 = digits[..2].parse().unwrap_or_default();
        if !(1..=12).contains(&month) {
            return Status::Invalid;
        }
    }

    if digits.len() < max {
        Status::Incomplete
    } else {
        Status::Valid
    }
}

#[cfg(test)]
#[path = "./status_tests.rs"]
mod tests;
