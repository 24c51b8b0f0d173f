//! Field identity, validity status and the small enums a field carries into
//! rendering

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::CardFormError;

/// Identifies one of the five card form fields
///
/// Variants are declared in tab order, so the derived `Ord` and
/// [`FieldId::ordinal`] agree with the order focus moves through the form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    /// The card number
    Number,
    /// The expiry date (MM/YY)
    Expiry,
    /// The card verification code
    Cvc,
    /// The cardholder's name
    Name,
    /// The billing postal code
    PostalCode,
}

impl FieldId {
    /// Position of the field in tab order
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// All fields in tab order
    pub fn all() -> impl DoubleEndedIterator<Item = FieldId> {
        FieldId::iter()
    }

    /// Identifier used in maps, logs and configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Number => "number",
            FieldId::Expiry => "expiry",
            FieldId::Cvc => "cvc",
            FieldId::Name => "name",
            FieldId::PostalCode => "postalCode",
        }
    }

    /// Keyboard a host should present for this field
    pub fn keyboard(self) -> KeyboardType {
        match self {
            FieldId::Name => KeyboardType::Default,
            _ => KeyboardType::Numeric,
        }
    }
}

impl Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = CardFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::all()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CardFormError::UnknownField(s.to_string()))
    }
}

/// Validity classification of a field's current value
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The value is complete and valid
    Valid,
    /// The value can never become valid without deleting input
    Invalid,
    /// The value may still become valid
    #[default]
    Incomplete,
}

impl Status {
    /// Identifier used in logs and configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Valid => "valid",
            Status::Invalid => "invalid",
            Status::Incomplete => "incomplete",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = CardFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(Status::Valid),
            "invalid" => Ok(Status::Invalid),
            "incomplete" => Ok(Status::Incomplete),
            _ => Err(CardFormError::UnknownStatus(s.to_string())),
        }
    }
}

/// Keyboard layout requested from the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyboardType {
    /// Free text
    #[default]
    Default,
    /// Digits only
    Numeric,
}

/// Return key affordance shown while editing a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKey {
    /// Advance to the next field
    Next,
    /// Terminal submit on the last visible field
    Done,
}

/// Capitalization hint passed to the text widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoCapitalize {
    /// Leave input untouched
    None,
    /// Capitalize the first letter of every word
    #[default]
    Words,
}

/// Opaque handle naming a mounted host node (text widget or scroll
/// container)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

#[cfg(test)]
#[path = "./field_tests.rs"]
mod tests;
