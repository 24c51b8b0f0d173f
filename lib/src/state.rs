//! Form state consumed by the orchestrator
//!
//! [`FormState`] is owned by whatever container drives the form. The core
//! reads it on every render and never mutates it; changes travel back to the
//! owner through [`crate::events::FormEvents`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::field::{FieldId, Status};

/// Brand identifier reported for American Express cards
pub const AMERICAN_EXPRESS: &str = "american-express";

/// Snapshot of everything the owner knows about the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    /// Current (already formatted) value per field
    pub values: HashMap<FieldId, String>,
    /// Current validity per field
    pub status: HashMap<FieldId, Status>,
    /// Field that should hold input focus, if any
    pub focused: Option<FieldId>,
    /// Card brand derived from the number, e.g. `visa` or
    /// `american-express`
    pub brand: Option<String>,
    /// Whether the cardholder name field is rendered
    pub requires_name: bool,
    /// Whether the CVC field is rendered
    pub requires_cvc: bool,
    /// Whether the postal code field is rendered
    pub requires_postal_code: bool,
    /// Whether the CVC is masked while typing and on the card face
    pub hide_cvc: bool,
    /// Stack fields in rows instead of one horizontal strip
    pub vertical_fields: bool,
    /// Whether the user may scroll the field strip by hand
    pub allow_scroll: bool,
    /// Suppress the became-valid notification of the number field
    pub cancel_scroll_on_valid_number: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            status: HashMap::new(),
            focused: None,
            brand: None,
            requires_name: false,
            requires_cvc: true,
            requires_postal_code: false,
            hide_cvc: false,
            vertical_fields: false,
            allow_scroll: false,
            cancel_scroll_on_valid_number: false,
        }
    }
}

impl FormState {
    /// Value of a field, empty when the owner has not supplied one
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Status of a field, [`Status::Incomplete`] when not supplied
    pub fn status_of(&self, field: FieldId) -> Status {
        self.status.get(&field).copied().unwrap_or_default()
    }

    /// Whether the current brand is American Express
    pub fn is_amex(&self) -> bool {
        self.brand.as_deref() == Some(AMERICAN_EXPRESS)
    }

    /// Whether a field is part of the render tree for this state
    pub fn is_visible(&self, field: FieldId) -> bool {
        match field {
            FieldId::Number | FieldId::Expiry => true,
            FieldId::Cvc => self.requires_cvc,
            FieldId::Name => self.requires_name,
            FieldId::PostalCode => self.requires_postal_code,
        }
    }

    /// Visible fields in tab order
    pub fn visible_fields(&self) -> Vec<FieldId> {
        FieldId::all().filter(|f| self.is_visible(*f)).collect()
    }

    /// The last visible field in tab order; it carries the terminal submit
    /// affordance
    pub fn last_visible_field(&self) -> Option<FieldId> {
        FieldId::all().rev().find(|f| self.is_visible(*f))
    }

    /// Whether `field` is visible and nothing after it is
    pub fn is_last_field(&self, field: FieldId) -> bool {
        self.last_visible_field() == Some(field)
    }

    /// The visible field after `field` in tab order
    pub fn next_visible_field(&self, field: FieldId) -> Option<FieldId> {
        FieldId::all()
            .skip(field.ordinal() + 1)
            .find(|f| self.is_visible(*f))
    }

    /// The visible field before `field` in tab order
    pub fn previous_visible_field(&self, field: FieldId) -> Option<FieldId> {
        FieldId::all()
            .take(field.ordinal())
            .filter(|f| self.is_visible(*f))
            .last()
    }
}

#[cfg(test)]
#[path = "./state_tests.rs"]
mod tests;
