//! Callbacks the core emits back to the state owner

#[cfg(test)]
use mockall::automock;

use crate::field::FieldId;

/// Receives user-facing events, always tagged with the field that produced
/// them
///
/// Every method defaults to a no-op so owners only implement what they
/// consume.
#[cfg_attr(test, automock)]
pub trait FormEvents {
    /// The field's text widget gained input focus
    fn on_focus(&self, _field: FieldId) {}

    /// The user edited the field's text
    fn on_change(&self, _field: FieldId, _value: &str) {}

    /// The user pressed the return key inside the field
    fn on_submit_editing(&self, _field: FieldId, _value: &str) {}

    /// The field went from a non-empty value to an empty one
    fn on_become_empty(&self, _field: FieldId) {}

    /// The field's status changed to valid
    fn on_become_valid(&self, _field: FieldId) {}
}
