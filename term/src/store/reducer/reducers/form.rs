//! Pure form state reducers.

use cardform::field::{FieldId, Status};
use itertools::Itertools;

use crate::{status, store::state::State};

/// Message shown once every visible field is valid on submit
pub const ACCEPTED_MESSAGE: &str = "card details accepted";

/// Stores the sanitized value and its status.
pub fn change_field(state: &mut State, field: FieldId, raw: &str) {
    if !state.form.is_visible(field) {
        log::debug!("{field}: ignoring change, field is hidden");
        return;
    }

    let is_amex = state.form.is_amex();
    let value = status::sanitize(field, raw, is_amex);
    let status = status::classify(field, &value, is_amex);

    state.form.values.insert(field, value);
    state.form.status.insert(field, status);
    state.submitted = false;
    state.message = None;
}

/// Advances past a field once it holds a valid value.
pub fn became_valid(state: &mut State, field: FieldId) {
    if state.form.focused != Some(field) {
        return;
    }

    if let Some(next) = state.form.next_visible_field(field) {
        state.form.focused = Some(next);
    }
}

/// Steps back when the focused field was cleared.
pub fn became_empty(state: &mut State, field: FieldId) {
    if state.form.focused != Some(field) {
        return;
    }

    if let Some(previous) = state.form.previous_visible_field(field) {
        state.form.focused = Some(previous);
    }
}

/// Return pressed in a field: submits from the last field, otherwise moves
/// on to the next one.
pub fn submit_field(state: &mut State, field: FieldId) {
    if !state.form.is_last_field(field) {
        if let Some(next) = state.form.next_visible_field(field) {
            state.form.focused = Some(next);
        }
        return;
    }

    let invalid = state
        .form
        .visible_fields()
        .into_iter()
        .filter(|f| state.form.status_of(*f) != Status::Valid)
        .collect::<Vec<FieldId>>();

    if let Some(first) = invalid.first() {
        state.submitted = false;
        state.message = Some(format!("check {}", invalid.iter().join(", ")));
        state.form.focused = Some(*first);
    } else {
        state.submitted = true;
        state.message = Some(ACCEPTED_MESSAGE.to_string());
    }
}

/// Clears every value and starts over at the card number.
pub fn clear_form(state: &mut State) {
    state.form.values.clear();
    state.form.status.clear();
    state.form.focused = Some(FieldId::Number);
    state.submitted = false;
    state.message = None;
}
