//! Pure focus state reducers.

use cardform::field::FieldId;

use crate::store::state::State;

/// Focuses a field if it is rendered.
pub fn focus_field(state: &mut State, field: FieldId) {
    if state.form.is_visible(field) {
        state.form.focused = Some(field);
    } else {
        log::debug!("{field}: ignoring focus, field is hidden");
    }
}

/// Moves focus to the next visible field. Focus stays put on the last one.
pub fn focus_next(state: &mut State) {
    let next = match state.form.focused {
        Some(field) => state.form.next_visible_field(field),
        None => state.form.visible_fields().first().copied(),
    };

    if next.is_some() {
        state.form.focused = next;
    }
}

/// Moves focus to the previous visible field.
pub fn focus_previous(state: &mut State) {
    let previous = match state.form.focused {
        Some(field) => state.form.previous_visible_field(field),
        None => state.form.last_visible_field(),
    };

    if previous.is_some() {
        state.form.focused = previous;
    }
}
