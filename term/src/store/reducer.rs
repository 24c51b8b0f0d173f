//! Pure reducer functions that compute new state from actions.

use std::fmt::Debug;

use crate::store::Reducer;

use super::{action::Action, state::State};

mod reducers;

/// Applies actions to state.
#[derive(Default)]
pub struct StoreReducer;

impl StoreReducer {
    pub fn boxed() -> Box<Self> {
        Box::default()
    }

    fn log_action<D: Debug>(&self, name: &str, data: &D) {
        log::debug!("processing action: {name}({:?})", data);
    }
}

impl Reducer for StoreReducer {
    /// Applies an action to the state, mutating it in place.
    fn reduce(&self, state: &mut State, action: Action) {
        match action {
            // Form actions
            Action::ChangeField { field, value } => {
                self.log_action("ChangeField", &field);
                reducers::form::change_field(state, field, &value);
            }
            Action::BecameValid(field) => {
                self.log_action("BecameValid", &field);
                reducers::form::became_valid(state, field);
            }
            Action::BecameEmpty(field) => {
                self.log_action("BecameEmpty", &field);
                reducers::form::became_empty(state, field);
            }
            Action::SubmitField(field) => {
                self.log_action("SubmitField", &field);
                reducers::form::submit_field(state, field);
            }
            Action::ClearForm => {
                self.log_action("ClearForm", &"");
                reducers::form::clear_form(state);
            }

            // Focus actions
            Action::FocusField(field) => {
                self.log_action("FocusField", &field);
                reducers::focus::focus_field(state, field);
            }
            Action::FocusNext => {
                self.log_action("FocusNext", &state.form.focused);
                reducers::focus::focus_next(state);
            }
            Action::FocusPrevious => {
                self.log_action("FocusPrevious", &state.form.focused);
                reducers::focus::focus_previous(state);
            }

            // UI actions
            Action::UpdateMessage(message) => {
                self.log_action("UpdateMessage", &message);
                reducers::ui::update_message(state, message);
            }
            Action::PreviewTheme(theme) => {
                self.log_action("PreviewTheme", &theme);
                reducers::ui::preview_theme(state, theme);
            }
        }
    }
}

#[cfg(test)]
#[path = "./reducer_tests.rs"]
mod tests;
