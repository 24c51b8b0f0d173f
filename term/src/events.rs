//! Bridges form callbacks into store actions.

use cardform::{events::FormEvents, field::FieldId};
use std::rc::Rc;

use crate::store::{Dispatcher, action::Action};

/// Turns every form callback into an action on the store
pub struct StoreEvents {
    dispatcher: Rc<dyn Dispatcher>,
}

impl StoreEvents {
    pub fn new(dispatcher: Rc<dyn Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl FormEvents for StoreEvents {
    fn on_focus(&self, field: FieldId) {
        self.dispatcher.dispatch(Action::FocusField(field));
    }

    fn on_change(&self, field: FieldId, value: &str) {
        self.dispatcher.dispatch(Action::ChangeField {
            field,
            value: value.to_string(),
        });
    }

    fn on_submit_editing(&self, field: FieldId, _value: &str) {
        self.dispatcher.dispatch(Action::SubmitField(field));
    }

    fn on_become_empty(&self, field: FieldId) {
        self.dispatcher.dispatch(Action::BecameEmpty(field));
    }

    fn on_become_valid(&self, field: FieldId) {
        self.dispatcher.dispatch(Action::BecameValid(field));
    }
}

#[cfg(test)]
#[path = "./events_tests.rs"]
mod tests;
