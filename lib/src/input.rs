//! A single labeled card field and its diff-based notifications

use log::*;
use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::Rc,
};

use crate::{
    config::{PropValue, StyleLayer},
    events::FormEvents,
    field::{AutoCapitalize, FieldId, KeyboardType, ReturnKey, Status},
    host::TextWidget,
    props::FieldProps,
};

/// Everything a host needs to draw one field
#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    /// Field being drawn
    pub field: FieldId,
    /// Label, absent when the configured label is empty
    pub label: Option<String>,
    /// Current value
    pub value: String,
    /// Placeholder shown while the value is empty
    pub placeholder: String,
    /// Placeholder color
    pub placeholder_color: Option<String>,
    /// Status driven text color, `None` for the default color
    pub text_color: Option<String>,
    /// Label style stack
    pub label_style: Vec<StyleLayer>,
    /// Input style stack: base, configured style, status color, override
    pub input_style: Vec<StyleLayer>,
    /// Container style stack
    pub container_style: Vec<StyleLayer>,
    /// Return key affordance
    pub return_key: ReturnKey,
    /// Mask typed characters
    pub masked: bool,
    /// Keyboard layout
    pub keyboard: KeyboardType,
    /// Capitalization hint
    pub auto_capitalize: AutoCapitalize,
    /// Auto-correct hint, off unless overridden
    pub auto_correct: bool,
    /// Maximum number of characters, if overridden
    pub max_length: Option<usize>,
    /// Whether the user may edit the value
    pub editable: bool,
    /// Container width
    pub width: f64,
    /// Whitelisted owner overrides
    pub pass_through: BTreeMap<String, PropValue>,
}

fn status_color(props: &FieldProps) -> Option<String> {
    let color = match props.status {
        Status::Valid => props.valid_color.as_ref(),
        Status::Invalid => props.invalid_color.as_ref(),
        Status::Incomplete => None,
    };

    color.filter(|c| !c.is_empty()).cloned()
}

/// One labeled text field
///
/// Holds its current props and the text widget the host mounted for it.
/// Nothing else survives between updates: notifications are derived purely
/// from the previous and incoming props.
pub struct FieldInput {
    props: RefCell<FieldProps>,
    widget: RefCell<Option<Rc<dyn TextWidget>>>,
    events: Rc<dyn FormEvents>,
}

impl FieldInput {
    /// Returns a new field input with no widget mounted
    pub fn new(props: FieldProps, events: Rc<dyn FormEvents>) -> Self {
        Self {
            props: RefCell::new(props),
            widget: RefCell::new(None),
            events,
        }
    }

    /// Field this input edits
    pub fn field(&self) -> FieldId {
        self.props.borrow().field
    }

    /// Copy of the current props
    pub fn props(&self) -> FieldProps {
        self.props.borrow().clone()
    }

    /// Attaches the host's text widget
    pub fn mount_widget(&self, widget: Rc<dyn TextWidget>) {
        self.widget.replace(Some(widget));
    }

    /// Detaches the text widget; focus becomes a no-op
    pub fn unmount_widget(&self) {
        self.widget.replace(None);
    }

    /// The mounted text widget, if any
    pub fn widget(&self) -> Option<Rc<dyn TextWidget>> {
        self.widget.borrow().clone()
    }

    /// Asks the text widget to take input focus. Does nothing when no widget
    /// is mounted or it cannot focus.
    pub fn focus(&self) {
        let Some(widget) = self.widget() else {
            debug!("{}: focus skipped, no widget mounted", self.field());
            return;
        };

        if !widget.can_focus() {
            debug!("{}: focus skipped, widget cannot focus", self.field());
            return;
        }

        widget.focus();
    }

    /// A tap anywhere inside the field's container
    pub fn press(&self) {
        self.focus();
    }

    /// Applies incoming props, notifying the owner when the value became
    /// empty or the status became valid
    pub fn update(&self, next: FieldProps) {
        let field = next.field;
        let (became_empty, became_valid) = {
            let prev = self.props.borrow();
            (
                !prev.value.is_empty() && next.value.is_empty(),
                prev.status != Status::Valid
                    && next.status == Status::Valid
                    && !prev.cancel_scroll_on_valid,
            )
        };

        trace!("{field}: props updated, value={:?} status={}", next.value, next.status);

        self.props.replace(next);

        if became_empty {
            debug!("{field}: became empty");
            self.events.on_become_empty(field);
        }

        if became_valid {
            debug!("{field}: became valid");
            self.events.on_become_valid(field);
        }
    }

    /// Text edited in the widget
    pub fn handle_change(&self, value: &str) {
        self.events.on_change(self.field(), value);
    }

    /// Return key pressed in the widget
    pub fn handle_submit(&self) {
        let (field, value) = {
            let props = self.props.borrow();
            (props.field, props.value.clone())
        };
        self.events.on_submit_editing(field, &value);
    }

    /// Widget gained input focus
    pub fn handle_focus(&self) {
        self.events.on_focus(self.field());
    }

    /// Builds the view of the current props
    pub fn render(&self) -> InputView {
        let props = self.props.borrow();
        let text_color = status_color(&props);

        let (base, overrides) = props
            .style
            .input
            .split_at(props.style.input.len().min(2));
        let mut input_style = base.to_vec();
        if let Some(color) = &text_color {
            input_style.push(StyleLayer::color(color));
        }
        input_style.extend_from_slice(overrides);

        InputView {
            field: props.field,
            label: Some(props.label.clone()).filter(|l| !l.is_empty()),
            value: props.value.clone(),
            placeholder: props.placeholder.clone(),
            placeholder_color: props.placeholder_color.clone(),
            text_color,
            label_style: props.style.label.clone(),
            input_style,
            container_style: props.style.container.clone(),
            return_key: if props.is_last {
                ReturnKey::Done
            } else {
                ReturnKey::Next
            },
            masked: props.masked,
            keyboard: props.keyboard,
            auto_capitalize: AutoCapitalize::Words,
            auto_correct: props.pass_through_bool("auto_correct").unwrap_or(false),
            max_length: props.pass_through_usize("max_length"),
            editable: props.pass_through_bool("editable").unwrap_or(true),
            width: props.width,
            pass_through: props.pass_through.clone(),
        }
    }
}

#[cfg(test)]
#[path = "./input_tests.rs"]
mod tests;
