//! Per-field render props derived from shared form state and configuration

use log::*;
use std::collections::BTreeMap;

use crate::{
    config::{AdditionalProps, FormConfig, PropValue, StyleLayer},
    field::{FieldId, KeyboardType, Status},
    state::FormState,
};

/// Override keys forwarded to the text widget untouched
pub const PASS_THROUGH_KEYS: [&str; 8] = [
    "accessibility_label",
    "auto_correct",
    "editable",
    "max_length",
    "selection_color",
    "test_id",
    "text_content_type",
    "underline_color",
];

/// Override key merged into the input style stack instead of replacing it
pub const STYLE_KEY: &str = "style";

/// Override key naming the focus reference, never forwarded
pub const REF_KEY: &str = "ref";

/// Result of filtering owner overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredProps {
    /// Whitelisted keys and their values
    pub pass_through: BTreeMap<String, PropValue>,
    /// Style layer appended last to the input style stack
    pub style: Option<StyleLayer>,
}

/// Splits raw overrides into whitelisted pass-through props and an extra
/// style layer. Reserved and unknown keys are dropped.
pub fn filter_additional_props(raw: &AdditionalProps) -> FilteredProps {
    let mut filtered = FilteredProps::default();

    for (key, value) in raw {
        match (key.as_str(), value) {
            (STYLE_KEY, PropValue::Style(layer)) => {
                filtered.style = Some(layer.clone());
            }
            (STYLE_KEY, _) | (REF_KEY, _) => {
                debug!("dropping reserved override key: {key}");
            }
            (k, _) if PASS_THROUGH_KEYS.contains(&k) => {
                filtered.pass_through.insert(key.clone(), value.clone());
            }
            _ => {
                debug!("dropping unsupported override key: {key}");
            }
        }
    }

    filtered
}

/// Style layers applied to one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldStyle {
    /// Label stack: base bold layer then the configured label style
    pub label: Vec<StyleLayer>,
    /// Input stack: base layer, configured input style, then any override
    /// style. The status color is added at render time.
    pub input: Vec<StyleLayer>,
    /// Container stack: configured container style
    pub container: Vec<StyleLayer>,
}

/// Full set of props a [`crate::input::FieldInput`] renders from
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProps {
    /// Which field these props describe
    pub field: FieldId,
    /// Label text; hidden when empty
    pub label: String,
    /// Current value
    pub value: String,
    /// Placeholder text
    pub placeholder: String,
    /// Current validity
    pub status: Status,
    /// Text color for valid values
    pub valid_color: Option<String>,
    /// Text color for invalid values
    pub invalid_color: Option<String>,
    /// Placeholder text color
    pub placeholder_color: Option<String>,
    /// Keyboard requested from the host
    pub keyboard: KeyboardType,
    /// Mask typed characters
    pub masked: bool,
    /// Last visible field in tab order
    pub is_last: bool,
    /// Suppress the became-valid notification
    pub cancel_scroll_on_valid: bool,
    /// Container width
    pub width: f64,
    /// Style stacks
    pub style: FieldStyle,
    /// Whitelisted owner overrides
    pub pass_through: BTreeMap<String, PropValue>,
}

impl FieldProps {
    /// Props of an empty, unstyled field
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            label: String::new(),
            value: String::new(),
            placeholder: String::new(),
            status: Status::default(),
            valid_color: None,
            invalid_color: None,
            placeholder_color: None,
            keyboard: field.keyboard(),
            masked: false,
            is_last: false,
            cancel_scroll_on_valid: false,
            width: 0.0,
            style: FieldStyle::default(),
            pass_through: BTreeMap::new(),
        }
    }

    /// Numeric pass-through prop as a count, e.g. `max_length`
    pub fn pass_through_usize(&self, key: &str) -> Option<usize> {
        match self.pass_through.get(key) {
            Some(PropValue::Number(n)) if *n >= 0.0 => Some(*n as usize),
            _ => None,
        }
    }

    /// Boolean pass-through prop, e.g. `editable`
    pub fn pass_through_bool(&self, key: &str) -> Option<bool> {
        match self.pass_through.get(key) {
            Some(PropValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

fn base_input_style() -> StyleLayer {
    StyleLayer::color("black")
}

fn base_label_style() -> StyleLayer {
    StyleLayer {
        bold: Some(true),
        ..StyleLayer::default()
    }
}

/// Derives the render props of `field` from shared configuration and the
/// owner's state
pub fn compute_field_props(config: &FormConfig, state: &FormState, field: FieldId) -> FieldProps {
    let filtered = config
        .additional_props_for(field)
        .map(filter_additional_props)
        .unwrap_or_default();

    let mut input_style = vec![base_input_style(), config.input_style.clone()];
    if let Some(layer) = filtered.style {
        input_style.push(layer);
    }

    let placeholder = match field {
        FieldId::Cvc if state.is_amex() => config
            .placeholders
            .cvc_amex
            .clone()
            .unwrap_or_else(|| config.placeholders.cvc.clone()),
        _ => config.placeholders.get(field).to_string(),
    };

    FieldProps {
        field,
        label: config.labels.get(field).to_string(),
        value: state.value(field).to_string(),
        placeholder,
        status: state.status_of(field),
        valid_color: config.valid_color().map(str::to_string),
        invalid_color: config.invalid_color().map(str::to_string),
        placeholder_color: config.placeholder_color.clone(),
        keyboard: field.keyboard(),
        masked: field == FieldId::Cvc && state.hide_cvc,
        is_last: state.is_last_field(field),
        cancel_scroll_on_valid: field == FieldId::Number
            && state.cancel_scroll_on_valid_number,
        width: config.width_of(field),
        style: FieldStyle {
            label: vec![base_label_style(), config.label_style.clone()],
            input: input_style,
            container: vec![config.input_container_style.clone()],
        },
        pass_through: filtered.pass_through,
    }
}

#[cfg(test)]
#[path = "./props_tests.rs"]
mod tests;
