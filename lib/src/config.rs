//! Form configuration: labels, placeholders, colors, style layers, widths
//! and per-field prop overrides
//!
//! Every section deserializes with defaults so a partial YAML or JSON
//! document is enough to override a single label.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    error::{CardFormError, Result},
    field::FieldId,
};

/// Default width of the expiry and CVC inputs
pub const CVC_INPUT_WIDTH: f64 = 70.0;
/// Default width of the expiry input
pub const EXPIRY_INPUT_WIDTH: f64 = CVC_INPUT_WIDTH;
/// Space reserved next to the card number input
pub const CARD_NUMBER_INPUT_WIDTH_OFFSET: f64 = 40.0;
/// Default width of the postal code input
pub const POSTAL_CODE_INPUT_WIDTH: f64 = 120.0;
/// Margin kept between a focused field and the leading edge of the strip
pub const LOOK_BACK_OFFSET: f64 = 40.0;
/// Window width assumed when the host does not report one
pub const DEFAULT_WINDOW_WIDTH: f64 = 375.0;

/// One layer of a style stack; unset properties fall through to earlier
/// layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleLayer {
    /// Text color name or `#rrggbb`
    pub color: Option<String>,
    /// Background color name or `#rrggbb`
    pub background: Option<String>,
    /// Bold text
    pub bold: Option<bool>,
    /// Underlined text
    pub underline: Option<bool>,
    /// Color of the container's bottom border
    pub border_color: Option<String>,
}

impl StyleLayer {
    /// Layer that only sets the text color
    pub fn color(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Self::default()
        }
    }

    /// Returns `self` with every property set in `over` replaced
    pub fn merge(&self, over: &StyleLayer) -> StyleLayer {
        StyleLayer {
            color: over.color.clone().or_else(|| self.color.clone()),
            background: over
                .background
                .clone()
                .or_else(|| self.background.clone()),
            bold: over.bold.or(self.bold),
            underline: over.underline.or(self.underline),
            border_color: over
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
        }
    }

    /// Collapses a stack, later layers winning
    pub fn flatten<'a>(layers: impl IntoIterator<Item = &'a StyleLayer>) -> StyleLayer {
        layers
            .into_iter()
            .fold(StyleLayer::default(), |acc, layer| acc.merge(layer))
    }
}

/// Field labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Card number label
    pub number: String,
    /// Expiry label
    pub expiry: String,
    /// CVC label
    pub cvc: String,
    /// Cardholder name label
    pub name: String,
    /// Postal code label
    pub postal_code: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            number: "CARD NUMBER".to_string(),
            expiry: "EXPIRY".to_string(),
            cvc: "CVC/CCV".to_string(),
            name: "CARDHOLDER'S NAME".to_string(),
            postal_code: "POSTAL CODE".to_string(),
        }
    }
}

impl Labels {
    /// Label for a field
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Number => &self.number,
            FieldId::Expiry => &self.expiry,
            FieldId::Cvc => &self.cvc,
            FieldId::Name => &self.name,
            FieldId::PostalCode => &self.postal_code,
        }
    }
}

/// Input placeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    /// Card number placeholder
    pub number: String,
    /// Expiry placeholder
    pub expiry: String,
    /// CVC placeholder
    pub cvc: String,
    /// CVC placeholder used for American Express cards
    pub cvc_amex: Option<String>,
    /// Cardholder name placeholder
    pub name: String,
    /// Postal code placeholder
    pub postal_code: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            number: "1234 5678 1234 5678".to_string(),
            expiry: "MM/YY".to_string(),
            cvc: "CVC".to_string(),
            cvc_amex: None,
            name: "Full Name".to_string(),
            postal_code: "34567".to_string(),
        }
    }
}

impl Placeholders {
    /// Placeholder for a field
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Number => &self.number,
            FieldId::Expiry => &self.expiry,
            FieldId::Cvc => &self.cvc,
            FieldId::Name => &self.name,
            FieldId::PostalCode => &self.postal_code,
        }
    }
}

/// Text the card face shows for fields that are still empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardPlaceholders {
    /// Number shown on an empty card
    pub number: String,
    /// Name shown on an empty card
    pub name: String,
    /// Expiry shown on an empty card
    pub expiry: String,
    /// CVC shown on an empty card
    pub cvc: String,
}

impl Default for CardPlaceholders {
    fn default() -> Self {
        Self {
            number: "•••• •••• •••• ••••".to_string(),
            name: "FULL NAME".to_string(),
            expiry: "••/••".to_string(),
            cvc: "•••".to_string(),
        }
    }
}

/// Configured input widths; `None` selects the default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWidths {
    /// Card number width
    pub number: Option<f64>,
    /// Expiry width
    pub expiry: Option<f64>,
    /// CVC width
    pub cvc: Option<f64>,
    /// Cardholder name width
    pub name: Option<f64>,
    /// Postal code width
    pub postal_code: Option<f64>,
}

impl FieldWidths {
    fn get(&self, field: FieldId) -> Option<f64> {
        match field {
            FieldId::Number => self.number,
            FieldId::Expiry => self.expiry,
            FieldId::Cvc => self.cvc,
            FieldId::Name => self.name,
            FieldId::PostalCode => self.postal_code,
        }
    }
}

/// Settings forwarded to the card face collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSettings {
    /// Scale applied to the card preview
    pub scale: f64,
    /// Font size of the card overlay text
    pub font_size: f64,
    /// Font family of the card overlay text
    pub font_family: Option<String>,
    /// Image used for the card front
    pub image_front: Option<String>,
    /// Image used for the card back
    pub image_back: Option<String>,
    /// Brand identifier to icon overrides
    pub brand_icons: BTreeMap<String, String>,
    /// Placeholder text for empty card values
    pub placeholders: CardPlaceholders,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_size: 21.0,
            font_family: None,
            image_front: None,
            image_back: None,
            brand_icons: BTreeMap::new(),
            placeholders: CardPlaceholders::default(),
        }
    }
}

/// Value of an owner supplied prop override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean prop
    Bool(bool),
    /// Numeric prop
    Number(f64),
    /// Text prop
    Text(String),
    /// Style layer (only meaningful for the `style` key)
    Style(StyleLayer),
}

/// Raw per-field overrides as supplied by the owner
pub type AdditionalProps = BTreeMap<String, PropValue>;

/// Everything about a form that is not per-keystroke state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Field labels
    pub labels: Labels,
    /// Input placeholders
    pub placeholders: Placeholders,
    /// Style layer applied to every label
    pub label_style: StyleLayer,
    /// Style layer applied to every text input
    pub input_style: StyleLayer,
    /// Style layer applied to every field container
    pub input_container_style: StyleLayer,
    /// Text color for valid values; empty or unset means no color
    pub valid_color: Option<String>,
    /// Text color for invalid values; empty or unset means no color
    pub invalid_color: Option<String>,
    /// Placeholder text color
    pub placeholder_color: Option<String>,
    /// Configured input widths
    pub widths: FieldWidths,
    /// Width of the window hosting the form, used for default widths
    pub window_width: f64,
    /// Margin kept in front of a field scrolled into view
    pub look_back_offset: f64,
    /// Card face settings
    pub card: CardSettings,
    /// Per-field overrides passed through to the text widget
    pub additional_props: BTreeMap<FieldId, AdditionalProps>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            placeholders: Placeholders::default(),
            label_style: StyleLayer::default(),
            input_style: StyleLayer::default(),
            input_container_style: StyleLayer {
                border_color: Some("black".to_string()),
                ..StyleLayer::default()
            },
            valid_color: None,
            invalid_color: Some("red".to_string()),
            placeholder_color: Some("gray".to_string()),
            widths: FieldWidths::default(),
            window_width: DEFAULT_WINDOW_WIDTH,
            look_back_offset: LOOK_BACK_OFFSET,
            card: CardSettings::default(),
            additional_props: BTreeMap::new(),
        }
    }
}

impl FormConfig {
    /// Width a field renders with, falling back to defaults derived from the
    /// window width
    pub fn width_of(&self, field: FieldId) -> f64 {
        self.widths.get(field).unwrap_or_else(|| match field {
            FieldId::Expiry => EXPIRY_INPUT_WIDTH,
            FieldId::Cvc => CVC_INPUT_WIDTH,
            FieldId::PostalCode => POSTAL_CODE_INPUT_WIDTH,
            FieldId::Number | FieldId::Name => (self.window_width
                - EXPIRY_INPUT_WIDTH
                - CARD_NUMBER_INPUT_WIDTH_OFFSET)
                .max(0.0),
        })
    }

    /// Configured valid color, ignoring empty strings
    pub fn valid_color(&self) -> Option<&str> {
        self.valid_color.as_deref().filter(|c| !c.is_empty())
    }

    /// Configured invalid color, ignoring empty strings
    pub fn invalid_color(&self) -> Option<&str> {
        self.invalid_color.as_deref().filter(|c| !c.is_empty())
    }

    /// Overrides supplied for a field, if any
    pub fn additional_props_for(&self, field: FieldId) -> Option<&AdditionalProps> {
        self.additional_props.get(&field)
    }

    /// Rejects sizes that cannot produce a layout
    pub fn validate(&self) -> Result<()> {
        if !self.window_width.is_finite() || self.window_width <= 0.0 {
            return Err(CardFormError::InvalidConfig(format!(
                "window width must be positive, got {}",
                self.window_width
            )));
        }

        if !self.look_back_offset.is_finite() || self.look_back_offset < 0.0 {
            return Err(CardFormError::InvalidConfig(format!(
                "look back offset must not be negative, got {}",
                self.look_back_offset
            )));
        }

        for field in FieldId::all() {
            if let Some(width) = self.widths.get(field)
                && (!width.is_finite() || width <= 0.0)
            {
                return Err(CardFormError::InvalidConfig(format!(
                    "width of {field} must be positive, got {width}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "./config_tests.rs"]
mod tests;
