//! Props handed to the card face collaborator

use std::collections::BTreeMap;

use crate::{
    config::{CardPlaceholders, FormConfig},
    field::FieldId,
    state::FormState,
};

/// What the card preview draws. The orchestrator derives it on every render
/// and never inspects what the collaborator does with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFaceProps {
    /// Card brand, if known
    pub brand: Option<String>,
    /// Card number as entered
    pub number: String,
    /// Expiry as entered
    pub expiry: String,
    /// CVC as entered
    pub cvc: String,
    /// `" "` when the name field is not rendered, so the card shows no
    /// placeholder name
    pub name: String,
    /// Field currently holding focus; the CVC flips the card
    pub focused: Option<FieldId>,
    /// Mask the CVC on the card back
    pub hide_cvc: bool,
    /// Preview scale
    pub scale: f64,
    /// Overlay font size
    pub font_size: f64,
    /// Overlay font family
    pub font_family: Option<String>,
    /// Text shown for empty values
    pub placeholders: CardPlaceholders,
    /// Card front image
    pub image_front: Option<String>,
    /// Card back image
    pub image_back: Option<String>,
    /// Brand icon overrides
    pub brand_icons: BTreeMap<String, String>,
}

impl CardFaceProps {
    /// Derives card face props from configuration and state
    pub fn new(config: &FormConfig, state: &FormState) -> Self {
        let card = &config.card;

        Self {
            brand: state.brand.clone(),
            number: state.value(FieldId::Number).to_string(),
            expiry: state.value(FieldId::Expiry).to_string(),
            cvc: state.value(FieldId::Cvc).to_string(),
            name: if state.requires_name {
                state.value(FieldId::Name).to_string()
            } else {
                " ".to_string()
            },
            focused: state.focused,
            hide_cvc: state.hide_cvc,
            scale: card.scale,
            font_size: card.font_size,
            font_family: card.font_family.clone(),
            placeholders: card.placeholders.clone(),
            image_front: card.image_front.clone(),
            image_back: card.image_back.clone(),
            brand_icons: card.brand_icons.clone(),
        }
    }

    /// Whether the collaborator should show the back of the card
    pub fn shows_back(&self) -> bool {
        self.focused == Some(FieldId::Cvc)
    }
}
