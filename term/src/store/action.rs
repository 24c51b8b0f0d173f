//! Action types for state transitions.

use cardform::field::FieldId;

use crate::ui::colors::Theme;

/// Commands that trigger state changes via the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw text typed into a field
    ChangeField { field: FieldId, value: String },
    FocusField(FieldId),
    FocusNext,
    FocusPrevious,
    /// A field's value became valid
    BecameValid(FieldId),
    /// A field's value was cleared
    BecameEmpty(FieldId),
    /// Return pressed inside a field
    SubmitField(FieldId),
    ClearForm,
    UpdateMessage(Option<String>),
    PreviewTheme(Theme),
}
