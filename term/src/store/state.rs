//! Application state definitions.

use cardform::state::FormState;

use crate::{
    config::Config,
    ui::colors::{Colors, Theme},
};

/// Complete application state for the terminal UI.
#[derive(Debug, Clone)]
pub struct State {
    pub true_color_enabled: bool,
    pub theme: Theme,
    pub colors: Colors,
    /// State the card form renders from
    pub form: FormState,
    pub message: Option<String>,
    /// Set once the last field was submitted with every field valid
    pub submitted: bool,
}

impl State {
    /// Creates initial state from the loaded config.
    pub fn new(config: &Config, true_color_enabled: bool) -> Self {
        let theme = Theme::from_string(&config.theme);
        Self {
            true_color_enabled,
            theme,
            colors: Colors::new(theme.to_palette(true_color_enabled), true_color_enabled),
            form: config.initial_form_state(),
            message: None,
            submitted: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(&Config::default(), false)
    }
}
