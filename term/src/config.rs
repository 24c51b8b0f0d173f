//! Configuration management for the card form and its terminal presentation.

use cardform::{
    config::{FieldWidths, FormConfig, StyleLayer},
    state::FormState,
};
use color_eyre::eyre::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::ui::colors::Theme;

/// Margin, in columns, kept in front of a field scrolled into view
pub const TERM_LOOK_BACK_OFFSET: f64 = 4.0;
/// Terminal width assumed for default field widths
pub const TERM_WINDOW_WIDTH: f64 = 80.0;

/// Form configuration with defaults sized in terminal columns
pub fn default_form_config() -> FormConfig {
    FormConfig {
        input_style: StyleLayer::color("white"),
        input_container_style: StyleLayer {
            border_color: Some("darkgray".to_string()),
            ..StyleLayer::default()
        },
        label_style: StyleLayer {
            bold: Some(true),
            ..StyleLayer::default()
        },
        valid_color: Some("green".to_string()),
        invalid_color: Some("red".to_string()),
        placeholder_color: Some("darkgray".to_string()),
        widths: FieldWidths {
            number: Some(24.0),
            expiry: Some(9.0),
            cvc: Some(9.0),
            name: Some(24.0),
            postal_code: Some(13.0),
        },
        window_width: TERM_WINDOW_WIDTH,
        look_back_offset: TERM_LOOK_BACK_OFFSET,
        ..FormConfig::default()
    }
}

/// Persisted application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    /// Card brand reported to the form, e.g. `visa` or `american-express`
    pub brand: Option<String>,
    pub requires_name: bool,
    pub requires_cvc: bool,
    pub requires_postal_code: bool,
    pub hide_cvc: bool,
    pub vertical_fields: bool,
    pub allow_scroll: bool,
    pub cancel_scroll_on_valid_number: bool,
    /// Label of the button placed after the card number, none hides it
    pub input_button: Option<String>,
    pub form: FormConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Blue.to_string(),
            brand: None,
            requires_name: false,
            requires_cvc: true,
            requires_postal_code: false,
            hide_cvc: false,
            vertical_fields: false,
            allow_scroll: false,
            cancel_scroll_on_valid_number: false,
            input_button: Some("clear".to_string()),
            form: default_form_config(),
        }
    }
}

impl Config {
    /// Form configuration with unset widths filled from the terminal
    /// defaults. A partial `form` section otherwise falls back to widths
    /// meant for pixel layouts.
    pub fn form_config(&self) -> FormConfig {
        let defaults = default_form_config().widths;
        let mut form = self.form.clone();
        let widths = &mut form.widths;
        widths.number = widths.number.or(defaults.number);
        widths.expiry = widths.expiry.or(defaults.expiry);
        widths.cvc = widths.cvc.or(defaults.cvc);
        widths.name = widths.name.or(defaults.name);
        widths.postal_code = widths.postal_code.or(defaults.postal_code);
        form
    }

    /// Initial form state described by this config
    pub fn initial_form_state(&self) -> FormState {
        FormState {
            brand: self.brand.clone(),
            requires_name: self.requires_name,
            requires_cvc: self.requires_cvc,
            requires_postal_code: self.requires_postal_code,
            hide_cvc: self.hide_cvc,
            vertical_fields: self.vertical_fields,
            allow_scroll: self.allow_scroll,
            cancel_scroll_on_valid_number: self.cancel_scroll_on_valid_number,
            focused: Some(cardform::field::FieldId::Number),
            ..FormState::default()
        }
    }
}

/// Persists and retrieves the configuration from a YAML file.
#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct ConfigManager {
    /// The path the config file
    path: String,
    #[builder(setter(skip))]
    config: Config,
}

impl ConfigManagerBuilder {
    pub fn build(&self) -> Result<ConfigManager> {
        let mut manager = self._build()?;

        let f: Result<std::fs::File, std::io::Error> = std::fs::File::open(&manager.path);

        match f {
            Ok(file) => {
                manager.config = match serde_yaml::from_reader(file) {
                    Ok(c) => c,
                    Err(e) => {
                        log::warn!("Failed to parse config file, using defaults: {}", e);
                        Config::default()
                    }
                };
                Ok(manager)
            }
            Err(_) => {
                manager.config = Config::default();
                manager.write()?;
                Ok(manager)
            }
        }
    }
}

impl ConfigManager {
    /// Returns a new instance of ConfigManagerBuilder.
    pub fn builder() -> ConfigManagerBuilder {
        ConfigManagerBuilder::default()
    }

    /// Returns the loaded config.
    pub fn get(&self) -> Config {
        self.config.clone()
    }

    /// Replaces the config and persists it to disk.
    pub fn update_config(&mut self, config: Config) -> Result<()> {
        self.config = config;
        self.write()
    }

    fn write(&mut self) -> Result<()> {
        let serialized = serde_yaml::to_string(&self.config)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./config_tests.rs"]
mod tests;
