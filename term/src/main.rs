//! Terminal UI (TUI) for entering credit card details
//!
//! Renders a card preview above a horizontally scrolling strip of fields.
//! Focus follows the form's state: a field that becomes valid hands focus to
//! the next one, and the strip scrolls the newly focused field into view.
//!
//! # Features:
//!
//! - Card number, expiry, CVC, cardholder name and postal code fields
//! - Validity colors for each field
//! - Focus-follow scrolling with a configurable look-back margin
//! - Optional vertical layout
//! - Persistent YAML configuration for labels, placeholders, styles and widths
//!
//! # Examples
//!
//! ```bash
//! # show help menu
//! cardform-term --help
//!
//! # launch application
//! cardform-term
//!
//! # american express card with name and postal code fields
//! cardform-term --brand american-express --requires-name --requires-postal-code
//! ```

use cardform::{
    host::{FormHost, LayoutManager},
    locate::LocateChain,
    orchestrator::FormOrchestrator,
};
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use config::{Config, ConfigManager};
use directories::ProjectDirs;
use indoc::indoc;
use ratatui::{Terminal, prelude::CrosstermBackend};
use std::{fs, io, rc::Rc};

use crate::{
    events::StoreEvents,
    host::TermHost,
    renderer::Renderer,
    store::{Dispatcher, Store, reducer::StoreReducer, state::State},
    ui::components::field_strip::FormButton,
};

#[doc(hidden)]
mod config;
#[doc(hidden)]
mod events;
#[doc(hidden)]
mod host;
#[doc(hidden)]
mod renderer;
#[doc(hidden)]
mod status;
#[doc(hidden)]
mod store;
#[doc(hidden)]
mod ui;

const KEYS_HELP: &str = indoc! {"
    Keys:
      tab / shift-tab   move to the next / previous field
      enter             next field, or submit on the last field
      f2                cycle color theme
      mouse click       focus a field or press the clear button
      esc / ctrl-c      quit
"};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = KEYS_HELP)]
struct Args {
    /// Write debug logs to the application's data directory
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Card brand, e.g. visa or american-express
    #[arg(short, long)]
    brand: Option<String>,

    /// Stack fields in rows instead of a horizontal strip
    #[arg(long, default_value_t = false)]
    vertical_fields: bool,

    /// Show the cardholder's name field
    #[arg(long, default_value_t = false)]
    requires_name: bool,

    /// Show the postal code field
    #[arg(long, default_value_t = false)]
    requires_postal_code: bool,

    /// Mask the CVC on the card preview
    #[arg(long, default_value_t = false)]
    hide_cvc: bool,

    /// Hide the CVC field
    #[arg(long, default_value_t = false)]
    no_cvc: bool,

    /// Allow scrolling the field strip with the mouse wheel
    #[arg(long, default_value_t = false)]
    allow_scroll: bool,

    /// Color theme (Blue, Emerald, Indigo, Red)
    #[arg(short, long)]
    theme: Option<String>,

    /// Persist the given options to the config file
    #[arg(long, default_value_t = false)]
    save: bool,
}

#[doc(hidden)]
fn get_project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "cardform-term").ok_or(eyre!("failed to get project directory"))
}

#[doc(hidden)]
fn initialize_logger(args: &Args) -> Result<()> {
    if !args.debug {
        simplelog::WriteLogger::init(
            simplelog::LevelFilter::Off,
            simplelog::Config::default(),
            io::sink(),
        )?;
        return Ok(());
    }

    // the TUI owns the terminal so logs go to a file
    let data_dir = get_project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    let log_file = fs::File::create(data_dir.join("cardform-term.log"))?;

    simplelog::WriteLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        log_file,
    )?;

    Ok(())
}

#[doc(hidden)]
fn get_project_config_path() -> Result<String> {
    let project_dir = get_project_dirs()?;
    let config_dir = project_dir.config_dir();
    fs::create_dir_all(config_dir)?;
    let config_file_path = config_dir
        .join("config.yml")
        .to_str()
        .ok_or(eyre!("unable to construct config file path"))?
        .to_string();
    Ok(config_file_path)
}

#[doc(hidden)]
fn create_config_manager() -> Result<ConfigManager> {
    let config_path = get_project_config_path()?;
    let config_manager = ConfigManager::builder().path(config_path).build()?;
    Ok(config_manager)
}

#[doc(hidden)]
fn apply_args(args: &Args, config: Config) -> Config {
    Config {
        brand: args.brand.clone().or(config.brand),
        theme: args.theme.clone().unwrap_or(config.theme),
        vertical_fields: config.vertical_fields || args.vertical_fields,
        requires_name: config.requires_name || args.requires_name,
        requires_postal_code: config.requires_postal_code || args.requires_postal_code,
        requires_cvc: config.requires_cvc && !args.no_cvc,
        hide_cvc: config.hide_cvc || args.hide_cvc,
        allow_scroll: config.allow_scroll || args.allow_scroll,
        ..config
    }
}

#[doc(hidden)]
fn is_true_color_enabled() -> bool {
    match supports_color::on(supports_color::Stream::Stdout) {
        Some(support) => support.has_16m,
        _ => false,
    }
}

#[doc(hidden)]
fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(&args)?;

    let mut config_manager = create_config_manager()?;
    let config = apply_args(&args, config_manager.get());

    if args.save {
        config_manager.update_config(config.clone())?;
    }

    let store = Rc::new(Store::new(
        State::new(&config, is_true_color_enabled()),
        StoreReducer::boxed(),
    ));

    let host = Rc::new(TermHost::new());
    let button_label = config.input_button.clone();

    let orchestrator = FormOrchestrator::<FormButton>::builder()
        .config(config.form_config())
        .events(Rc::new(StoreEvents::new(
            Rc::clone(&store) as Rc<dyn Dispatcher>
        )))
        .host(host.clone() as Rc<dyn FormHost>)
        .chain(Rc::new(LocateChain::standard(Some(
            host.registry() as Rc<dyn LayoutManager>
        ))))
        .render_button(move || button_label.clone().map(FormButton::new))
        .build()?;

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let renderer = Renderer::new(terminal, store, orchestrator, host);

    renderer.start_render_loop()
}

#[cfg(test)]
#[path = "./main_tests.rs"]
mod tests;
