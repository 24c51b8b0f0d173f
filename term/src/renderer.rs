//! Main application loop and terminal management.

use cardform::{
    field::FieldId,
    input::{FieldInput, InputView},
    orchestrator::FormOrchestrator,
};
use color_eyre::eyre::{Context, Result, eyre};
use core::time;
use ratatui::{
    Terminal,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event as CrossTermEvent, KeyCode,
            KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
        },
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::Backend,
};
use std::{cell::RefCell, collections::BTreeMap, io, rc::Rc};

use crate::{
    host::{TermHost, registry::Hit},
    status,
    store::{Dispatcher, StateGetter, Store, action::Action},
    ui::{
        app::{App, FormFrame},
        components::field_strip::FormButton,
        traits::{CustomWidget, CustomWidgetContext},
    },
};

/// Columns scrolled per mouse wheel step
pub const WHEEL_STEP: f64 = 4.0;

/// Main application coordinating rendering and event handling.
///
/// Manages the terminal lifecycle (raw mode, alternate screen) and runs the
/// render loop that draws the form and processes input events.
pub struct Renderer<B: Backend> {
    terminal: RefCell<Terminal<B>>,
    store: Rc<Store>,
    orchestrator: FormOrchestrator<FormButton>,
    host: Rc<TermHost>,
}

impl<B: Backend> Renderer<B> {
    pub fn new(
        terminal: Terminal<B>,
        store: Rc<Store>,
        orchestrator: FormOrchestrator<FormButton>,
        host: Rc<TermHost>,
    ) -> Self {
        Self {
            terminal: RefCell::new(terminal),
            store,
            orchestrator,
            host,
        }
    }

    /// Initializes the terminal and starts the render loop. Returns when the
    /// user quits.
    pub fn start_render_loop(&self) -> Result<()> {
        self.enable_terminal_raw_mode()?;
        let result = self.start_loop();
        self.orchestrator.unmount();
        self.exit()?;
        result
    }

    fn start_loop(&self) -> Result<()> {
        loop {
            self.draw()?;

            // poll so animated scrolls keep advancing without input
            if let Ok(has_event) = event::poll(time::Duration::from_millis(60))
                && has_event
            {
                let evt = event::read()?;
                if !self.handle_event(&evt) {
                    return Ok(());
                }
            }
        }
    }

    /// Syncs the form with the store, draws one frame and then answers the
    /// layout measurements queued before it
    pub fn draw(&self) -> Result<()> {
        let state = self.store.get_state();
        self.orchestrator.update(&state.form);

        if let Some(field) = self.host.cursor_field()
            && !self.orchestrator.mounted_fields().contains(&field)
        {
            log::debug!("{field}: hidden while holding the cursor");
            self.host.release_cursor();
        }

        let layout = self.orchestrator.render(&state.form);
        let inputs = self.inputs();
        let registry = self.host.registry();
        let strip = self.host.strip();
        let cursor = self.host.cursor_field();

        self.terminal
            .borrow_mut()
            .draw(|f| {
                let ctx = CustomWidgetContext {
                    state: &state,
                };

                App::new(FormFrame {
                    layout: &layout,
                    inputs: &inputs,
                    registry: &registry,
                    scroll: &strip,
                    cursor,
                })
                .render(f.area(), f.buffer_mut(), &ctx);

                if let Some(position) = registry.cursor_position() {
                    f.set_cursor_position(position);
                }
            })
            .map_err(|e| eyre!("failed to render: {}", e))?;

        if registry.pending() > 0 {
            log::trace!("answering {} layout measurements", registry.pending());
        }
        registry.commit();
        strip.tick();

        Ok(())
    }

    /// Applies one terminal event. Returns false when the user quits.
    pub fn handle_event(&self, evt: &CrossTermEvent) -> bool {
        match evt {
            CrossTermEvent::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            CrossTermEvent::Mouse(mouse) => {
                self.handle_mouse(mouse);
                true
            }
            _ => true,
        }
    }

    fn handle_key(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                log::info!("APP RECEIVED CONTROL-C SEQUENCE");
                return false;
            }
            KeyCode::F(2) => {
                let theme = self.store.get_state().theme.next();
                self.store.dispatch(Action::PreviewTheme(theme));
                self.store
                    .dispatch(Action::UpdateMessage(Some(format!("theme: {theme}"))));
            }
            KeyCode::Tab => self.store.dispatch(Action::FocusNext),
            KeyCode::BackTab => self.store.dispatch(Action::FocusPrevious),
            KeyCode::Enter => {
                if let Some((input, _)) = self.active_input() {
                    input.handle_submit();
                }
            }
            KeyCode::Backspace => {
                if let Some((input, view)) = self.active_input()
                    && view.editable
                {
                    let mut value = self.current_value(view.field);
                    value.pop();
                    input.handle_change(&value);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some((input, view)) = self.active_input()
                    && view.editable
                {
                    let value = format!("{}{c}", self.current_value(view.field));
                    // the limit applies to the text as displayed
                    let is_amex = self.store.get_state().form.is_amex();
                    let shown = status::sanitize(view.field, &value, is_amex);
                    if view.max_length.is_some_and(|max| shown.chars().count() > max) {
                        return true;
                    }
                    input.handle_change(&value);
                }
            }
            _ => {}
        }

        true
    }

    fn handle_mouse(&self, mouse: &MouseEvent) {
        let registry = self.host.registry();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match registry.hit(mouse.column, mouse.row) {
                    Some(Hit::Field(field)) => {
                        if let Some(input) = self.orchestrator.field(field) {
                            input.press();
                        }
                    }
                    Some(Hit::Button) => self.store.dispatch(Action::ClearForm),
                    None => {}
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => self.scroll_by(-WHEEL_STEP),
            _ => {}
        }
    }

    fn scroll_by(&self, delta: f64) {
        if self.store.get_state().form.allow_scroll {
            self.host.strip().scroll_by(delta);
        }
    }

    // the store holds edits not yet synced into the field's props
    fn current_value(&self, field: FieldId) -> String {
        self.store.get_state().form.value(field).to_string()
    }

    // the store's focus wins over the cursor, which only moves once the
    // next frame answers the focus request
    fn active_input(&self) -> Option<(Rc<FieldInput>, InputView)> {
        let field = self
            .store
            .get_state()
            .form
            .focused
            .or(self.host.cursor_field())?;
        let input = self.orchestrator.field(field)?;
        let view = input.render();
        Some((input, view))
    }

    fn inputs(&self) -> BTreeMap<FieldId, InputView> {
        self.orchestrator
            .mounted_fields()
            .into_iter()
            .filter_map(|f| self.orchestrator.field(f))
            .map(|input| (input.field(), input.render()))
            .collect()
    }

    fn enable_terminal_raw_mode(&self) -> Result<()> {
        enable_raw_mode().wrap_err("failed to enter raw mode")?;
        // Note we must use io::stdout() directly here; the backend is
        // generic and may not be writable
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .wrap_err("failed to enter alternate screen")?;
        Ok(())
    }

    fn exit(&self) -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal
            .borrow_mut()
            .show_cursor()
            .map_err(|e| eyre!("failed to show terminal cursor: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./renderer_tests.rs"]
mod tests;
