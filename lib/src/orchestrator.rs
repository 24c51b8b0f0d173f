//! Owns the fields of one card form and drives focus-follow
//!
//! The orchestrator reads the owner's [`FormState`] on every update, keeps
//! one [`FieldInput`] per visible field in sync with it and starts a focus
//! request whenever the owner's focused field changes. [`FormOrchestrator::render`]
//! describes the card face and the field strip; hosts decide how to draw it.
//!
//! `E` is whatever element type the host's render-button slot produces.

use derive_builder::Builder;
use log::*;
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

use crate::{
    card::CardFaceProps,
    config::FormConfig,
    error::Result,
    events::FormEvents,
    field::FieldId,
    focus::{FocusFollower, FocusPhase},
    host::FormHost,
    input::FieldInput,
    locate::LocateChain,
    props::{FieldProps, compute_field_props},
    state::FormState,
};

/// Axis the field strip flows along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripDirection {
    /// All fields in one horizontally scrolling row
    Horizontal,
    /// Fields stacked in rows
    Vertical,
}

/// Distribution of items within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowJustify {
    /// First item at the start, last at the end
    SpaceBetween,
    /// Items packed at the start
    FlexStart,
}

/// One entry of the field strip
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem<E> {
    /// A field input with its container width
    Field {
        /// Field to draw
        field: FieldId,
        /// Container width
        width: f64,
    },
    /// Element produced by the render-button slot
    Element(E),
    /// Items sharing a row in vertical layout
    Row {
        /// How the row spreads its items
        justify: RowJustify,
        /// Row contents
        items: Vec<LayoutItem<E>>,
    },
}

impl<E> LayoutItem<E> {
    fn collect_fields(&self, out: &mut Vec<FieldId>) {
        match self {
            LayoutItem::Field { field, .. } => out.push(*field),
            LayoutItem::Element(_) => {}
            LayoutItem::Row { items, .. } => {
                items.iter().for_each(|item| item.collect_fields(out))
            }
        }
    }
}

/// Result of rendering the form
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout<E> {
    /// Props for the card face collaborator
    pub card: CardFaceProps,
    /// Direction of the field strip
    pub direction: StripDirection,
    /// Whether the user may scroll the strip by hand
    pub scroll_enabled: bool,
    /// Strip contents in draw order
    pub items: Vec<LayoutItem<E>>,
}

impl<E> FormLayout<E> {
    /// Fields in the strip in draw order
    pub fn fields(&self) -> Vec<FieldId> {
        let mut fields = Vec::new();
        self.items
            .iter()
            .for_each(|item| item.collect_fields(&mut fields));
        fields
    }
}

type RenderButton<E> = Rc<dyn Fn() -> Option<E>>;

/// Orchestrates the fields of one card form
#[derive(Builder)]
#[builder(pattern = "owned", build_fn(private, name = "_build"))]
pub struct FormOrchestrator<E> {
    /// Labels, placeholders, styles, widths and overrides
    #[builder(default)]
    config: FormConfig,
    /// Receives user-facing events
    events: Rc<dyn FormEvents>,
    /// Creates text widgets and exposes the scroll container
    host: Rc<dyn FormHost>,
    /// Strategies used to locate a field before scrolling to it
    #[builder(default = "Rc::new(LocateChain::default())")]
    chain: Rc<LocateChain>,
    /// Supplies the element placed after the number field
    #[builder(default, setter(custom))]
    render_button: Option<RenderButton<E>>,
    #[builder(setter(skip))]
    fields: RefCell<BTreeMap<FieldId, Rc<FieldInput>>>,
    #[builder(setter(skip))]
    previous_focus: Cell<Option<FieldId>>,
    #[builder(setter(skip))]
    mounted: Cell<bool>,
    #[builder(setter(skip))]
    follower: FocusFollower,
}

impl<E> FormOrchestratorBuilder<E> {
    /// Sets the function rendering the element placed right after the number
    /// field. It runs on every render.
    pub fn render_button(mut self, render: impl Fn() -> Option<E> + 'static) -> Self {
        self.render_button = Some(Some(Rc::new(render)));
        self
    }

    /// Builds the orchestrator and validates its configuration
    pub fn build(self) -> Result<FormOrchestrator<E>> {
        let orchestrator = self._build()?;
        orchestrator.config.validate()?;
        Ok(orchestrator)
    }
}

impl<E> FormOrchestrator<E> {
    /// Returns builder for FormOrchestrator
    pub fn builder() -> FormOrchestratorBuilder<E> {
        FormOrchestratorBuilder::default()
    }

    /// The configuration the orchestrator renders with
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Creates the visible fields and follows the initial focus, if any
    pub fn mount(&self, state: &FormState) {
        debug!("mounting card form");
        self.sync_fields(state);
        self.mounted.set(true);
        self.previous_focus.set(state.focused);

        if let Some(field) = state.focused {
            self.request_focus(field);
        }
    }

    /// Applies a new state snapshot from the owner. Fields are updated
    /// first, then focus is followed when the focused field changed.
    pub fn update(&self, state: &FormState) {
        if !self.mounted.get() {
            self.mount(state);
            return;
        }

        self.sync_fields(state);

        let previous = self.previous_focus.replace(state.focused);
        if previous == state.focused {
            return;
        }

        match state.focused {
            Some(field) => self.request_focus(field),
            None => debug!("focus cleared"),
        }
    }

    /// Drops every field and its widget
    pub fn unmount(&self) {
        debug!("unmounting card form");
        let fields = std::mem::take(&mut *self.fields.borrow_mut());
        fields.values().for_each(|input| input.unmount_widget());
        self.mounted.set(false);
        self.previous_focus.set(None);
    }

    /// Full render props of a field for `state`
    pub fn field_props(&self, state: &FormState, field: FieldId) -> FieldProps {
        compute_field_props(&self.config, state, field)
    }

    /// The mounted input of a field
    pub fn field(&self, field: FieldId) -> Option<Rc<FieldInput>> {
        self.fields.borrow().get(&field).cloned()
    }

    /// Fields currently mounted, in tab order
    pub fn mounted_fields(&self) -> Vec<FieldId> {
        self.fields.borrow().keys().copied().collect()
    }

    /// Phase of the focus follower
    pub fn focus_phase(&self) -> FocusPhase {
        self.follower.phase()
    }

    /// Describes the card face and the field strip for `state`
    pub fn render(&self, state: &FormState) -> FormLayout<E> {
        let mut button = self.render_button.as_ref().and_then(|render| render());
        let item = |field: FieldId| LayoutItem::Field {
            field,
            width: self.config.width_of(field),
        };

        let (direction, items) = if state.vertical_fields {
            let mut items = Vec::new();

            let mut number_row = vec![item(FieldId::Number)];
            number_row.extend(button.take().map(LayoutItem::Element));
            items.push(LayoutItem::Row {
                justify: RowJustify::SpaceBetween,
                items: number_row,
            });

            let mut data_row = vec![item(FieldId::Expiry)];
            if state.is_visible(FieldId::Cvc) {
                data_row.push(item(FieldId::Cvc));
            }
            items.push(LayoutItem::Row {
                justify: RowJustify::SpaceBetween,
                items: data_row,
            });

            if state.is_visible(FieldId::Name) {
                items.push(LayoutItem::Row {
                    justify: RowJustify::FlexStart,
                    items: vec![item(FieldId::Name)],
                });
            }

            if state.is_visible(FieldId::PostalCode) {
                items.push(item(FieldId::PostalCode));
            }

            (StripDirection::Vertical, items)
        } else {
            let mut items = Vec::new();
            for field in state.visible_fields() {
                items.push(item(field));
                if field == FieldId::Number {
                    items.extend(button.take().map(LayoutItem::Element));
                }
            }
            (StripDirection::Horizontal, items)
        };

        FormLayout {
            card: CardFaceProps::new(&self.config, state),
            direction,
            scroll_enabled: state.allow_scroll,
            items,
        }
    }

    fn sync_fields(&self, state: &FormState) {
        let visible = state.visible_fields();

        let removed: Vec<Rc<FieldInput>> = {
            let mut fields = self.fields.borrow_mut();
            let gone: Vec<FieldId> = fields
                .keys()
                .filter(|f| !visible.contains(f))
                .copied()
                .collect();
            gone.iter().filter_map(|f| fields.remove(f)).collect()
        };

        for input in removed {
            debug!("{}: field hidden, unmounting", input.field());
            input.unmount_widget();
        }

        for field in visible {
            let props = self.field_props(state, field);
            let existing = self.field(field);

            match existing {
                Some(input) => input.update(props),
                None => {
                    debug!("{field}: mounting field");
                    let input = Rc::new(FieldInput::new(props, Rc::clone(&self.events)));
                    match self.host.create_widget(field, Rc::downgrade(&input)) {
                        Some(widget) => input.mount_widget(widget),
                        None => warn!("{field}: host did not provide a text widget"),
                    }
                    self.fields.borrow_mut().insert(field, input);
                }
            }
        }
    }

    fn request_focus(&self, field: FieldId) {
        let Some(target) = self.field(field) else {
            debug!("{field}: focus requested for a field that is not rendered");
            return;
        };

        debug!("{field}: following focus");
        self.follower.request(
            &target,
            self.host.scroll_container(),
            &self.chain,
            self.config.look_back_offset,
        );
    }
}

#[cfg(test)]
#[path = "./orchestrator_tests.rs"]
mod tests;
