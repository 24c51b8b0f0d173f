//! Terminal implementation of the form host capabilities.

use cardform::{
    field::{FieldId, NodeHandle},
    host::{FormHost, MeasureCallback, ScrollContainer, TextWidget},
    input::FieldInput,
};
use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use crate::host::{
    registry::{LayoutRegistry, node_of},
    strip::StripScroll,
};

pub mod registry;
pub mod strip;

/// Which field currently owns the terminal cursor and receives key presses
pub type CursorOwner = Rc<Cell<Option<FieldId>>>;

/// Text widget backing one field. Keys are routed to whichever widget owns
/// the cursor.
pub struct TermTextWidget {
    field: FieldId,
    input: Weak<FieldInput>,
    cursor: CursorOwner,
    registry: Rc<LayoutRegistry>,
}

impl TermTextWidget {
    pub fn new(
        field: FieldId,
        input: Weak<FieldInput>,
        cursor: CursorOwner,
        registry: Rc<LayoutRegistry>,
    ) -> Self {
        Self {
            field,
            input,
            cursor,
            registry,
        }
    }
}

impl TextWidget for TermTextWidget {
    fn node(&self) -> Option<NodeHandle> {
        Some(node_of(self.field))
    }

    fn focus(&self) {
        let previous = self.cursor.replace(Some(self.field));
        if previous == Some(self.field) {
            return;
        }

        log::debug!("{}: cursor moved from {:?}", self.field, previous);

        if let Some(input) = self.input.upgrade() {
            input.handle_focus();
        }
    }

    fn can_measure_layout(&self) -> bool {
        true
    }

    fn measure_layout(&self, ancestor: NodeHandle, done: MeasureCallback) {
        cardform::host::LayoutManager::measure_layout(
            self.registry.as_ref(),
            node_of(self.field),
            ancestor,
            done,
        );
    }
}

/// Hosts the card form in the terminal
pub struct TermHost {
    registry: Rc<LayoutRegistry>,
    strip: Rc<StripScroll>,
    cursor: CursorOwner,
}

impl Default for TermHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TermHost {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(LayoutRegistry::new()),
            strip: Rc::new(StripScroll::new()),
            cursor: Rc::new(Cell::new(None)),
        }
    }

    pub fn registry(&self) -> Rc<LayoutRegistry> {
        Rc::clone(&self.registry)
    }

    pub fn strip(&self) -> Rc<StripScroll> {
        Rc::clone(&self.strip)
    }

    /// Field owning the cursor
    pub fn cursor_field(&self) -> Option<FieldId> {
        self.cursor.get()
    }

    /// Drops the cursor, e.g. when its field is hidden
    pub fn release_cursor(&self) {
        self.cursor.set(None);
    }
}

impl FormHost for TermHost {
    fn create_widget(
        &self,
        field: FieldId,
        input: Weak<FieldInput>,
    ) -> Option<Rc<dyn TextWidget>> {
        Some(Rc::new(TermTextWidget::new(
            field,
            input,
            Rc::clone(&self.cursor),
            Rc::clone(&self.registry),
        )))
    }

    fn scroll_container(&self) -> Option<Rc<dyn ScrollContainer>> {
        Some(self.strip.clone() as Rc<dyn ScrollContainer>)
    }
}

#[cfg(test)]
#[path = "./host_tests.rs"]
mod tests;
