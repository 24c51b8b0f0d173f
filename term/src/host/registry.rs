//! Per-frame record of where the form's nodes were drawn
//!
//! Rendering records each node's rectangle in strip coordinates (the
//! content rect) and, when any part of it is on screen, the clipped screen
//! rect. Measurements are answered from the content rects, but only after
//! the frame has been committed, so a focus request made before a draw is
//! resolved against the layout that draw produced.

use cardform::{
    field::{FieldId, NodeHandle},
    host::{LayoutManager, MeasureCallback, Measurement},
};
use ratatui::layout::{Position, Rect};
use std::{cell::RefCell, collections::HashMap};

/// Handle of the scroll strip. Field handles start after it.
pub const STRIP_NODE: NodeHandle = NodeHandle(0);

/// Handle of a field's text widget
pub fn node_of(field: FieldId) -> NodeHandle {
    NodeHandle(1 + field.ordinal() as u64)
}

/// Field rendered at a node, if the node is a field
pub fn field_of(node: NodeHandle) -> Option<FieldId> {
    let ordinal = node.0.checked_sub(1)?;
    FieldId::all().find(|f| f.ordinal() as u64 == ordinal)
}

/// What the user clicked on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Field(FieldId),
    Button,
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    content: Rect,
    screen: Option<Rect>,
}

struct PendingMeasure {
    node: NodeHandle,
    ancestor: NodeHandle,
    done: MeasureCallback,
}

/// Node placements of the last frame plus measurements waiting for the
/// next commit
#[derive(Default)]
pub struct LayoutRegistry {
    placements: RefCell<HashMap<NodeHandle, Placement>>,
    button: RefCell<Option<Rect>>,
    cursor: RefCell<Option<Position>>,
    pending: RefCell<Vec<PendingMeasure>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the previous frame's placements
    pub fn begin_frame(&self) {
        self.placements.borrow_mut().clear();
        self.button.replace(None);
        self.cursor.replace(None);
    }

    /// Records where a node was laid out and, if visible, drawn
    pub fn record(&self, node: NodeHandle, content: Rect, screen: Option<Rect>) {
        self.placements
            .borrow_mut()
            .insert(node, Placement { content, screen });
    }

    /// Records where the render-button element was drawn
    pub fn record_button(&self, screen: Rect) {
        self.button.replace(Some(screen));
    }

    /// Records where the terminal cursor belongs this frame
    pub fn set_cursor(&self, position: Position) {
        self.cursor.replace(Some(position));
    }

    /// Cursor position recorded this frame, `None` when the field owning the
    /// cursor is off screen
    pub fn cursor_position(&self) -> Option<Position> {
        *self.cursor.borrow()
    }

    /// Content rect of a node in the last frame
    pub fn content_rect(&self, node: NodeHandle) -> Option<Rect> {
        self.placements.borrow().get(&node).map(|p| p.content)
    }

    /// On-screen rect of a node in the last frame, `None` when scrolled out
    /// of view
    pub fn screen_rect(&self, node: NodeHandle) -> Option<Rect> {
        self.placements.borrow().get(&node).and_then(|p| p.screen)
    }

    /// What was drawn at a terminal cell
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let position = Position::new(column, row);

        if let Some(button) = *self.button.borrow()
            && button.contains(position)
        {
            return Some(Hit::Button);
        }

        self.placements
            .borrow()
            .keys()
            .copied()
            .filter(|node| self.screen_rect(*node).is_some_and(|s| s.contains(position)))
            .find_map(field_of)
            .map(Hit::Field)
    }

    /// Number of measurements waiting for the next commit
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answers every queued measurement from the current placements
    pub fn commit(&self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());

        for request in pending {
            let measurement = self.offset_between(request.node, request.ancestor);
            log::trace!(
                "measured {:?} against {:?}: {:?}",
                request.node,
                request.ancestor,
                measurement
            );
            (request.done)(measurement);
        }
    }

    fn offset_between(&self, node: NodeHandle, ancestor: NodeHandle) -> Measurement {
        let node = self.content_rect(node);
        let ancestor = if ancestor == STRIP_NODE {
            Some(Rect::default())
        } else {
            self.content_rect(ancestor)
        };

        match (node, ancestor) {
            (Some(node), Some(ancestor)) => {
                Measurement::Offset(f64::from(node.x) - f64::from(ancestor.x))
            }
            _ => Measurement::Failed,
        }
    }
}

impl LayoutManager for LayoutRegistry {
    fn supports_measure_layout(&self) -> bool {
        true
    }

    fn measure_layout(&self, node: NodeHandle, ancestor: NodeHandle, done: MeasureCallback) {
        self.pending.borrow_mut().push(PendingMeasure {
            node,
            ancestor,
            done,
        });
    }
}

#[cfg(test)]
#[path = "./registry_tests.rs"]
mod tests;
