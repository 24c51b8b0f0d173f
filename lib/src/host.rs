//! Capabilities the core expects from the environment that hosts the form
//!
//! A host hands the orchestrator text widgets and a scroll container and
//! may offer layout measurement. Every measurement capability is optional;
//! the `can_*` / `supports_*` probes let the locate chain skip what the
//! current environment lacks.

#[cfg(test)]
use mockall::automock;

use std::rc::{Rc, Weak};

use crate::{
    field::{FieldId, NodeHandle},
    input::FieldInput,
};

/// Outcome of a layout measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Horizontal offset of the measured node
    Offset(f64),
    /// The host could not measure the node
    Failed,
}

/// Completion callback for a measurement. Hosts may call it synchronously
/// or on a later turn of their event loop.
pub type MeasureCallback = Box<dyn FnOnce(Measurement)>;

/// The editable text primitive underneath a [`FieldInput`]
#[cfg_attr(test, automock)]
pub trait TextWidget {
    /// Handle of the mounted node, `None` once unmounted
    fn node(&self) -> Option<NodeHandle>;

    /// Whether the widget is able to take input focus
    fn can_focus(&self) -> bool {
        true
    }

    /// Take input focus
    fn focus(&self);

    /// Whether the widget can measure itself relative to an ancestor
    fn can_measure_layout(&self) -> bool {
        false
    }

    /// Measure the widget's horizontal offset relative to `ancestor`
    fn measure_layout(&self, _ancestor: NodeHandle, done: MeasureCallback) {
        done(Measurement::Failed)
    }

    /// Whether the widget can report its absolute page position
    fn can_measure_in_page(&self) -> bool {
        false
    }

    /// Measure the widget's absolute horizontal page position
    fn measure_in_page(&self, done: MeasureCallback) {
        done(Measurement::Failed)
    }
}

/// The scrollable strip holding the field inputs
#[cfg_attr(test, automock)]
pub trait ScrollContainer {
    /// Handle of the mounted container, `None` once unmounted
    fn node(&self) -> Option<NodeHandle>;

    /// Scroll so that horizontal offset `x` is at the leading edge
    fn scroll_to(&self, x: f64, animated: bool);
}

/// Host-wide layout measurement service
#[cfg_attr(test, automock)]
pub trait LayoutManager {
    /// Whether nodes can be measured relative to an arbitrary ancestor
    fn supports_measure_layout(&self) -> bool;

    /// Measure `node`'s horizontal offset relative to `ancestor`
    fn measure_layout(&self, node: NodeHandle, ancestor: NodeHandle, done: MeasureCallback);

    /// Whether the legacy parent-relative measurement exists
    fn supports_relative_to_parent(&self) -> bool {
        false
    }

    /// Measure `node`'s horizontal offset relative to its parent
    fn measure_relative_to_parent(&self, _node: NodeHandle, done: MeasureCallback) {
        done(Measurement::Failed)
    }
}

/// Environment the orchestrator mounts its fields into
#[cfg_attr(test, automock)]
pub trait FormHost {
    /// Create the text widget backing `field`. The widget may keep `input` to
    /// report focus and edits back to the field.
    fn create_widget(
        &self,
        field: FieldId,
        input: Weak<FieldInput>,
    ) -> Option<Rc<dyn TextWidget>>;

    /// The scroll container currently holding the fields, if mounted
    fn scroll_container(&self) -> Option<Rc<dyn ScrollContainer>>;
}
