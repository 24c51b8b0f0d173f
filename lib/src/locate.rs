//! Strategies for locating a field's horizontal offset inside the scroll
//! strip
//!
//! Hosts differ in which measurement APIs they offer. A [`LocateChain`] holds
//! the strategies in preference order; the first one that is available in the
//! current environment is asked to measure, and a failed measurement falls
//! through to the next available strategy.

#[cfg(test)]
use mockall::automock;

use std::{
    fmt::Display,
    rc::{Rc, Weak},
};

use crate::{
    field::{FieldId, NodeHandle},
    host::{LayoutManager, MeasureCallback, Measurement, TextWidget},
};

/// Names the measurement approach a strategy uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateKind {
    /// Layout manager measures the node relative to the scroll container
    LayoutManager,
    /// Legacy parent-relative measurement
    ParentRelative,
    /// The widget measures itself relative to the scroll container
    WidgetRelative,
    /// The widget reports its absolute page position
    WidgetPage,
}

impl Display for LocateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocateKind::LayoutManager => "layout-manager",
            LocateKind::ParentRelative => "parent-relative",
            LocateKind::WidgetRelative => "widget-relative",
            LocateKind::WidgetPage => "widget-page",
        };
        write!(f, "{name}")
    }
}

/// What to locate and relative to what
#[derive(Clone)]
pub struct LocateRequest {
    /// Field being located
    pub field: FieldId,
    /// Node of the field's text widget
    pub node: NodeHandle,
    /// Node of the scroll container
    pub container: NodeHandle,
    /// The field's text widget
    pub widget: Weak<dyn TextWidget>,
}

/// One way of measuring a field's offset
#[cfg_attr(test, automock)]
pub trait LocateStrategy {
    /// Which approach this is, for logging
    fn kind(&self) -> LocateKind;

    /// Whether the environment offers what this strategy needs
    fn is_available(&self, request: &LocateRequest) -> bool;

    /// Measure the field; `done` may run now or on a later event loop turn
    fn locate(&self, request: &LocateRequest, done: MeasureCallback);
}

/// Measures through the host layout manager relative to the container
pub struct LayoutManagerLocate {
    manager: Rc<dyn LayoutManager>,
}

impl LayoutManagerLocate {
    /// Returns a strategy backed by `manager`
    pub fn new(manager: Rc<dyn LayoutManager>) -> Self {
        Self { manager }
    }
}

impl LocateStrategy for LayoutManagerLocate {
    fn kind(&self) -> LocateKind {
        LocateKind::LayoutManager
    }

    fn is_available(&self, _request: &LocateRequest) -> bool {
        self.manager.supports_measure_layout()
    }

    fn locate(&self, request: &LocateRequest, done: MeasureCallback) {
        self.manager
            .measure_layout(request.node, request.container, done)
    }
}

/// Measures through the legacy parent-relative layout API
pub struct ParentRelativeLocate {
    manager: Rc<dyn LayoutManager>,
}

impl ParentRelativeLocate {
    /// Returns a strategy backed by `manager`
    pub fn new(manager: Rc<dyn LayoutManager>) -> Self {
        Self { manager }
    }
}

impl LocateStrategy for ParentRelativeLocate {
    fn kind(&self) -> LocateKind {
        LocateKind::ParentRelative
    }

    fn is_available(&self, _request: &LocateRequest) -> bool {
        self.manager.supports_relative_to_parent()
    }

    fn locate(&self, request: &LocateRequest, done: MeasureCallback) {
        self.manager.measure_relative_to_parent(request.node, done)
    }
}

/// Asks the widget to measure itself relative to the container
#[derive(Default)]
pub struct WidgetRelativeLocate;

impl LocateStrategy for WidgetRelativeLocate {
    fn kind(&self) -> LocateKind {
        LocateKind::WidgetRelative
    }

    fn is_available(&self, request: &LocateRequest) -> bool {
        request
            .widget
            .upgrade()
            .is_some_and(|w| w.can_measure_layout())
    }

    fn locate(&self, request: &LocateRequest, done: MeasureCallback) {
        match request.widget.upgrade() {
            Some(widget) => widget.measure_layout(request.container, done),
            None => done(Measurement::Failed),
        }
    }
}

/// Asks the widget for its absolute page position
#[derive(Default)]
pub struct WidgetPageLocate;

impl LocateStrategy for WidgetPageLocate {
    fn kind(&self) -> LocateKind {
        LocateKind::WidgetPage
    }

    fn is_available(&self, request: &LocateRequest) -> bool {
        request
            .widget
            .upgrade()
            .is_some_and(|w| w.can_measure_in_page())
    }

    fn locate(&self, request: &LocateRequest, done: MeasureCallback) {
        match request.widget.upgrade() {
            Some(widget) => widget.measure_in_page(done),
            None => done(Measurement::Failed),
        }
    }
}

/// Ordered list of locate strategies
pub struct LocateChain {
    strategies: Vec<Rc<dyn LocateStrategy>>,
}

impl LocateChain {
    /// Returns a chain trying `strategies` in order
    pub fn new(strategies: Vec<Rc<dyn LocateStrategy>>) -> Self {
        Self { strategies }
    }

    /// The usual preference order. The layout manager strategies are only
    /// present when the host has a layout manager.
    pub fn standard(manager: Option<Rc<dyn LayoutManager>>) -> Self {
        let mut strategies: Vec<Rc<dyn LocateStrategy>> = Vec::new();

        if let Some(manager) = manager {
            strategies.push(Rc::new(LayoutManagerLocate::new(Rc::clone(&manager))));
            strategies.push(Rc::new(ParentRelativeLocate::new(manager)));
        }

        strategies.push(Rc::new(WidgetRelativeLocate));
        strategies.push(Rc::new(WidgetPageLocate));

        Self { strategies }
    }

    /// Number of strategies in the chain
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the chain has no strategies
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Kinds in preference order
    pub fn kinds(&self) -> Vec<LocateKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// First available strategy at or after position `from`, with its
    /// position
    pub fn next_available(
        &self,
        from: usize,
        request: &LocateRequest,
    ) -> Option<(usize, Rc<dyn LocateStrategy>)> {
        self.strategies
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, s)| s.is_available(request))
            .map(|(i, s)| (i, Rc::clone(s)))
    }
}

impl Default for LocateChain {
    fn default() -> Self {
        Self::standard(None)
    }
}

#[cfg(test)]
#[path = "./locate_tests.rs"]
mod tests;
