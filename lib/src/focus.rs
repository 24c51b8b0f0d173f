//! Focus-follow: scroll a field into view, then focus it
//!
//! A focus request measures the target through the [`LocateChain`], scrolls
//! the strip so the target sits `look_back` units from the leading edge and
//! finally focuses it. Measurements may complete on a later event loop turn,
//! so the in-flight request lives in a single slot keyed by a ticket. A newer
//! request overwrites the slot and any completion carrying an older ticket is
//! dropped.

use log::*;
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{
    field::FieldId,
    host::{Measurement, ScrollContainer},
    input::FieldInput,
    locate::{LocateChain, LocateRequest},
};

/// Observable state of the follower
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    /// No focus request in flight
    Idle,
    /// Waiting on a measurement before focusing the field
    FocusRequested(FieldId),
}

/// Where to scroll so that offset `x` sits `look_back` units from the
/// leading edge
pub fn scroll_destination(x: f64, look_back: f64) -> f64 {
    (x - look_back).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFocus {
    ticket: u64,
    field: FieldId,
}

type Slot = Rc<RefCell<Option<PendingFocus>>>;

struct FocusSequence {
    ticket: u64,
    field: FieldId,
    slot: Slot,
    container: Option<Weak<dyn ScrollContainer>>,
    target: Weak<FieldInput>,
    request: Option<LocateRequest>,
    chain: Rc<LocateChain>,
    look_back: f64,
}

impl FocusSequence {
    fn is_current(&self) -> bool {
        self.slot.borrow().as_ref().map(|p| p.ticket) == Some(self.ticket)
    }

    fn attempt(self: Rc<Self>, from: usize) {
        if !self.is_current() {
            debug!("{}: focus request superseded", self.field);
            return;
        }

        let Some(request) = &self.request else {
            self.finish(None);
            return;
        };

        let Some((index, strategy)) = self.chain.next_available(from, request) else {
            debug!("{}: no locate strategy available", self.field);
            self.finish(None);
            return;
        };

        let kind = strategy.kind();
        debug!("{}: locating with {kind}", self.field);

        let sequence = Rc::clone(&self);
        strategy.locate(
            request,
            Box::new(move |measurement| match measurement {
                Measurement::Offset(x) => sequence.finish(Some(x)),
                Measurement::Failed => {
                    debug!("{}: {kind} failed", sequence.field);
                    sequence.attempt(index + 1);
                }
            }),
        );
    }

    fn finish(&self, offset: Option<f64>) {
        if !self.is_current() {
            debug!("{}: dropping stale measurement", self.field);
            return;
        }

        if let Some(x) = offset
            && let Some(container) = self.container.as_ref().and_then(Weak::upgrade)
            && container.node().is_some()
        {
            let destination = scroll_destination(x, self.look_back);
            debug!("{}: scrolling to {destination}", self.field);
            container.scroll_to(destination, true);
        }

        self.slot.replace(None);

        match self.target.upgrade() {
            Some(target) => target.focus(),
            None => debug!("{}: target unmounted before focus", self.field),
        }
    }
}

/// Drives focus requests, at most one in flight
#[derive(Default)]
pub struct FocusFollower {
    slot: Slot,
    next_ticket: Cell<u64>,
}

impl FocusFollower {
    /// Current phase
    pub fn phase(&self) -> FocusPhase {
        match *self.slot.borrow() {
            Some(pending) => FocusPhase::FocusRequested(pending.field),
            None => FocusPhase::Idle,
        }
    }

    /// Starts following focus to `target`, superseding any request in flight
    pub fn request(
        &self,
        target: &Rc<FieldInput>,
        container: Option<Rc<dyn ScrollContainer>>,
        chain: &Rc<LocateChain>,
        look_back: f64,
    ) {
        let field = target.field();
        let ticket = self.next_ticket.get().wrapping_add(1);
        self.next_ticket.set(ticket);

        if let Some(previous) = self.slot.replace(Some(PendingFocus { ticket, field })) {
            debug!("{}: superseded by {field}", previous.field);
        }

        let container_node = container.as_ref().and_then(|c| c.node());
        let widget = target.widget();
        let request = match (container_node, widget) {
            (Some(container), Some(widget)) => widget.node().map(|node| LocateRequest {
                field,
                node,
                container,
                widget: Rc::downgrade(&widget),
            }),
            _ => None,
        };

        if request.is_none() {
            debug!("{field}: container or widget not mounted, focusing without scroll");
        }

        let sequence = Rc::new(FocusSequence {
            ticket,
            field,
            slot: Rc::clone(&self.slot),
            container: container.as_ref().map(Rc::downgrade),
            target: Rc::downgrade(target),
            request,
            chain: Rc::clone(chain),
            look_back,
        });

        sequence.attempt(0);
    }
}

#[cfg(test)]
#[path = "./focus_tests.rs"]
mod tests;
