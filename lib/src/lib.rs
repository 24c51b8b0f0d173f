//! Field orchestration and focus navigation for credit card entry forms
//!
//! The library owns no UI. A host environment (a terminal, a GUI toolkit, a
//! test harness) implements the traits in [`host`] and the state owner
//! implements [`events::FormEvents`]; the [`orchestrator::FormOrchestrator`]
//! sits between them.
//!
//! - [`input::FieldInput`] renders one labeled field and notifies the owner
//!   when its value becomes empty or its status becomes valid.
//! - [`orchestrator::FormOrchestrator`] computes per-field props from the
//!   shared [`state::FormState`] and [`config::FormConfig`], decides which
//!   optional fields are visible, lays them out and follows focus.
//! - [`locate::LocateChain`] finds a field's offset inside the scroll strip
//!   using whichever measurement API the host offers, and [`focus`] scrolls
//!   the strip before focusing the field.
//!
//! # Example
//!
//! The `cardform-term` crate in this workspace hosts the form in a terminal:
//!
//! ```bash
//! cargo run -p cardform-term -- --requires-name --debug
//! ```

#![deny(missing_docs)]
pub mod card;
pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod focus;
pub mod host;
pub mod input;
pub mod locate;
pub mod orchestrator;
pub mod props;
pub mod state;
