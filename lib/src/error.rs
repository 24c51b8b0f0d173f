//! Custom Error and Result types for this library

use thiserror::Error;

use crate::orchestrator::FormOrchestratorBuilderError;

/// Custom Error type for this library
#[derive(Error, Debug)]
pub enum CardFormError {
    /// A string did not name one of the five card fields
    #[error("unknown field identifier: {_0}")]
    UnknownField(String),

    /// A string did not name a field status
    #[error("unknown field status: {_0}")]
    UnknownStatus(String),

    /// Configuration values that cannot produce a layout
    #[error("invalid form configuration: {_0}")]
    InvalidConfig(String),

    /// Error resulting from failure to build a form orchestrator
    #[error("failed to build form orchestrator: {_0}")]
    OrchestratorBuild(#[from] FormOrchestratorBuilderError),
}

/// Custom Result type for this library. All Errors exposed by this library
/// will be returned as [`CardFormError`]
pub type Result<T> = std::result::Result<T, CardFormError>;
