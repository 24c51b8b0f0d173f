//! Terminal UI components and colors.

pub mod app;
pub mod colors;
pub mod components;
pub mod traits;
