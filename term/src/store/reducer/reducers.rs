pub mod focus;
pub mod form;
pub mod ui;
