//! Reusable UI components (card face, field box, field strip, footer).

pub mod card_face;
pub mod field_box;
pub mod field_strip;
pub mod footer;
