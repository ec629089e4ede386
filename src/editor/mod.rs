//! Editing surface for the markdown buffer.
//!
//! A rope-backed text area with a char-based cursor, driven by the TEA
//! update loop.

mod text_area;

pub use text_area::{Cursor, Motion, TextArea};
