//! Terminal UI components.
//!
//! - [`render`]: Frame layout, username field, tabs, editor and preview panes
//! - [`style`]: Theming and colors

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{layout, render};

/// Bordered username field.
pub const HEADER_ROWS: u16 = 3;
/// Tab bar.
pub const TAB_ROWS: u16 = 1;
/// Toast line plus status bar.
pub const FOOTER_ROWS: u16 = 2;
pub const BODY_LEFT_PADDING: u16 = 1;

/// Rows available to the editor or preview pane for a terminal `rows` tall.
pub const fn body_height(rows: u16) -> u16 {
    rows.saturating_sub(HEADER_ROWS + TAB_ROWS + FOOTER_ROWS)
}

#[cfg(test)]
mod tests;
