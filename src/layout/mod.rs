//! Grid layout for displaying the memory matrix.
//!
//! This module handles:
//! - Cell positions in a fixed-size grid with lane/column axis headers
//! - Viewport state (scroll position, visible lane and column ranges)
//! - Building the labeled window a host draws for the current pass

mod grid_layout;
mod labels;
mod viewport;

pub use grid_layout::{GridLayout, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_HEADER_WIDTH};
pub use labels::LabelSheet;
pub use viewport::{GridViewport, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
