//! Viewport state for scrolling the matrix.

use super::GridLayout;

/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 200.0;

/// Default viewport width in pixels, until the host reports its own
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

/// Viewport state - the visible area of the grid.
///
/// Scroll offsets are in content coordinates: `(0, 0)` shows lane 0, column 0
/// directly under the headers. Headers never scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridViewport {
    /// Horizontal scroll position
    pub scroll_x: f64,
    /// Vertical scroll position
    pub scroll_y: f64,
    /// Viewport width in pixels, headers included
    pub width: f64,
    /// Viewport height in pixels, headers included
    pub height: f64,
}

impl Default for GridViewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl GridViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    fn content_width(&self, layout: &GridLayout) -> f64 {
        (self.width - layout.header_width).max(0.0)
    }

    fn content_height(&self, layout: &GridLayout) -> f64 {
        (self.height - layout.header_height).max(0.0)
    }

    /// Visible column range (inclusive), or `None` for a grid without columns.
    pub fn visible_columns(&self, layout: &GridLayout) -> Option<(u32, u32)> {
        let last = layout.shape.columns_per_lane.checked_sub(1)?;
        let start = layout.column_at_x(self.scroll_x).unwrap_or(last);
        let edge = self.scroll_x + self.content_width(layout);
        let end = layout.column_at_x(edge).unwrap_or(last).clamp(start, last);
        let (x, _, _, _) = layout.cell_rect(0, end);
        Some((start, trim_edge(start, end, x, edge)))
    }

    /// Visible lane range (inclusive), or `None` for a grid without lanes.
    pub fn visible_lanes(&self, layout: &GridLayout) -> Option<(u32, u32)> {
        let last = layout.shape.lanes.checked_sub(1)?;
        let start = layout.lane_at_y(self.scroll_y).unwrap_or(last);
        let edge = self.scroll_y + self.content_height(layout);
        let end = layout.lane_at_y(edge).unwrap_or(last).clamp(start, last);
        let (_, y, _, _) = layout.cell_rect(end, 0);
        Some((start, trim_edge(start, end, y, edge)))
    }

    /// Clamp scroll so the viewport never moves past the content.
    pub fn clamp_scroll(&mut self, layout: &GridLayout) {
        let max_x = (layout.content_width() - self.content_width(layout)).max(0.0);
        let max_y = (layout.content_height() - self.content_height(layout)).max(0.0);
        self.scroll_x = sanitize(self.scroll_x).clamp(0.0, max_x);
        self.scroll_y = sanitize(self.scroll_y).clamp(0.0, max_y);
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64, layout: &GridLayout) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
        self.clamp_scroll(layout);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f64, y: f64, layout: &GridLayout) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(layout);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Screen position of a cell's top-left corner, accounting for the fixed headers.
    pub fn to_screen(&self, lane: u32, column: u32, layout: &GridLayout) -> (f64, f64) {
        let (x, y, _, _) = layout.cell_rect(lane, column);
        (
            layout.header_width + x - self.scroll_x,
            layout.header_height + y - self.scroll_y,
        )
    }
}

/// A cell starting exactly at the far edge has no visible pixels.
fn trim_edge(start: u32, end: u32, end_offset: f64, edge: f64) -> u32 {
    if end > start && end_offset >= edge {
        end - 1
    } else {
        end
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
