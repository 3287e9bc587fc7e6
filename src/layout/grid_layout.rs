//! Fixed-size layout of the memory matrix.
//!
//! Every cell has the same size, so positions are computed arithmetically
//! instead of being pre-computed per row and column. A matrix can have
//! millions of columns. Positions are `f64` for that reason.

use crate::types::GridShape;

/// Default cell width in pixels
pub const DEFAULT_CELL_WIDTH: f64 = 300.0;

/// Default cell height in pixels
pub const DEFAULT_CELL_HEIGHT: f64 = 35.0;

/// Default width of the lane (row) header column in pixels
pub const DEFAULT_HEADER_WIDTH: f64 = 60.0;

/// Layout of the lanes x columns grid plus its axis headers.
///
/// Row 0 and column 0 of the rendered table are the headers; the matrix
/// itself starts below and to the right of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub shape: GridShape,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Width of the lane index header column
    pub header_width: f64,
    /// Height of the column index header row
    pub header_height: f64,
}

impl GridLayout {
    pub fn new(shape: GridShape) -> Self {
        Self::with_cell_size(shape, DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT)
    }

    pub fn with_cell_size(shape: GridShape, cell_width: f64, cell_height: f64) -> Self {
        Self {
            shape,
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
            header_width: DEFAULT_HEADER_WIDTH,
            header_height: cell_height.max(1.0),
        }
    }

    /// Width of all matrix columns, excluding the header column.
    pub fn content_width(&self) -> f64 {
        f64::from(self.shape.columns_per_lane) * self.cell_width
    }

    /// Height of all lanes, excluding the header row.
    pub fn content_height(&self) -> f64 {
        f64::from(self.shape.lanes) * self.cell_height
    }

    pub fn total_width(&self) -> f64 {
        self.header_width + self.content_width()
    }

    pub fn total_height(&self) -> f64 {
        self.header_height + self.content_height()
    }

    /// Column under content offset `x` (0 = left edge of column 0).
    pub fn column_at_x(&self, x: f64) -> Option<u32> {
        index_at(x, self.cell_width, self.shape.columns_per_lane)
    }

    /// Lane under content offset `y` (0 = top edge of lane 0).
    pub fn lane_at_y(&self, y: f64) -> Option<u32> {
        index_at(y, self.cell_height, self.shape.lanes)
    }

    /// Content-space rectangle `(x, y, width, height)` of a cell.
    pub fn cell_rect(&self, lane: u32, column: u32) -> (f64, f64, f64, f64) {
        (
            f64::from(column) * self.cell_width,
            f64::from(lane) * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }
}

/// Index of the cell containing `offset`, or `None` outside `[0, count * size)`.
/// The cast is safe: the quotient is checked against `count` first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn index_at(offset: f64, size: f64, count: u32) -> Option<u32> {
    if !offset.is_finite() || offset < 0.0 {
        return None;
    }
    let index = (offset / size).floor();
    (index < f64::from(count)).then_some(index as u32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn layout(lanes: u32, columns_per_lane: u32) -> GridLayout {
        GridLayout::new(GridShape {
            lanes,
            columns_per_lane,
        })
    }

    #[test]
    fn test_sizes() {
        let layout = layout(2, 1024);
        assert_eq!(layout.content_width(), 1024.0 * 300.0);
        assert_eq!(layout.content_height(), 70.0);
        assert_eq!(layout.total_width(), 60.0 + 1024.0 * 300.0);
        assert_eq!(layout.total_height(), 105.0);
    }

    #[test]
    fn test_hit_testing() {
        let layout = layout(2, 4);
        assert_eq!(layout.column_at_x(0.0), Some(0));
        assert_eq!(layout.column_at_x(299.9), Some(0));
        assert_eq!(layout.column_at_x(300.0), Some(1));
        assert_eq!(layout.column_at_x(1199.0), Some(3));
        assert_eq!(layout.column_at_x(1200.0), None);
        assert_eq!(layout.column_at_x(-1.0), None);
        assert_eq!(layout.lane_at_y(34.0), Some(0));
        assert_eq!(layout.lane_at_y(35.0), Some(1));
        assert_eq!(layout.lane_at_y(70.0), None);
        assert_eq!(layout.lane_at_y(f64::NAN), None);
    }

    #[test]
    fn test_huge_grid_positions_stay_exact() {
        let layout = layout(1, u32::MAX);
        let (x, _, _, _) = layout.cell_rect(0, u32::MAX - 1);
        assert_eq!(layout.column_at_x(x), Some(u32::MAX - 1));
    }

    #[test]
    fn test_cell_size_floor() {
        let layout = GridLayout::with_cell_size(
            GridShape {
                lanes: 1,
                columns_per_lane: 1,
            },
            0.0,
            -5.0,
        );
        assert_eq!(layout.cell_width, 1.0);
        assert_eq!(layout.cell_height, 1.0);
    }
}
