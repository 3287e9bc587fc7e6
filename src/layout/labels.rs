//! Labeled window of the matrix for display.
//!
//! A [`LabelSheet`] is what a host draws for one pass: the axis headers
//! (lane indices down the side, column indices across the top) and one
//! formula label per visible cell.

use serde::Serialize;

use crate::error::{Result, VizError};
use crate::session::Run;
use crate::types::{CellAddress, GridShape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSheet {
    pub pass: u32,
    pub iterations: u32,
    pub variant: String,
    pub lanes: u32,
    pub columns_per_lane: u32,
    /// Lane indices of the rows, top to bottom
    pub lane_headers: Vec<u32>,
    /// Column indices, left to right
    pub column_headers: Vec<u32>,
    /// `rows[i][j]` is the label of `B[lane_headers[i]][column_headers[j]]`
    pub rows: Vec<Vec<String>>,
}

impl LabelSheet {
    /// Label the inclusive `lanes` x `columns` window of `run` at its current pass.
    ///
    /// Fails with `CellOutOfRange` if the window reaches outside the grid. A window
    /// whose start is past its end is empty.
    pub fn build(run: &Run, lanes: (u32, u32), columns: (u32, u32)) -> Result<Self> {
        let shape = run.shape();
        if lanes.0 <= lanes.1 && lanes.1 >= shape.lanes {
            return Err(out_of_range(shape, lanes.1, columns.0));
        }
        if columns.0 <= columns.1 && columns.1 >= shape.columns_per_lane {
            return Err(out_of_range(shape, lanes.0, columns.1));
        }

        let lane_headers: Vec<u32> = (lanes.0..=lanes.1).collect();
        let column_headers: Vec<u32> = (columns.0..=columns.1).collect();

        let rows = lane_headers
            .iter()
            .map(|&lane| {
                column_headers
                    .iter()
                    .map(|&column| {
                        run.cell_formula(CellAddress::new(lane, column))
                            .map(|f| f.to_string())
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pass: run.current_pass(),
            iterations: run.iterations(),
            variant: run.config().variant.label().to_string(),
            lanes: run.lane_count(),
            columns_per_lane: run.columns_per_lane(),
            lane_headers,
            column_headers,
            rows,
        })
    }

    /// Number of labeled cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Plain-text table with the header row and column, each column padded to its widest entry.
    pub fn to_text_table(&self) -> String {
        let corner = "lane\\col".to_string();
        let mut table: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        table.push(
            std::iter::once(corner)
                .chain(self.column_headers.iter().map(u32::to_string))
                .collect(),
        );
        for (lane, labels) in self.lane_headers.iter().zip(&self.rows) {
            table.push(
                std::iter::once(lane.to_string())
                    .chain(labels.iter().cloned())
                    .collect(),
            );
        }

        let column_count = self.column_headers.len() + 1;
        let widths: Vec<usize> = (0..column_count)
            .map(|c| {
                table
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for row in &table {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            out.push_str(line.join(" | ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn out_of_range(shape: GridShape, lane: u32, column: u32) -> VizError {
    VizError::CellOutOfRange {
        lane,
        column,
        lanes: shape.lanes,
        columns: shape.columns_per_lane,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::error::VizError;
    use crate::types::{Config, Variant};

    fn run(memory: u32, iterations: u32, parallelism: u32) -> Run {
        Run::new(Config::new(memory, iterations, parallelism, Variant::Argon2id)).unwrap()
    }

    #[test]
    fn test_build_first_pass() {
        let sheet = LabelSheet::build(&run(2048, 3, 2), (0, 1), (0, 2)).unwrap();
        assert_eq!(sheet.pass, 1);
        assert_eq!(sheet.variant, "Argon2id");
        assert_eq!(sheet.lane_headers, vec![0, 1]);
        assert_eq!(sheet.column_headers, vec![0, 1, 2]);
        assert_eq!(sheet.cell_count(), 6);
        assert_eq!(sheet.rows[1][1], "B[1][1]=G(H1, 1)");
        assert_eq!(sheet.rows[0][2], "B[0][2]=G(B[0][1], B[i'][j'])");
    }

    #[test]
    fn test_build_later_pass() {
        let mut run = run(2048, 3, 2);
        run.advance();
        let sheet = LabelSheet::build(&run, (0, 0), (0, 0)).unwrap();
        assert_eq!(sheet.pass, 2);
        assert_eq!(sheet.rows[0][0], "B[0][0]=G(B[0][1023], B[i'][j'])");
    }

    #[test]
    fn test_build_rejects_window_outside_grid() {
        let result = LabelSheet::build(&run(1024, 1, 1), (0, 1), (0, 0));
        assert!(matches!(result, Err(VizError::CellOutOfRange { lane: 1, .. })));
    }

    #[test]
    fn test_build_rejects_oversized_window_before_labeling() {
        let result = LabelSheet::build(&run(1024, 1, 1), (0, 0), (2000, u32::MAX));
        assert!(matches!(
            result,
            Err(VizError::CellOutOfRange {
                column: u32::MAX,
                columns: 1024,
                ..
            })
        ));

        let result = LabelSheet::build(&run(2048, 1, 2), (0, u32::MAX), (0, 0));
        assert!(matches!(
            result,
            Err(VizError::CellOutOfRange {
                lane: u32::MAX,
                lanes: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_window() {
        let sheet = LabelSheet::build(&run(1024, 1, 1), (0, 0), (5, 4)).unwrap();
        assert_eq!(sheet.cell_count(), 0);
        assert!(sheet.column_headers.is_empty());
    }

    #[test]
    fn test_text_table() {
        let sheet = LabelSheet::build(&run(1024, 1, 1), (0, 0), (0, 1)).unwrap();
        let table = sheet.to_text_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("lane\\col | {:<16} | 1", "0"));
        assert_eq!(lines[1], format!("{:<8} | B[0][0]=G(H0, 0) | B[0][1]=G(H1, 0)", "0"));
    }
}
