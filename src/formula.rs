//! Symbolic dependency formulas for matrix blocks
//!
//! Every block `B[lane][column]` is produced by the compression function `G`
//! from two operands. On the first pass the first two columns of a lane are
//! seeded from the initial blocks `H0`/`H1`; every other block depends on the
//! preceding column of its own lane plus one reference block. On later passes
//! column 0 wraps around to the last column of the same lane.
//!
//! The reference block is kept symbolic as `B[i'][j']`: the real Argon2
//! index-selection function is not modeled.

use serde::Serialize;
use std::fmt;

use crate::types::CellAddress;

/// Initial blocks derived from the Argon2 pre-hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InitialBlock {
    H0,
    H1,
}

impl fmt::Display for InitialBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialBlock::H0 => f.write_str("H0"),
            InitialBlock::H1 => f.write_str("H1"),
        }
    }
}

/// One argument of `G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Operand {
    /// Seed block `H0`/`H1` tagged with its lane, rendered `H0, lane`
    Seed { block: InitialBlock, lane: u32 },
    /// Concrete block in the same lane
    Block { lane: u32, column: u32 },
    /// Symbolic pseudo-random reference `B[i'][j']`
    Reference,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Seed { block, lane } => write!(f, "{block}, {lane}"),
            Operand::Block { lane, column } => write!(f, "B[{lane}][{column}]"),
            Operand::Reference => f.write_str("B[i'][j']"),
        }
    }
}

/// Derived formula for one block. Displays as `B[lane][column]=G(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellFormula {
    pub target: CellAddress,
    pub first: Operand,
    /// `None` for seeded blocks, whose `G` takes the seed and lane only
    pub second: Option<Operand>,
}

impl CellFormula {
    /// Derive the formula of `target` during `pass` (1-based).
    ///
    /// # Panics
    /// Panics if `pass` is 0 or `target.column >= columns_per_lane`. Callers
    /// are expected to hand in addresses inside the grid.
    pub fn derive(target: CellAddress, pass: u32, columns_per_lane: u32) -> Self {
        assert!(pass >= 1, "passes are numbered from 1");
        assert!(
            target.column < columns_per_lane,
            "column {} outside a lane of {} columns",
            target.column,
            columns_per_lane
        );

        let CellAddress { lane, column } = target;
        let (first, second) = match (pass, column) {
            (1, 0) => (seed(InitialBlock::H0, lane), None),
            (1, 1) => (seed(InitialBlock::H1, lane), None),
            (1, _) | (_, 1..) => (previous_in_lane(lane, column - 1), Some(Operand::Reference)),
            (_, 0) => (
                previous_in_lane(lane, columns_per_lane - 1),
                Some(Operand::Reference),
            ),
        };

        Self {
            target,
            first,
            second,
        }
    }

    /// Right-hand side of the label, e.g. `G(H0, 0)`.
    pub fn expression(&self) -> String {
        match self.second {
            Some(second) => format!("G({}, {})", self.first, second),
            None => format!("G({})", self.first),
        }
    }

    /// Same-lane block this one is chained from, if any.
    pub fn predecessor(&self) -> Option<CellAddress> {
        match self.first {
            Operand::Block { lane, column } => Some(CellAddress::new(lane, column)),
            Operand::Seed { .. } | Operand::Reference => None,
        }
    }

    /// True for first-pass blocks seeded from `H0`/`H1`.
    pub fn is_seed(&self) -> bool {
        matches!(self.first, Operand::Seed { .. })
    }

    /// True when the block is chained from itself (a one-column lane after pass 1).
    pub fn is_self_referencing(&self) -> bool {
        self.predecessor() == Some(self.target)
    }
}

impl fmt::Display for CellFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.target, self.expression())
    }
}

fn seed(block: InitialBlock, lane: u32) -> Operand {
    Operand::Seed { block, lane }
}

fn previous_in_lane(lane: u32, column: u32) -> Operand {
    Operand::Block { lane, column }
}

/// Label for `B[lane][column]` during `current_pass`.
///
/// # Panics
/// See [`CellFormula::derive`].
pub fn formula(lane: u32, column: u32, current_pass: u32, columns_per_lane: u32) -> String {
    CellFormula::derive(CellAddress::new(lane, column), current_pass, columns_per_lane).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0, 1, 1024, "B[0][0]=G(H0, 0)"; "first pass column 0")]
    #[test_case(1, 1, 1, 1024, "B[1][1]=G(H1, 1)"; "first pass column 1")]
    #[test_case(3, 2, 1, 16, "B[3][2]=G(B[3][1], B[i'][j'])"; "first pass column 2")]
    #[test_case(0, 15, 1, 16, "B[0][15]=G(B[0][14], B[i'][j'])"; "first pass last column")]
    #[test_case(0, 0, 2, 1024, "B[0][0]=G(B[0][1023], B[i'][j'])"; "later pass wraps")]
    #[test_case(2, 1, 3, 8, "B[2][1]=G(B[2][0], B[i'][j'])"; "later pass column 1")]
    #[test_case(1, 7, 9, 8, "B[1][7]=G(B[1][6], B[i'][j'])"; "later pass last column")]
    #[test_case(0, 0, 2, 1, "B[0][0]=G(B[0][0], B[i'][j'])"; "single column self reference")]
    fn test_formula_labels(lane: u32, column: u32, pass: u32, q: u32, expected: &str) {
        assert_eq!(formula(lane, column, pass, q), expected);
    }

    #[test]
    fn test_formula_is_pure() {
        for pass in 1..=3 {
            for column in 0..6 {
                let a = formula(4, column, pass, 6);
                let b = formula(4, column, pass, 6);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_first_pass_seeds() {
        for lane in 0..8 {
            for q in [2, 3, 1024] {
                assert!(formula(lane, 0, 1, q).contains(&format!("G(H0, {lane})")));
                assert!(formula(lane, 1, 1, q).contains(&format!("G(H1, {lane})")));
            }
        }
    }

    #[test]
    fn test_later_pass_column_zero_references_last_column() {
        for pass in 2..5 {
            for q in [1, 2, 500, 1024] {
                let cell = CellFormula::derive(CellAddress::new(3, 0), pass, q);
                assert_eq!(cell.predecessor(), Some(CellAddress::new(3, q - 1)));
                assert!(cell.to_string().contains(&format!("B[3][{}]", q - 1)));
            }
        }
    }

    #[test]
    fn test_lane_does_not_change_structure() {
        let a = CellFormula::derive(CellAddress::new(0, 5), 2, 10);
        let b = CellFormula::derive(CellAddress::new(7, 5), 2, 10);
        assert_eq!(a.second, b.second);
        assert_eq!(
            a.predecessor().map(|p| p.column),
            b.predecessor().map(|p| p.column)
        );
    }

    #[test]
    fn test_structured_accessors() {
        let seeded = CellFormula::derive(CellAddress::new(2, 1), 1, 4);
        assert!(seeded.is_seed());
        assert_eq!(seeded.predecessor(), None);
        assert_eq!(seeded.second, None);
        assert_eq!(seeded.expression(), "G(H1, 2)");

        let chained = CellFormula::derive(CellAddress::new(2, 3), 1, 4);
        assert!(!chained.is_seed());
        assert_eq!(chained.predecessor(), Some(CellAddress::new(2, 2)));
        assert_eq!(chained.second, Some(Operand::Reference));
        assert!(!chained.is_self_referencing());

        let wrapped = CellFormula::derive(CellAddress::new(0, 0), 2, 1);
        assert!(wrapped.is_self_referencing());
    }

    #[test]
    fn test_single_column_lane_first_pass_is_seeded() {
        assert_eq!(formula(0, 0, 1, 1), "B[0][0]=G(H0, 0)");
    }

    #[test]
    #[should_panic(expected = "outside a lane")]
    fn test_column_out_of_range_fails_fast() {
        let _ = formula(0, 4, 1, 4);
    }

    #[test]
    #[should_panic(expected = "numbered from 1")]
    fn test_pass_zero_fails_fast() {
        let _ = formula(0, 0, 0, 4);
    }

    #[test]
    fn test_operand_json() {
        let cell = CellFormula::derive(CellAddress::new(1, 0), 1, 4);
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(json["first"]["kind"], "seed");
        assert_eq!(json["first"]["block"], "H0");
        assert!(json["second"].is_null());
    }
}
