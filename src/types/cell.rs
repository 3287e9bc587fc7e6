use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of block `B[lane][column]` in the memory matrix (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    pub lane: u32,
    pub column: u32,
}

impl CellAddress {
    pub fn new(lane: u32, column: u32) -> Self {
        Self { lane, column }
    }
}

impl From<(u32, u32)> for CellAddress {
    fn from((lane, column): (u32, u32)) -> Self {
        Self { lane, column }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B[{}][{}]", self.lane, self.column)
    }
}
