use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Row and column counts of a grid. A flat cell index only means something
/// relative to the dims it was computed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub columns: usize,
}

impl GridDims {
    /// Largest cell count a plane will allocate.
    pub const MAX_CELLS: usize = 1 << 24;

    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Saturates, so dims from untrusted input never overflow here.
    pub fn cell_count(self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// The cell count, or `None` when it would exceed [`Self::MAX_CELLS`].
    pub fn checked_cell_count(self) -> Option<usize> {
        self.rows
            .checked_mul(self.columns)
            .filter(|&count| count <= Self::MAX_CELLS)
    }

    pub fn contains(self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }
}

/// Flattens `coord` row-major under `dims`, or `None` when it lies outside.
pub fn dimension_to_index(dims: GridDims, coord: CellCoord) -> Option<usize> {
    if !dims.contains(coord) {
        return None;
    }
    Some(coord.row * dims.columns + coord.column)
}

/// Inverse of [`dimension_to_index`] for indices computed under the same `dims`.
pub fn index_to_dimension(dims: GridDims, index: usize) -> Option<CellCoord> {
    if dims.columns == 0 {
        return None;
    }
    let coord = CellCoord::new(index / dims.columns, index % dims.columns);
    (coord.row < dims.rows).then_some(coord)
}
