use std::fmt;

use crate::model::{CellCoord, CellUsage, GridPlane};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    InvalidCell(usize),
    OutsideGrid(CellCoord),
    Forbidden {
        index: usize,
        required: CellUsage,
        permitted: CellUsage,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCell(index) => write!(f, "cell {index} is not part of the grid"),
            Self::OutsideGrid(coord) => write!(f, "cell {coord} is outside the grid"),
            Self::Forbidden {
                index,
                required,
                permitted,
            } => write!(
                f,
                "cell {index} permits {permitted} but placement needs {required}"
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Flat indices of the `rows x columns` block whose first cell is `origin`.
pub fn footprint(
    plane: &GridPlane,
    origin: CellCoord,
    rows: usize,
    columns: usize,
) -> Result<Vec<usize>, PlacementError> {
    let mut cells = Vec::new();
    for row in origin.row..origin.row.saturating_add(rows) {
        for column in origin.column..origin.column.saturating_add(columns) {
            let coord = CellCoord::new(row, column);
            let index = plane
                .index_of(coord)
                .ok_or(PlacementError::OutsideGrid(coord))?;
            cells.push(index);
        }
    }
    Ok(cells)
}

/// Checks that every cell exists and permits all of `required`.
pub fn check_placement(
    plane: &GridPlane,
    cells: impl IntoIterator<Item = usize>,
    required: CellUsage,
) -> Result<(), PlacementError> {
    for index in cells {
        if !plane.is_valid_cell_index(index) {
            return Err(PlacementError::InvalidCell(index));
        }
        let permitted = plane
            .usage(index)
            .ok_or(PlacementError::InvalidCell(index))?;
        if !permitted.contains(required) {
            return Err(PlacementError::Forbidden {
                index,
                required,
                permitted,
            });
        }
    }
    Ok(())
}
