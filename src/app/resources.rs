use bevy::prelude::*;

use crate::model::{CellCoord, CellUsage};

/// Edits the host's tools request; applied once per frame by
/// [`apply_grid_edits`](super::edits::apply_grid_edits).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GridEdit {
    Resize {
        plane: Entity,
        rows: usize,
        columns: usize,
    },
    PaintUsage {
        plane: Entity,
        cells: Vec<usize>,
        usage: CellUsage,
    },
    Occupy {
        occupancy: Entity,
        cell: usize,
    },
    Vacate {
        occupancy: Entity,
        cell: usize,
    },
    ToggleOccupancy {
        occupancy: Entity,
        cell: usize,
    },
    ReplaceOccupancy {
        occupancy: Entity,
        cells: Vec<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHit {
    pub plane: Entity,
    pub coord: CellCoord,
    pub index: usize,
    pub point: Vec3,
    pub distance: f32,
}

/// The cell under the cursor, if any plane is under it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct HoveredCell(pub Option<CellHit>);
