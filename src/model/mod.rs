mod anchor;
mod cell;
mod coord;
mod occupancy;
mod plane;

pub use anchor::GridAnchor;
pub use cell::{CellData, CellUsage};
pub use coord::{CellCoord, GridDims, dimension_to_index, index_to_dimension};
pub use occupancy::{CellOccupancy, OccupiedPlane};
pub use plane::{GridError, GridPlane, PickError};
