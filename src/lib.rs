pub mod app;
pub mod core;
pub mod data;
pub mod model;
pub mod save;

pub use app::{CellHit, GridEdit, GridPickingPlugin, GridPlanePlugin, HoveredCell};
pub use crate::core::{BrushStroke, PlacementError, check_placement, footprint};
pub use data::{
    GridPlaneConfig, UsageOverride, load_grid_config_from_path, load_grid_config_from_str,
};
pub use model::{
    CellCoord, CellData, CellOccupancy, CellUsage, GridAnchor, GridDims, GridError, GridPlane,
    OccupiedPlane, PickError, dimension_to_index, index_to_dimension,
};
pub use save::{
    GridSnapshot, OccupancySnapshot, PlaneSnapshot, apply_snapshot, export_to_base64,
    import_from_base64, snapshot_from_json_string, snapshot_from_plane, snapshot_to_json_string,
};
