mod bridge;
mod codec;
mod model;

pub use bridge::{apply_snapshot, snapshot_from_plane};
pub use codec::{
    export_to_base64, import_from_base64, snapshot_from_json_string, snapshot_to_json_string,
};
pub use model::{GridSnapshot, OccupancySnapshot, PlaneSnapshot, SNAPSHOT_VERSION};
