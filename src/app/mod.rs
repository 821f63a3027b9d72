mod edits;
mod input;
mod resources;

use bevy::prelude::*;

pub use edits::{apply_grid_edits, reconcile_occupancy, sync_plane_anchors};
pub use input::{pick_nearest, update_hovered_cell};
pub use resources::{CellHit, GridEdit, HoveredCell};

/// Keeps grid planes anchored to their entity's transform, applies
/// [`GridEdit`]s and reconciles linked occupancies after resizes.
pub struct GridPlanePlugin;

impl Plugin for GridPlanePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GridEdit>().add_systems(
            Update,
            (sync_plane_anchors, apply_grid_edits, reconcile_occupancy).chain(),
        );
    }
}

/// Resolves the primary window's cursor to [`HoveredCell`]. Needs a window and
/// a camera, so it is kept apart from [`GridPlanePlugin`].
pub struct GridPickingPlugin;

impl Plugin for GridPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredCell>()
            .add_systems(Update, update_hovered_cell.after(sync_plane_anchors));
    }
}
