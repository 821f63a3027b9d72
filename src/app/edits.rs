use bevy::prelude::*;

use crate::model::{CellOccupancy, GridAnchor, GridPlane, OccupiedPlane};

use super::resources::GridEdit;

pub fn sync_plane_anchors(
    mut planes: Query<(&GlobalTransform, &mut GridPlane), Changed<GlobalTransform>>,
) {
    for (transform, mut plane) in &mut planes {
        plane.set_anchor(GridAnchor::from_global(transform));
    }
}

/// Applies edits in send order. A resize reconciles the plane's linked
/// occupancies at once, so occupancy edits later in the same batch are read
/// against the new dims.
pub fn apply_grid_edits(
    mut edits: EventReader<GridEdit>,
    mut planes: Query<&mut GridPlane>,
    mut occupancies: Query<(Entity, &mut CellOccupancy, Option<&OccupiedPlane>)>,
) {
    for edit in edits.read() {
        match edit {
            GridEdit::Resize {
                plane,
                rows,
                columns,
            } => {
                let Ok(mut grid) = planes.get_mut(*plane) else {
                    warn!("resize targets {plane}, which has no grid plane");
                    continue;
                };
                if let Err(err) = grid.try_update_dimension(*rows, *columns) {
                    warn!("skipped resize of {plane}: {err}");
                    continue;
                }
                for (entity, mut occupancy, link) in &mut occupancies {
                    if link.is_some_and(|link| link.0 == *plane) {
                        reconcile_with(entity, &mut occupancy, &grid);
                    }
                }
            }
            GridEdit::PaintUsage {
                plane,
                cells,
                usage,
            } => {
                let Ok(mut grid) = planes.get_mut(*plane) else {
                    warn!("usage paint targets {plane}, which has no grid plane");
                    continue;
                };
                for &index in cells {
                    if let Err(err) = grid.set_usage(index, *usage) {
                        warn!("skipped usage paint: {err}");
                    }
                }
            }
            GridEdit::Occupy { occupancy, cell } => {
                if let Ok((_, mut occupied, _)) = occupancies.get_mut(*occupancy) {
                    occupied.add(*cell);
                }
            }
            GridEdit::Vacate { occupancy, cell } => {
                if let Ok((_, mut occupied, _)) = occupancies.get_mut(*occupancy) {
                    occupied.remove(*cell);
                }
            }
            GridEdit::ToggleOccupancy { occupancy, cell } => {
                if let Ok((_, mut occupied, _)) = occupancies.get_mut(*occupancy) {
                    occupied.toggle(*cell);
                }
            }
            GridEdit::ReplaceOccupancy { occupancy, cells } => {
                if let Ok((_, mut occupied, _)) = occupancies.get_mut(*occupancy) {
                    occupied.replace(cells.iter().copied());
                }
            }
        }
    }
}

/// Keeps every linked occupancy valid for its plane's current dims.
pub fn reconcile_occupancy(
    planes: Query<&GridPlane>,
    mut occupancies: Query<(Entity, &mut CellOccupancy, &OccupiedPlane)>,
) {
    for (entity, mut occupancy, link) in &mut occupancies {
        let Ok(plane) = planes.get(link.0) else {
            continue;
        };
        if !occupancy.is_changed() && !occupancy.needs_reconcile(plane) {
            continue;
        }
        reconcile_with(entity, &mut occupancy, plane);
    }
}

fn reconcile_with(entity: Entity, occupancy: &mut CellOccupancy, plane: &GridPlane) {
    let dropped = occupancy.reconcile(plane);
    if dropped > 0 {
        debug!("occupancy {entity} dropped {dropped} cells no longer on its plane");
    }
}
