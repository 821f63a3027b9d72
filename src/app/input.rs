use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::model::GridPlane;

use super::resources::{CellHit, HoveredCell};

/// The closest cell `ray` hits across `planes`. Planes the ray crosses outside
/// their bounds are skipped, so a nearer plane's margin never hides a farther
/// plane's cell.
pub fn pick_nearest<'a>(
    ray: Ray3d,
    planes: impl IntoIterator<Item = (Entity, &'a GridPlane)>,
) -> Option<CellHit> {
    planes
        .into_iter()
        .filter_map(|(entity, plane)| {
            let point = plane.intersect(ray)?;
            let index = plane.cell_index_at(point).ok()?;
            let coord = plane.coord_of(index)?;
            Some(CellHit {
                plane: entity,
                coord,
                index,
                point,
                distance: point.distance(ray.origin),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

pub fn update_hovered_cell(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    planes: Query<(Entity, &GridPlane)>,
    mut hovered: ResMut<HoveredCell>,
) {
    let Ok(window) = windows.get_single() else {
        hovered.0 = None;
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        hovered.0 = None;
        return;
    };

    let Some((camera, camera_transform)) = cameras.iter().find(|(camera, _)| camera.is_active)
    else {
        hovered.0 = None;
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        hovered.0 = None;
        return;
    };

    let hit = pick_nearest(ray, &planes);
    if hovered.0 != hit {
        hovered.0 = hit;
    }
}
