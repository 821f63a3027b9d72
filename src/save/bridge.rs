use anyhow::{Result, anyhow};
use bevy::log::warn;
use bevy::math::Vec2;

use crate::model::{CellData, CellOccupancy, CellUsage, GridDims, GridPlane};

use super::{GridSnapshot, OccupancySnapshot, PlaneSnapshot, SNAPSHOT_VERSION};

pub fn snapshot_from_plane<'a>(
    plane: &GridPlane,
    occupancies: impl IntoIterator<Item = (&'a str, &'a CellOccupancy)>,
) -> GridSnapshot {
    let size = plane.cell_size();
    let occupancies = occupancies
        .into_iter()
        .map(|(name, occupancy)| {
            let layout = occupancy.layout().unwrap_or_default();
            OccupancySnapshot {
                name: name.to_string(),
                rows: layout.rows,
                columns: layout.columns,
                cells: occupancy.iter().collect(),
            }
        })
        .collect();

    GridSnapshot {
        version: SNAPSHOT_VERSION,
        plane: PlaneSnapshot {
            rows: plane.rows(),
            columns: plane.columns(),
            cell_size: [size.x, size.y],
            cells: plane.cells().iter().map(|cell| cell.usage.bits()).collect(),
        },
        occupancies,
    }
}

/// Replaces `plane`'s dims, cell size and cells with the snapshot's, keeping
/// its anchor, and returns the stored occupancies reconciled against it.
///
/// `plane` is left untouched when the snapshot is rejected.
pub fn apply_snapshot(
    plane: &mut GridPlane,
    snapshot: &GridSnapshot,
) -> Result<Vec<(String, CellOccupancy)>> {
    snapshot.ensure_supported()?;

    let stored = &snapshot.plane;
    let cells = stored
        .cells
        .iter()
        .map(|&bits| CellData::new(CellUsage::from_bits_truncate(bits)))
        .collect();
    let restored = GridPlane::from_parts(
        stored.rows,
        stored.columns,
        Vec2::from_array(stored.cell_size),
        cells,
    )
    .map_err(|err| {
        warn!("rejected grid snapshot: {err}");
        anyhow!("invalid grid snapshot: {err}")
    })?;

    *plane = restored.with_anchor(*plane.anchor());

    let occupancies = snapshot
        .occupancies
        .iter()
        .map(|entry| {
            let layout = (entry.columns > 0).then(|| GridDims::new(entry.rows, entry.columns));
            let mut occupancy = CellOccupancy::from_cells(entry.cells.iter().copied(), layout);
            occupancy.reconcile(plane);
            (entry.name.clone(), occupancy)
        })
        .collect();

    Ok(occupancies)
}
