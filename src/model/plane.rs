use std::fmt;

use bevy::ecs::component::Component;
use bevy::log::{debug, warn};
use bevy::math::{Ray3d, Vec2, Vec3};

use super::anchor::GridAnchor;
use super::cell::{CellData, CellUsage};
use super::coord::{CellCoord, GridDims, dimension_to_index, index_to_dimension};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    InvalidCellSize(Vec2),
    IndexOutOfRange { index: usize, len: usize },
    CellCountMismatch { expected: usize, actual: usize },
    TooManyCells { rows: usize, columns: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize(size) => {
                write!(f, "cell size must be finite and positive, got {size}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "cell index {index} is outside a grid of {len} cells")
            }
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
            Self::TooManyCells { rows, columns } => write!(
                f,
                "a {rows}x{columns} grid exceeds {} cells",
                GridDims::MAX_CELLS
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Why a world position or ray did not resolve to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickError {
    /// The ray is parallel to the plane or the plane is behind it.
    NoIntersection,
    /// The point lands outside `[0, rows) x [0, columns)`; the signed cell it
    /// would have hit is kept for callers that extend the grid on demand.
    OutsideGrid { row: i64, column: i64 },
    /// The coordinate is inside the dims but the cell storage is shorter.
    IndexOutOfRange(CellCoord),
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIntersection => f.write_str("ray does not hit the grid plane"),
            Self::OutsideGrid { row, column } => {
                write!(f, "cell ({row}, {column}) is outside the grid")
            }
            Self::IndexOutOfRange(coord) => write!(f, "cell {coord} has no storage"),
        }
    }
}

impl std::error::Error for PickError {}

/// A rectangular tile plane: rows run along the anchor's forward axis,
/// columns along its right axis, and cell data is stored row-major.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct GridPlane {
    rows: usize,
    columns: usize,
    cell_size: Vec2,
    cells: Vec<CellData>,
    anchor: GridAnchor,
}

impl Default for GridPlane {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            cell_size: Vec2::ONE,
            cells: vec![CellData::default()],
            anchor: GridAnchor::IDENTITY,
        }
    }
}

impl GridPlane {
    pub fn new(rows: usize, columns: usize, cell_size: Vec2) -> Result<Self, GridError> {
        validate_cell_size(cell_size)?;
        let count = checked_cell_count(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cell_size,
            cells: vec![CellData::default(); count],
            anchor: GridAnchor::IDENTITY,
        })
    }

    /// Rebuilds a plane from stored parts, e.g. a snapshot.
    pub fn from_parts(
        rows: usize,
        columns: usize,
        cell_size: Vec2,
        cells: Vec<CellData>,
    ) -> Result<Self, GridError> {
        validate_cell_size(cell_size)?;
        let expected = checked_cell_count(rows, columns)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            cell_size,
            cells,
            anchor: GridAnchor::IDENTITY,
        })
    }

    pub fn with_anchor(mut self, anchor: GridAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn dims(&self) -> GridDims {
        GridDims::new(self.rows, self.columns)
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: Vec2) -> Result<(), GridError> {
        validate_cell_size(cell_size)?;
        self.cell_size = cell_size;
        Ok(())
    }

    pub fn anchor(&self) -> &GridAnchor {
        &self.anchor
    }

    pub fn set_anchor(&mut self, anchor: GridAnchor) {
        self.anchor = anchor;
    }

    pub fn cells(&self) -> &[CellData] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&CellData> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut CellData> {
        self.cells.get_mut(index)
    }

    pub fn usage(&self, index: usize) -> Option<CellUsage> {
        self.cell(index).map(|cell| cell.usage)
    }

    pub fn set_usage(&mut self, index: usize, usage: CellUsage) -> Result<(), GridError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GridError::IndexOutOfRange { index, len })?;
        cell.usage = usage;
        Ok(())
    }

    /// Every coordinate of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let dims = self.dims();
        (0..self.cells.len()).filter_map(move |index| index_to_dimension(dims, index))
    }

    pub fn is_valid_cell_index(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        dimension_to_index(self.dims(), coord)
    }

    pub fn coord_of(&self, index: usize) -> Option<CellCoord> {
        index_to_dimension(self.dims(), index)
    }

    /// Resizes the grid, keeping each cell's data at its `(row, column)`.
    ///
    /// Coordinates that exist only in the new dims start out permitting every
    /// category; coordinates that exist only in the old dims are dropped.
    /// Returns the dims the grid had before the call, which is what stored flat
    /// indices were computed against. Dims past [`GridDims::MAX_CELLS`] are
    /// ignored with a warning, so the returned dims equal the current ones.
    pub fn update_dimension(&mut self, rows: usize, columns: usize) -> GridDims {
        match self.try_update_dimension(rows, columns) {
            Ok(previous) => previous,
            Err(err) => {
                warn!("kept {}x{} grid: {err}", self.rows, self.columns);
                self.dims()
            }
        }
    }

    /// [`update_dimension`](Self::update_dimension) that reports oversized dims
    /// instead of ignoring them.
    pub fn try_update_dimension(
        &mut self,
        rows: usize,
        columns: usize,
    ) -> Result<GridDims, GridError> {
        let count = checked_cell_count(rows, columns)?;
        let previous = self.dims();

        let cells = (0..count)
            .map(|index| {
                let coord = CellCoord::new(index / columns, index % columns);
                dimension_to_index(previous, coord)
                    .and_then(|old_index| self.cells.get(old_index))
                    .copied()
                    .unwrap_or_default()
            })
            .collect();

        self.cells = cells;
        self.rows = rows;
        self.columns = columns;

        debug!(
            "grid resized from {}x{} to {}x{}",
            previous.rows, previous.columns, rows, columns
        );
        Ok(previous)
    }

    pub fn cell_origin_local(&self, coord: CellCoord) -> Vec3 {
        Vec3::new(
            coord.column as f32 * self.cell_size.x,
            0.0,
            coord.row as f32 * self.cell_size.y,
        )
    }

    pub fn cell_center_local(&self, coord: CellCoord) -> Vec3 {
        self.cell_origin_local(coord)
            + Vec3::new(0.5 * self.cell_size.x, 0.0, 0.5 * self.cell_size.y)
    }

    pub fn cell_origin(&self, coord: CellCoord) -> Vec3 {
        self.anchor.transform_point(self.cell_origin_local(coord))
    }

    pub fn cell_center(&self, coord: CellCoord) -> Vec3 {
        self.anchor.transform_point(self.cell_center_local(coord))
    }

    pub fn cell_origin_at(&self, index: usize) -> Option<Vec3> {
        self.coord_of(index).map(|coord| self.cell_origin(coord))
    }

    pub fn cell_center_at(&self, index: usize) -> Option<Vec3> {
        self.coord_of(index).map(|coord| self.cell_center(coord))
    }

    pub fn row_begin(&self, row: usize) -> Vec3 {
        self.anchor.translation + *self.anchor.forward() * (row as f32 * self.cell_size.y)
    }

    pub fn row_end(&self, row: usize) -> Vec3 {
        self.row_begin(row) + *self.anchor.right() * (self.columns as f32 * self.cell_size.x)
    }

    pub fn column_begin(&self, column: usize) -> Vec3 {
        self.anchor.translation + *self.anchor.right() * (column as f32 * self.cell_size.x)
    }

    pub fn column_end(&self, column: usize) -> Vec3 {
        self.column_begin(column) + *self.anchor.forward() * (self.rows as f32 * self.cell_size.y)
    }

    pub fn cell_at(&self, world: Vec3) -> Result<CellCoord, PickError> {
        let local = self.anchor.inverse_transform_point(world);
        let row = (local.z / self.cell_size.y).floor();
        let column = (local.x / self.cell_size.x).floor();

        let inside = row >= 0.0
            && column >= 0.0
            && row < self.rows as f32
            && column < self.columns as f32;
        if !inside {
            return Err(PickError::OutsideGrid {
                row: row as i64,
                column: column as i64,
            });
        }
        Ok(CellCoord::new(row as usize, column as usize))
    }

    pub fn cell_index_at(&self, world: Vec3) -> Result<usize, PickError> {
        let coord = self.cell_at(world)?;
        dimension_to_index(self.dims(), coord)
            .filter(|&index| index < self.cells.len())
            .ok_or(PickError::IndexOutOfRange(coord))
    }

    /// Where `ray` crosses the infinite plane through the anchor.
    pub fn intersect(&self, ray: Ray3d) -> Option<Vec3> {
        ray.intersect_plane(self.anchor.translation, self.anchor.plane())
            .map(|distance| ray.get_point(distance))
    }

    pub fn pick_cell(&self, ray: Ray3d) -> Result<CellCoord, PickError> {
        let point = self.intersect(ray).ok_or(PickError::NoIntersection)?;
        self.cell_at(point)
    }

    pub fn pick_cell_index(&self, ray: Ray3d) -> Result<usize, PickError> {
        let point = self.intersect(ray).ok_or(PickError::NoIntersection)?;
        self.cell_index_at(point)
    }
}

fn checked_cell_count(rows: usize, columns: usize) -> Result<usize, GridError> {
    GridDims::new(rows, columns)
        .checked_cell_count()
        .ok_or(GridError::TooManyCells { rows, columns })
}

fn validate_cell_size(cell_size: Vec2) -> Result<(), GridError> {
    if cell_size.is_finite() && cell_size.x > 0.0 && cell_size.y > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidCellSize(cell_size))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use bevy::math::{Dir3, Quat, Ray3d, Vec2, Vec3};

    use super::{GridError, GridPlane, PickError};
    use crate::model::{CellCoord, CellUsage, GridAnchor, GridDims};

    fn assert_vec_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected}, got {actual}"
        );
    }

    fn plane(rows: usize, columns: usize) -> GridPlane {
        GridPlane::new(rows, columns, Vec2::new(2.0, 1.0)).expect("valid cell size")
    }

    #[test]
    fn default_plane_is_one_permissive_cell() {
        let plane = GridPlane::default();
        assert_eq!((plane.rows(), plane.columns()), (1, 1));
        assert_eq!(plane.cells().len(), 1);
        assert_eq!(plane.usage(0), Some(CellUsage::ALL));
    }

    #[test]
    fn rejects_degenerate_cell_sizes() {
        for size in [Vec2::new(0.0, 1.0), Vec2::new(1.0, -1.0), Vec2::new(f32::NAN, 1.0)] {
            assert!(matches!(
                GridPlane::new(2, 2, size),
                Err(GridError::InvalidCellSize(_))
            ));
        }
        let mut plane = plane(1, 1);
        assert!(plane.set_cell_size(Vec2::ZERO).is_err());
        assert_eq!(plane.cell_size(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn shrinking_columns_keeps_cells_by_coordinate() {
        let mut plane = plane(2, 3);
        plane.set_usage(2, CellUsage::PLANT).expect("(0,2) exists");
        plane.set_usage(4, CellUsage::BUILDING).expect("(1,1) exists");

        let previous = plane.update_dimension(2, 2);

        assert_eq!((previous.rows, previous.columns), (2, 3));
        assert_eq!(plane.cells().len(), 4);
        assert_eq!(plane.usage(3), Some(CellUsage::BUILDING));
        assert!(plane.cells().iter().all(|cell| cell.usage != CellUsage::PLANT));
    }

    #[test]
    fn resizing_to_zero_and_back_does_not_panic() {
        let mut plane = plane(3, 3);
        plane.set_usage(0, CellUsage::NONE).expect("(0,0) exists");
        plane.update_dimension(0, 5);
        assert!(plane.cells().is_empty());
        assert!(!plane.is_valid_cell_index(0));

        plane.update_dimension(2, 2);
        assert_eq!(plane.usage(0), Some(CellUsage::ALL));
    }

    #[test]
    fn oversized_dims_are_rejected_without_panicking() {
        assert_eq!(
            GridPlane::new(usize::MAX, 2, Vec2::ONE),
            Err(GridError::TooManyCells {
                rows: usize::MAX,
                columns: 2,
            })
        );
        assert!(matches!(
            GridPlane::from_parts(1 << 40, 1 << 40, Vec2::ONE, Vec::new()),
            Err(GridError::TooManyCells { .. })
        ));

        let mut plane = plane(2, 3);
        assert_eq!(
            plane.try_update_dimension(usize::MAX, usize::MAX),
            Err(GridError::TooManyCells {
                rows: usize::MAX,
                columns: usize::MAX,
            })
        );
        assert_eq!(plane.update_dimension(usize::MAX, 2), GridDims::new(2, 3));
        assert_eq!(plane.dims(), GridDims::new(2, 3));
        assert_eq!(plane.cells().len(), 6);

        plane.update_dimension(usize::MAX, 0);
        assert!(plane.cells().is_empty());
        assert_eq!(plane.coords().count(), 0);
    }

    #[test]
    fn set_usage_rejects_indices_past_the_storage() {
        let mut plane = plane(2, 2);
        assert_eq!(
            plane.set_usage(4, CellUsage::PLANT),
            Err(GridError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn cell_geometry_follows_cell_size() {
        let plane = plane(3, 4);
        let coord = CellCoord::new(2, 1);
        assert_vec_close(plane.cell_origin(coord), Vec3::new(2.0, 0.0, 2.0));
        assert_vec_close(plane.cell_center(coord), Vec3::new(3.0, 0.0, 2.5));
        assert_eq!(plane.cell_center_at(12), None);
        assert_eq!(plane.cell_origin_at(9), Some(plane.cell_origin(coord)));
    }

    #[test]
    fn grid_lines_span_the_whole_grid() {
        let plane =
            plane(3, 4).with_anchor(GridAnchor::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        assert_vec_close(plane.row_begin(1), Vec3::new(1.0, 0.0, 1.0));
        assert_vec_close(plane.row_end(1), Vec3::new(9.0, 0.0, 1.0));
        assert_vec_close(plane.column_begin(4), Vec3::new(9.0, 0.0, 0.0));
        assert_vec_close(plane.column_end(4), Vec3::new(9.0, 0.0, 3.0));
    }

    #[test]
    fn world_points_resolve_through_a_rotated_anchor() {
        let anchor = GridAnchor::new(
            Vec3::new(10.0, 2.0, -4.0),
            Quat::from_rotation_y(FRAC_PI_2),
        );
        let plane = plane(3, 4).with_anchor(anchor);

        for coord in plane.coords() {
            let center = plane.cell_center(coord);
            assert_eq!(plane.cell_at(center), Ok(coord));
            let index = plane.index_of(coord).expect("coord inside grid");
            assert_eq!(plane.cell_index_at(center), Ok(index));
        }

        let behind_origin = anchor.transform_point(Vec3::new(-0.5, 0.0, 0.5));
        assert_eq!(
            plane.cell_at(behind_origin),
            Err(PickError::OutsideGrid { row: 0, column: -1 })
        );
    }

    #[test]
    fn rays_pick_the_cell_they_cross() {
        let plane =
            plane(3, 4).with_anchor(GridAnchor::from_translation(Vec3::new(0.0, 1.0, 0.0)));
        let target = plane.cell_center(CellCoord::new(1, 2));
        let origin = target + Vec3::new(0.3, 5.0, -0.2);
        let ray = Ray3d {
            origin,
            direction: Dir3::new(target - origin).expect("non-zero direction"),
        };

        assert_eq!(plane.pick_cell(ray), Ok(CellCoord::new(1, 2)));
        assert_eq!(plane.pick_cell_index(ray), Ok(6));
    }

    #[test]
    fn parallel_and_receding_rays_miss() {
        let plane = plane(3, 4);
        let parallel = Ray3d {
            origin: Vec3::new(1.0, 1.0, 1.0),
            direction: Dir3::X,
        };
        let receding = Ray3d {
            origin: Vec3::new(1.0, 1.0, 1.0),
            direction: Dir3::Y,
        };

        assert_eq!(plane.pick_cell(parallel), Err(PickError::NoIntersection));
        assert_eq!(plane.pick_cell_index(receding), Err(PickError::NoIntersection));
    }
}
