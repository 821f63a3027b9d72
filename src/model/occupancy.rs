use std::collections::BTreeSet;

use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::log::debug;

use super::coord::{CellCoord, GridDims, dimension_to_index, index_to_dimension};
use super::plane::GridPlane;

/// Flat cell indices claimed by one placed object.
///
/// Indices are not validated on insert. They are only trustworthy after
/// [`prune`](Self::prune) or [`reconcile`](Self::reconcile) against the plane
/// they belong to.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct CellOccupancy {
    cells: BTreeSet<usize>,
    layout: Option<GridDims>,
}

/// Links an occupancy entity to the entity holding its [`GridPlane`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedPlane(pub Entity);

impl CellOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty occupancy whose indices will be written against `plane`'s dims.
    pub fn for_plane(plane: &GridPlane) -> Self {
        Self {
            cells: BTreeSet::new(),
            layout: Some(plane.dims()),
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = usize>, layout: Option<GridDims>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            layout,
        }
    }

    /// The dims the stored indices were last reconciled against.
    pub fn layout(&self) -> Option<GridDims> {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }

    pub fn add(&mut self, index: usize) -> bool {
        self.cells.insert(index)
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.cells.remove(&index)
    }

    /// Flips membership of `index`; returns whether it is occupied afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.cells.remove(&index) {
            false
        } else {
            self.cells.insert(index);
            true
        }
    }

    pub fn replace(&mut self, cells: impl IntoIterator<Item = usize>) {
        self.cells = cells.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Drops every index `plane` considers invalid and returns how many went.
    ///
    /// This is a numeric check only: after a column-count change a surviving
    /// index may address a different coordinate than when it was stored. Use
    /// [`reconcile`](Self::reconcile) to keep coordinates stable.
    pub fn prune(&mut self, plane: &GridPlane) -> usize {
        let before = self.cells.len();
        self.cells.retain(|&index| plane.is_valid_cell_index(index));
        let removed = before - self.cells.len();
        if removed > 0 {
            debug!("pruned {removed} stale occupied cells");
        }
        removed
    }

    /// Re-flattens every index from `from` dims into `to` dims by coordinate,
    /// dropping cells that no longer exist. Returns the number dropped.
    pub fn remap(&mut self, from: GridDims, to: GridDims) -> usize {
        let before = self.cells.len();
        self.cells = self
            .cells
            .iter()
            .filter_map(|&index| index_to_dimension(from, index))
            .filter_map(|coord| dimension_to_index(to, coord))
            .collect();
        self.layout = Some(to);
        let dropped = before - self.cells.len();
        if dropped > 0 {
            debug!(
                "remapped occupancy from {}x{} to {}x{}, dropped {dropped} cells",
                from.rows, from.columns, to.rows, to.columns
            );
        }
        dropped
    }

    /// Brings the indices in line with `plane`'s current dims.
    ///
    /// With a recorded layout that differs from the plane, indices are
    /// remapped by coordinate; otherwise they are pruned. Either way the
    /// plane's dims become the new layout. Returns the number of cells dropped.
    pub fn reconcile(&mut self, plane: &GridPlane) -> usize {
        let dims = plane.dims();
        match self.layout {
            Some(layout) if layout != dims => self.remap(layout, dims),
            _ => {
                let removed = self.prune(plane);
                self.layout = Some(dims);
                removed
            }
        }
    }

    pub fn needs_reconcile(&self, plane: &GridPlane) -> bool {
        self.layout != Some(plane.dims())
    }

    /// Occupied coordinates under `plane`'s current dims, skipping stale indices.
    pub fn coords<'a>(&'a self, plane: &'a GridPlane) -> impl Iterator<Item = CellCoord> + 'a {
        self.cells.iter().filter_map(|&index| plane.coord_of(index))
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use super::CellOccupancy;
    use crate::model::{CellCoord, GridDims, GridPlane};

    fn plane(rows: usize, columns: usize) -> GridPlane {
        GridPlane::new(rows, columns, Vec2::ONE).expect("unit cells are valid")
    }

    #[test]
    fn membership_is_a_set() {
        let mut occupancy = CellOccupancy::new();
        assert!(occupancy.add(3));
        assert!(!occupancy.add(3));
        assert_eq!(occupancy.len(), 1);

        assert!(!occupancy.remove(7));
        assert!(occupancy.remove(3));
        assert!(occupancy.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut occupancy = CellOccupancy::new();
        assert!(occupancy.toggle(5));
        assert!(occupancy.contains(5));
        assert!(!occupancy.toggle(5));
        assert!(!occupancy.contains(5));
    }

    #[test]
    fn replace_swaps_the_whole_set() {
        let mut occupancy = CellOccupancy::from_cells([1, 2, 3], None);
        occupancy.replace([9, 4, 4]);
        assert_eq!(occupancy.iter().collect::<Vec<_>>(), vec![4, 9]);
    }

    #[test]
    fn prune_removes_only_out_of_range_indices() {
        let plane = plane(2, 3);
        let mut occupancy = CellOccupancy::from_cells([0, 5, 6, 40], None);

        assert_eq!(occupancy.prune(&plane), 2);
        assert_eq!(occupancy.iter().collect::<Vec<_>>(), vec![0, 5]);
        assert_eq!(occupancy.prune(&plane), 0);
    }

    #[test]
    fn remap_keeps_coordinates_when_columns_change() {
        let mut occupancy = CellOccupancy::from_cells([1, 2, 5], Some(GridDims::new(2, 3)));

        let dropped = occupancy.remap(GridDims::new(2, 3), GridDims::new(3, 2));

        // (0,1) -> 1, (0,2) is gone, (1,2) is gone.
        assert_eq!(dropped, 2);
        assert_eq!(occupancy.iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(occupancy.layout(), Some(GridDims::new(3, 2)));
    }

    #[test]
    fn reconcile_remaps_from_the_recorded_layout() {
        let mut plane = plane(2, 2);
        let mut occupancy = CellOccupancy::for_plane(&plane);
        occupancy.replace([2, 3]);

        plane.update_dimension(3, 3);
        assert!(occupancy.needs_reconcile(&plane));
        assert_eq!(occupancy.reconcile(&plane), 0);

        let coords = occupancy.coords(&plane).collect::<Vec<_>>();
        assert_eq!(coords, vec![CellCoord::new(1, 0), CellCoord::new(1, 1)]);
        assert!(!occupancy.needs_reconcile(&plane));
    }

    #[test]
    fn reconcile_without_layout_falls_back_to_prune() {
        let plane = plane(2, 2);
        let mut occupancy = CellOccupancy::from_cells([1, 4], None);

        assert_eq!(occupancy.reconcile(&plane), 1);
        assert_eq!(occupancy.layout(), Some(GridDims::new(2, 2)));
    }
}
