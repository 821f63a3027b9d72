use std::collections::BTreeSet;

use crate::model::{CellOccupancy, CellUsage, GridPlane};

/// Cells swept by one drag of a paint tool. A commit applies them all as a
/// single change and ends the stroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrushStroke {
    cells: BTreeSet<usize>,
    active: bool,
}

impl BrushStroke {
    pub fn begin(&mut self) {
        self.cells.clear();
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Adds `index` to an active stroke; returns whether it was new.
    pub fn extend(&mut self, index: usize) -> bool {
        self.active && self.cells.insert(index)
    }

    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }

    pub fn cancel(&mut self) {
        self.cells.clear();
        self.active = false;
    }

    /// Writes `usage` to every stroked cell the plane still has and ends the
    /// stroke. Returns the number of cells written.
    pub fn commit_usage(&mut self, plane: &mut GridPlane, usage: CellUsage) -> usize {
        let written = self
            .cells
            .iter()
            .filter(|&&index| plane.set_usage(index, usage).is_ok())
            .count();
        self.cancel();
        written
    }

    /// Replaces `occupancy` with the stroked cells and ends the stroke.
    pub fn commit_occupancy(&mut self, occupancy: &mut CellOccupancy) {
        occupancy.replace(std::mem::take(&mut self.cells));
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use super::BrushStroke;
    use crate::model::{CellOccupancy, CellUsage, GridPlane};

    #[test]
    fn inactive_strokes_ignore_cells() {
        let mut stroke = BrushStroke::default();
        assert!(!stroke.extend(1));

        stroke.begin();
        assert!(stroke.extend(1));
        assert!(!stroke.extend(1));
        assert_eq!(stroke.cells().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn usage_commit_skips_cells_outside_the_plane() {
        let mut plane = GridPlane::new(2, 2, Vec2::ONE).expect("unit cells are valid");
        let mut stroke = BrushStroke::default();
        stroke.begin();
        for index in [0, 3, 8] {
            stroke.extend(index);
        }

        assert_eq!(stroke.commit_usage(&mut plane, CellUsage::FURNITURE), 2);
        assert_eq!(plane.usage(0), Some(CellUsage::FURNITURE));
        assert_eq!(plane.usage(1), Some(CellUsage::ALL));
        assert_eq!(plane.usage(3), Some(CellUsage::FURNITURE));
        assert!(!stroke.is_active());
    }

    #[test]
    fn occupancy_commit_replaces_previous_cells() {
        let mut occupancy = CellOccupancy::from_cells([7, 8], None);
        let mut stroke = BrushStroke::default();
        stroke.begin();
        stroke.extend(2);
        stroke.extend(1);

        stroke.commit_occupancy(&mut occupancy);

        assert_eq!(occupancy.iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(stroke.cells().count(), 0);
    }
}
