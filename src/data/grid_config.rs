use anyhow::{Context, Result, bail};
use bevy::math::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::model::{CellCoord, CellUsage, GridAnchor, GridPlane};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPlaneConfig {
    pub rows: usize,
    pub columns: usize,
    pub cell_size: [f32; 2],
    pub translation: [f32; 3],
    /// Rotation about the world up axis, in degrees.
    pub yaw_degrees: f32,
    pub usage_overrides: Vec<UsageOverride>,
}

impl Default for GridPlaneConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            cell_size: [1.0, 1.0],
            translation: [0.0, 0.0, 0.0],
            yaw_degrees: 0.0,
            usage_overrides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageOverride {
    pub row: usize,
    pub column: usize,
    /// Category names (`"Plant"`, `"Furniture"`, `"Building"`); empty forbids all.
    #[serde(default)]
    pub allow: Vec<String>,
}

impl UsageOverride {
    pub fn usage(&self) -> Result<CellUsage> {
        let mut usage = CellUsage::NONE;
        for name in &self.allow {
            let Some(flag) = CellUsage::from_name(name) else {
                bail!("unknown cell usage {name:?}");
            };
            usage.insert(flag);
        }
        Ok(usage)
    }
}

impl GridPlaneConfig {
    pub fn anchor(&self) -> GridAnchor {
        GridAnchor::new(
            Vec3::from_array(self.translation),
            Quat::from_rotation_y(self.yaw_degrees.to_radians()),
        )
    }

    pub fn build(&self) -> Result<GridPlane> {
        let mut plane = GridPlane::new(self.rows, self.columns, Vec2::from_array(self.cell_size))?
            .with_anchor(self.anchor());

        for entry in &self.usage_overrides {
            let coord = CellCoord::new(entry.row, entry.column);
            let usage = entry
                .usage()
                .with_context(|| format!("invalid usage override for cell {coord}"))?;
            let Some(index) = plane.index_of(coord) else {
                bail!(
                    "usage override for cell {coord} is outside a {}x{} grid",
                    self.rows,
                    self.columns
                );
            };
            plane.set_usage(index, usage)?;
        }

        Ok(plane)
    }
}
