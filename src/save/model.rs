use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cell_size: [f32; 2],
    /// Usage bits per cell, row-major.
    pub cells: Vec<u8>,
}

impl Default for PlaneSnapshot {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            cell_size: [1.0, 1.0],
            cells: vec![7],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OccupancySnapshot {
    pub name: String,
    /// Dims the indices were written against; zero columns means unknown.
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSnapshot {
    pub version: u32,
    pub plane: PlaneSnapshot,
    pub occupancies: Vec<OccupancySnapshot>,
}

impl Default for GridSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            plane: PlaneSnapshot::default(),
            occupancies: Vec::new(),
        }
    }
}

impl GridSnapshot {
    /// Fails for snapshots written by a newer format than this crate reads.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.version > SNAPSHOT_VERSION {
            bail!(
                "grid snapshot version {} is newer than supported version {SNAPSHOT_VERSION}",
                self.version
            );
        }
        Ok(())
    }
}
