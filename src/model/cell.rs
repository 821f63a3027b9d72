use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

/// Placement categories a cell permits, packed into one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellUsage(u8);

impl CellUsage {
    pub const NONE: Self = Self(0);
    pub const FURNITURE: Self = Self(0b001);
    pub const BUILDING: Self = Self(0b010);
    pub const PLANT: Self = Self(0b100);
    pub const ALL: Self = Self(0b111);

    /// Drops bits that do not name a category.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn toggle(&mut self, other: Self) {
        self.0 ^= other.0;
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "furniture" => Some(Self::FURNITURE),
            "building" => Some(Self::BUILDING),
            "plant" => Some(Self::PLANT),
            _ => None,
        }
    }
}

impl Default for CellUsage {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for CellUsage {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellUsage {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CellUsage {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CellUsage {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Display for CellUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let names = [
            (Self::FURNITURE, "Furniture"),
            (Self::BUILDING, "Building"),
            (Self::PLANT, "Plant"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellData {
    pub usage: CellUsage,
}

impl CellData {
    pub fn new(usage: CellUsage) -> Self {
        Self { usage }
    }

    pub fn permits(&self, required: CellUsage) -> bool {
        self.usage.contains(required)
    }
}
