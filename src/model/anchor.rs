use bevy::math::primitives::InfinitePlane3d;
use bevy::math::{Dir3, Quat, Vec3};
use bevy::transform::components::{GlobalTransform, Transform};

/// Where a grid's local origin sits in world space and how it is oriented.
///
/// Local X runs along [`right`](Self::right) (columns), local Z along
/// [`forward`](Self::forward) (rows) and local Y along [`up`](Self::up), the
/// plane normal. Scale is not carried: cell size is the only length the
/// grid knows about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAnchor {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for GridAnchor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GridAnchor {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation: rotation.normalize(),
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY)
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }

    pub fn from_global(transform: &GlobalTransform) -> Self {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        Self::new(translation, rotation)
    }

    pub fn right(&self) -> Dir3 {
        self.rotation * Dir3::X
    }

    pub fn up(&self) -> Dir3 {
        self.rotation * Dir3::Y
    }

    /// The direction rows grow in: the anchor's local +Z.
    pub fn forward(&self) -> Dir3 {
        self.rotation * Dir3::Z
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }

    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.translation)
    }

    pub fn plane(&self) -> InfinitePlane3d {
        InfinitePlane3d { normal: self.up() }
    }
}
