//! Rotation transforms attached to blockstate variants and model elements.

use super::{normalize_point, Axis};
use serde::{Deserialize, Serialize};

/// Variant-level rotation of a whole model. Together with the model
/// location this keys the bake cache, so it is `Eq + Hash`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockTransform {
    /// Rotation around X in degrees, quarter turns only.
    pub x: i32,
    /// Rotation around Y in degrees, quarter turns only.
    pub y: i32,
    /// Pins face textures in place while the geometry rotates.
    pub uvlock: bool,
}

impl BlockTransform {
    pub fn new(x: i32, y: i32, uvlock: bool) -> Self {
        Self { x, y, uvlock }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Per-element rotation from a model file: a small tilt (up to 45 degrees)
/// of one cuboid about an axis-aligned pivot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Pivot point in model coordinates (0-16); block center by default.
    #[serde(default = "center_origin")]
    pub origin: [f32; 3],
    pub axis: Axis,
    /// Degrees, -45 to 45 in 22.5 steps.
    pub angle: f32,
    /// Stretch the element so its silhouette keeps its original extent.
    #[serde(default)]
    pub rescale: bool,
}

fn center_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Pivot in the same centered unit space as element corners.
    pub fn normalized_origin(&self) -> [f32; 3] {
        normalize_point(self.origin)
    }

    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Scale applied to the two off-axis components when `rescale` is set:
    /// a diagonal rotated by `angle` spans `1/cos(angle)` of its old extent.
    pub fn rescale_factor(&self) -> f32 {
        if self.rescale {
            1.0 / self.angle_radians().cos()
        } else {
            1.0
        }
    }
}
