//! Axis-aligned boxes and orientation policies.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which axis permutations an item may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationPolicy {
    /// Any of the 6 axis-aligned orientations.
    #[default]
    Any,
    /// Only rotations about the vertical axis (height stays height).
    Upright,
    /// Original orientation only.
    Fixed,
}

impl OrientationPolicy {
    /// Returns the axis permutations allowed by this policy, in canonical order.
    ///
    /// Each entry maps (width, depth, height) of the placed box to an axis of the
    /// original dimensions.
    pub fn permutations(&self) -> &'static [[usize; 3]] {
        const ANY: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        const UPRIGHT: [[usize; 3]; 2] = [[0, 1, 2], [1, 0, 2]];
        const FIXED: [[usize; 3]; 1] = [[0, 1, 2]];

        match self {
            Self::Any => &ANY,
            Self::Upright => &UPRIGHT,
            Self::Fixed => &FIXED,
        }
    }

    /// Returns the maximum number of orientations (before duplicates collapse).
    pub fn count(&self) -> usize {
        self.permutations().len()
    }
}

/// An axis-aligned box from `start` (min corner) to `end` (max corner).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Box3D {
    /// Minimum corner (width, depth, height axes).
    pub start: [f64; 3],
    /// Maximum corner.
    pub end: [f64; 3],
}

impl Box3D {
    /// Creates a box from its two corners.
    pub fn new(start: [f64; 3], end: [f64; 3]) -> Self {
        Self { start, end }
    }

    /// Creates a box from an origin and a size.
    pub fn from_origin_and_size(origin: [f64; 3], size: Vector3<f64>) -> Self {
        Self {
            start: origin,
            end: [origin[0] + size.x, origin[1] + size.y, origin[2] + size.z],
        }
    }

    /// Returns the extent along each axis.
    pub fn size(&self) -> Vector3<f64> {
        Vector3::new(
            self.end[0] - self.start[0],
            self.end[1] - self.start[1],
            self.end[2] - self.start[2],
        )
    }

    /// Returns the volume of this box.
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Returns true if `end > start` on every axis.
    pub fn is_proper(&self) -> bool {
        (0..3).all(|axis| self.end[axis] > self.start[axis])
    }

    /// Checks if this box intersects another.
    ///
    /// Boxes that only share a face, edge or corner do not intersect.
    pub fn intersects(&self, other: &Box3D) -> bool {
        (0..3).all(|axis| self.start[axis] < other.end[axis] && self.end[axis] > other.start[axis])
    }

    /// Checks if this box lies within `[(0, 0, 0), extent]`.
    pub fn is_within_extent(&self, extent: &Vector3<f64>) -> bool {
        self.start.iter().all(|&v| v >= 0.0)
            && self.end[0] <= extent.x
            && self.end[1] <= extent.y
            && self.end[2] <= extent.z
    }
}
