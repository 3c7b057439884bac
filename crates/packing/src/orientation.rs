//! Orientation generation for box-shaped items.

use nalgebra::Vector3;
use stowage_core::geometry::OrientationPolicy;
use stowage_core::{Item, Result};

/// One axis permutation of an item's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Index into the policy's canonical permutation list.
    pub index: usize,
    /// Axis of the original dimensions used for (width, depth, height).
    pub permutation: [usize; 3],
    /// Dimensions after the permutation is applied.
    pub dimensions: Vector3<f64>,
}

/// Returns the distinct orientations of `item` allowed by `policy`.
///
/// Permutations that produce the same dimensions as an earlier one are dropped, so an
/// item with three distinct sides yields 6 orientations under [`OrientationPolicy::Any`],
/// one with exactly two equal sides yields 3, and a cube yields 1. The order is the
/// policy's canonical permutation order and is stable across runs.
///
/// # Errors
/// Returns [`stowage_core::Error::InvalidDimension`] if any side is not positive.
pub fn orientations(item: &Item, policy: OrientationPolicy) -> Result<Vec<Orientation>> {
    item.validate()?;
    Ok(distinct_orientations(item.dimensions(), policy))
}

/// Returns the distinct orientations of already validated dimensions.
pub fn distinct_orientations(dims: Vector3<f64>, policy: OrientationPolicy) -> Vec<Orientation> {
    let mut result: Vec<Orientation> = Vec::with_capacity(policy.count());

    for (index, &permutation) in policy.permutations().iter().enumerate() {
        let [x_idx, y_idx, z_idx] = permutation;
        let dimensions = Vector3::new(dims[x_idx], dims[y_idx], dims[z_idx]);

        if result.iter().any(|o| o.dimensions == dimensions) {
            continue;
        }

        result.push(Orientation {
            index,
            permutation,
            dimensions,
        });
    }

    result
}
