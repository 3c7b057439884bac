//! Per-container occupancy sets for collision detection.
//!
//! For the handful of boxes a storage container holds, a flat list with AABB tests
//! outperforms tree-based structures due to cache locality. Callers with much larger
//! containers can swap in a spatial tree behind the same queries, as long as
//! [`OccupancySet::has_collision`] keeps its semantics.

use crate::oracle::{fits, overlaps};
use stowage_core::{Box3D, Container, EntityId, Error, Result};

/// A committed region inside a container.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupiedRegion {
    /// The item occupying the region.
    pub item_id: EntityId,
    /// Priority of that item, used to pick rearrangement candidates.
    pub priority: i32,
    /// The occupied box.
    pub bounds: Box3D,
}

impl OccupiedRegion {
    /// Creates a new region.
    pub fn new(item_id: impl Into<EntityId>, priority: i32, bounds: Box3D) -> Self {
        Self {
            item_id: item_id.into(),
            priority,
            bounds,
        }
    }
}

/// The ordered set of committed, pairwise non-overlapping regions of one container.
#[derive(Debug, Clone, Default)]
pub struct OccupancySet {
    entries: Vec<OccupiedRegion>,
}

impl OccupancySet {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Creates a set from already committed boxes, e.g. a container's current contents.
    pub fn from_boxes(boxes: impl IntoIterator<Item = Box3D>) -> Self {
        Self {
            entries: boxes
                .into_iter()
                .enumerate()
                .map(|(i, bounds)| OccupiedRegion::new(format!("#{i}"), i32::MAX, bounds))
                .collect(),
        }
    }

    /// Commits a region to `container`.
    ///
    /// # Errors
    /// Returns [`Error::Internal`] if the region leaves the container or overlaps an
    /// existing region. The set is left unchanged in that case.
    pub fn commit(&mut self, region: OccupiedRegion, container: &Container) -> Result<()> {
        if !region.bounds.is_proper() || !fits(&region.bounds, container) {
            return Err(Error::Internal(format!(
                "region for '{}' leaves container '{}'",
                region.item_id,
                container.id()
            )));
        }
        if let Some(other) = self.query(&region.bounds).first() {
            return Err(Error::Internal(format!(
                "region for '{}' overlaps '{}' in container '{}'",
                region.item_id,
                other.item_id,
                container.id()
            )));
        }
        self.entries.push(region);
        Ok(())
    }

    /// Removes the region held by `item_id`.
    pub fn remove(&mut self, item_id: &str) -> Option<OccupiedRegion> {
        let pos = self.entries.iter().position(|e| e.item_id == item_id)?;
        Some(self.entries.remove(pos))
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the regions in commit order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &OccupiedRegion> {
        self.entries.iter()
    }

    /// Returns all regions overlapping `bounds`.
    pub fn query(&self, bounds: &Box3D) -> Vec<&OccupiedRegion> {
        self.entries
            .iter()
            .filter(|entry| overlaps(&entry.bounds, bounds))
            .collect()
    }

    /// Checks if `bounds` would overlap any committed region.
    pub fn has_collision(&self, bounds: &Box3D) -> bool {
        self.entries
            .iter()
            .any(|entry| overlaps(&entry.bounds, bounds))
    }

    /// Checks if `bounds` fits `container` and collides with nothing.
    pub fn can_place(&self, bounds: &Box3D, container: &Container) -> bool {
        fits(bounds, container) && !self.has_collision(bounds)
    }

    /// Returns the summed volume of all regions.
    pub fn occupied_volume(&self) -> f64 {
        self.entries.iter().map(|e| e.bounds.volume()).sum()
    }

    /// Checks every region is inside `container` and no two regions overlap.
    pub fn is_consistent(&self, container: &Container) -> bool {
        self.entries.iter().enumerate().all(|(i, a)| {
            fits(&a.bounds, container)
                && self.entries[i + 1..]
                    .iter()
                    .all(|b| !overlaps(&a.bounds, &b.bounds))
        })
    }
}
