//! Placement records produced by an allocation run.

use crate::geometry::Box3D;
use crate::inventory::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the placement of an item inside a container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The ID of the placed item.
    pub item_id: EntityId,

    /// The container the item was placed in.
    pub container_id: EntityId,

    /// The region the item occupies.
    pub bounds: Box3D,

    /// The orientation index used (into the policy's canonical permutation list).
    pub orientation_index: usize,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(item_id: impl Into<EntityId>, container_id: impl Into<EntityId>, bounds: Box3D) -> Self {
        Self {
            item_id: item_id.into(),
            container_id: container_id.into(),
            bounds,
            orientation_index: 0,
        }
    }

    /// Sets the orientation index.
    pub fn with_orientation_index(mut self, index: usize) -> Self {
        self.orientation_index = index;
        self
    }

    /// Returns the start corner.
    pub fn start(&self) -> [f64; 3] {
        self.bounds.start
    }

    /// Returns the end corner.
    pub fn end(&self) -> [f64; 3] {
        self.bounds.end
    }
}

/// A move of a previously committed item made to admit a higher-priority one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rearrangement {
    /// The displaced item.
    pub item_id: EntityId,
    /// Container the item was taken out of.
    pub from_container: EntityId,
    /// Region the item occupied before the move.
    pub from_bounds: Box3D,
    /// Container the item was moved into.
    pub to_container: EntityId,
    /// Region the item occupies after the move.
    pub to_bounds: Box3D,
    /// The higher-priority item whose placement caused the move.
    pub displaced_by: EntityId,
}

/// Why an item ended up without a placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnplacedReason {
    /// No candidate container had an admissible position.
    NoFitFound,
    /// The item has a non-positive or non-finite dimension.
    InvalidDimension(String),
    /// Every candidate container was rejected by the feasibility scorer.
    RejectedByScorer,
    /// The wall-clock budget ran out before the search finished.
    TimeBudgetExceeded,
    /// The run was cancelled before this item was considered.
    Cancelled,
}

impl std::fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFitFound => f.write_str("no free position in any candidate container"),
            Self::InvalidDimension(detail) => write!(f, "invalid dimension: {detail}"),
            Self::RejectedByScorer => f.write_str("rejected by feasibility scorer"),
            Self::TimeBudgetExceeded => f.write_str("time budget exceeded"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// An item that could not be placed, with the reason.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnplacedItem {
    /// The item ID.
    pub item_id: EntityId,
    /// Why it was not placed.
    pub reason: UnplacedReason,
}

impl UnplacedItem {
    /// Creates a new unplaced record.
    pub fn new(item_id: impl Into<EntityId>, reason: UnplacedReason) -> Self {
        Self {
            item_id: item_id.into(),
            reason,
        }
    }
}

/// A container excluded from the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedContainer {
    /// The container ID.
    pub container_id: EntityId,
    /// Why it was excluded.
    pub reason: String,
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Placements that were not in the original orientation.
    pub rotated_count: usize,
    /// Distribution of orientation indices used.
    pub orientation_distribution: std::collections::BTreeMap<usize, usize>,
    /// Distribution of placements per container.
    pub container_distribution: std::collections::BTreeMap<EntityId, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut stats = Self {
            count: placements.len(),
            ..Default::default()
        };

        for p in placements {
            if p.orientation_index != 0 {
                stats.rotated_count += 1;
            }

            *stats
                .orientation_distribution
                .entry(p.orientation_index)
                .or_insert(0) += 1;

            *stats
                .container_distribution
                .entry(p.container_id.clone())
                .or_insert(0) += 1;
        }

        stats
    }
}
