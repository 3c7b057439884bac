//! Allocation result representation.

use crate::placement::{
    Placement, PlacementStats, Rearrangement, SkippedContainer, UnplacedItem, UnplacedReason,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of an allocation run: the manifest of what was placed, moved and skipped.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationResult {
    /// Placements, in commit order (priority order).
    pub placements: Vec<Placement>,

    /// Moves made by the rearrangement pass. Empty unless rearrangement is enabled.
    pub rearrangements: Vec<Rearrangement>,

    /// Items that could not be placed, in priority order.
    pub unplaced: Vec<UnplacedItem>,

    /// Containers excluded from the run.
    pub skipped_containers: Vec<SkippedContainer>,

    /// Volume of placed items divided by volume of usable containers (0.0 - 1.0).
    pub utilization: f64,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Whether the run was cancelled early.
    pub cancelled: bool,
}

impl AllocationResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every item was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns true if the run completed without cancellation.
    pub fn completed_normally(&self) -> bool {
        !self.cancelled
    }

    /// Returns the placement of the given item, if any.
    pub fn placement_of(&self, item_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.item_id == item_id)
    }

    /// Returns all placements committed to the given container, in commit order.
    pub fn placements_in<'a>(&'a self, container_id: &'a str) -> impl Iterator<Item = &'a Placement> {
        self.placements
            .iter()
            .filter(move |p| p.container_id == container_id)
    }

    /// Returns the reason the given item was not placed, if it was not.
    pub fn unplaced_reason(&self, item_id: &str) -> Option<&UnplacedReason> {
        self.unplaced
            .iter()
            .find(|u| u.item_id == item_id)
            .map(|u| &u.reason)
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(&self.placements)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }
}

/// Summary statistics for an allocation result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationSummary {
    /// Total items requested.
    pub total_requested: usize,
    /// Total items placed.
    pub total_placed: usize,
    /// Items moved by rearrangement.
    pub total_moved: usize,
    /// Containers excluded from the run.
    pub containers_skipped: usize,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Computation time in milliseconds.
    pub time_ms: u64,
}

impl From<&AllocationResult> for AllocationSummary {
    fn from(result: &AllocationResult) -> Self {
        Self {
            total_requested: result.placements.len() + result.unplaced.len(),
            total_placed: result.placements.len(),
            total_moved: result.rearrangements.len(),
            containers_skipped: result.skipped_containers.len(),
            utilization_percent: result.utilization * 100.0,
            time_ms: result.computation_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Box3D;

    fn placement(item: &str, container: &str) -> Placement {
        Placement::new(item, container, Box3D::new([0.0; 3], [1.0; 3]))
    }

    #[test]
    fn test_result_new() {
        let result = AllocationResult::new();
        assert!(result.placements.is_empty());
        assert!(result.rearrangements.is_empty());
        assert_eq!(result.utilization, 0.0);
        assert!(result.all_placed());
        assert!(result.completed_normally());
    }

    #[test]
    fn test_lookup() {
        let mut result = AllocationResult::new();
        result.placements.push(placement("I1", "C1"));
        result.placements.push(placement("I2", "C2"));
        result.placements.push(placement("I3", "C1"));
        result
            .unplaced
            .push(UnplacedItem::new("I4", UnplacedReason::NoFitFound));

        assert_eq!(result.placement_of("I2").map(|p| p.container_id.as_str()), Some("C2"));
        assert!(result.placement_of("I4").is_none());
        assert_eq!(result.placements_in("C1").count(), 2);
        assert_eq!(result.unplaced_reason("I4"), Some(&UnplacedReason::NoFitFound));
        assert!(result.unplaced_reason("I1").is_none());
    }

    #[test]
    fn test_summary() {
        let mut result = AllocationResult::new();
        result.placements.push(placement("I1", "C1"));
        result
            .unplaced
            .push(UnplacedItem::new("I2", UnplacedReason::NoFitFound));
        result.utilization = 0.75;
        result.computation_time_ms = 12;

        let summary = AllocationSummary::from(&result);
        assert_eq!(summary.total_requested, 2);
        assert_eq!(summary.total_placed, 1);
        assert_eq!(summary.utilization_percent, 75.0);
        assert_eq!(result.utilization_percent(), "75.0%");
    }
}
