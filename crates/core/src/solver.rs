//! Allocator trait and configuration.

use crate::geometry::OrientationPolicy;
use crate::inventory::{Container, Item};
use crate::result::AllocationResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid step used by the free-position scan when none is configured.
pub const DEFAULT_GRID_STEP: f64 = 5.0;

/// Configuration for an allocation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocatorConfig {
    /// Distance between candidate origins on each axis.
    pub grid_step: f64,

    /// Which rotations an item may be placed in.
    pub orientation: OrientationPolicy,

    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,

    /// Search candidate containers for one item in parallel.
    pub parallel_scan: bool,

    /// Maximum number of lower-priority items that may be moved to admit one
    /// unplaced item (0 disables rearrangement).
    pub max_displaced: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
            orientation: OrientationPolicy::default(),
            time_limit_ms: 0,
            parallel_scan: false,
            max_displaced: 0,
        }
    }
}

impl AllocatorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grid step.
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    /// Sets the orientation policy.
    pub fn with_orientation(mut self, policy: OrientationPolicy) -> Self {
        self.orientation = policy;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Enables or disables the parallel container scan.
    pub fn with_parallel_scan(mut self, enabled: bool) -> Self {
        self.parallel_scan = enabled;
        self
    }

    /// Sets the rearrangement bound.
    pub fn with_max_displaced(mut self, n: usize) -> Self {
        self.max_displaced = n;
        self
    }

    /// Returns true if the rearrangement pass is enabled.
    pub fn rearrangement_enabled(&self) -> bool {
        self.max_displaced > 0
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(Error::ConfigError(format!(
                "grid step must be positive, got {}",
                self.grid_step
            )));
        }
        Ok(())
    }
}

/// Trait for container allocators.
pub trait Allocator {
    /// Assigns items to containers.
    ///
    /// Structural problems (duplicate identifiers, invalid configuration) are returned as
    /// errors before any placement is attempted. Per-entity problems are recorded in the
    /// result.
    fn allocate(&self, items: &[Item], containers: &[Container]) -> Result<AllocationResult>;

    /// Cancels an ongoing allocation.
    fn cancel(&self);
}
