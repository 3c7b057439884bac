//! Free-position search over a discretized grid of candidate origins.
//!
//! For each orientation in canonical order, origins are scanned on a grid of step `S`
//! with x outermost, then y, then z innermost, each ascending from 0. The first origin
//! whose box is contained and collides with nothing wins. That order decides which slot
//! is returned when several are valid, so it must not change.

use crate::occupancy::OccupancySet;
use crate::oracle::fits;
use crate::orientation::{orientations, Orientation};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use stowage_core::{AllocatorConfig, Box3D, Container, Item, Result};

/// Why a search stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// The wall-clock budget ran out.
    Deadline,
    /// The run was cancelled.
    Cancelled,
}

/// Outcome of a free-position search in one container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// An admissible box was found.
    Found {
        /// The box to commit.
        bounds: Box3D,
        /// The orientation index it uses.
        orientation_index: usize,
    },
    /// Every candidate origin was scanned and none was admissible.
    NoFit,
    /// The scan stopped early.
    Interrupted(Interrupt),
}

impl SearchOutcome {
    /// Returns the found box, if any.
    pub fn bounds(&self) -> Option<Box3D> {
        match self {
            Self::Found { bounds, .. } => Some(*bounds),
            _ => None,
        }
    }
}

/// Wall-clock and cancellation limits for a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBudget<'a> {
    deadline: Option<Instant>,
    cancelled: Option<&'a AtomicBool>,
}

impl<'a> SearchBudget<'a> {
    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Sets a deadline `limit_ms` after `start` (0 = no deadline).
    pub fn with_time_limit(mut self, start: Instant, limit_ms: u64) -> Self {
        self.deadline = (limit_ms > 0).then(|| start + Duration::from_millis(limit_ms));
        self
    }

    /// Attaches a cancellation flag.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancelled = Some(flag);
        self
    }

    /// Returns the reason the budget is exhausted, if it is.
    pub fn check(&self) -> Option<Interrupt> {
        if self.cancelled.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Some(Interrupt::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(Interrupt::Deadline);
        }
        None
    }
}

/// Grid coordinates `0, step, 2*step, ...` not exceeding `max`.
fn grid(max: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u64..)
        .map(move |i| i as f64 * step)
        .take_while(move |&v| v <= max)
}

/// Scans `container` for the first admissible box over `orientations`.
pub fn scan(
    container: &Container,
    occupied: &OccupancySet,
    orientations: &[Orientation],
    step: f64,
    budget: &SearchBudget<'_>,
) -> SearchOutcome {
    let extent = container.dimensions();

    for orientation in orientations {
        let dims = orientation.dimensions;
        let (max_x, max_y, max_z) = (extent.x - dims.x, extent.y - dims.y, extent.z - dims.z);
        if max_x < 0.0 || max_y < 0.0 || max_z < 0.0 {
            continue;
        }

        for x in grid(max_x, step) {
            if let Some(interrupt) = budget.check() {
                return SearchOutcome::Interrupted(interrupt);
            }
            for y in grid(max_y, step) {
                for z in grid(max_z, step) {
                    let candidate = Box3D::from_origin_and_size([x, y, z], dims);
                    if occupied.has_collision(&candidate) {
                        continue;
                    }
                    if fits(&candidate, container) {
                        return SearchOutcome::Found {
                            bounds: candidate,
                            orientation_index: orientation.index,
                        };
                    }
                }
            }
        }
    }

    SearchOutcome::NoFit
}

/// Finds the first admissible box for `item` in `container`, or `None`.
///
/// # Errors
/// Returns an error if the item has an invalid dimension or the configuration is invalid.
pub fn find_free_position(
    container: &Container,
    occupied: &OccupancySet,
    item: &Item,
    config: &AllocatorConfig,
) -> Result<Option<Box3D>> {
    config.validate()?;
    let candidates = orientations(item, config.orientation)?;
    let budget = SearchBudget::unlimited().with_time_limit(Instant::now(), config.time_limit_ms);
    Ok(scan(container, occupied, &candidates, config.grid_step, &budget).bounds())
}
