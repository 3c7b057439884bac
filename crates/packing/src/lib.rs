//! # Stowage Packing
//!
//! Axis-aligned box placement for the Stowage engine.
//!
//! This crate provides orientation generation, containment and overlap checks, the
//! grid-based free-position search and the priority-driven first-fit allocator.
//!
//! ## Quick Start
//!
//! ```rust
//! use stowage_packing::{Allocator, Container, Item, PriorityAllocator};
//!
//! let items = vec![Item::new("I1", 10.0, 10.0, 10.0).with_priority(90).with_zone("A")];
//! let containers = vec![Container::new("C1", "A", 20.0, 20.0, 20.0)];
//!
//! let result = PriorityAllocator::default_config()
//!     .allocate(&items, &containers)
//!     .unwrap();
//! assert_eq!(result.placements[0].bounds.start, [0.0, 0.0, 0.0]);
//! ```

pub mod allocator;
pub mod occupancy;
pub mod oracle;
pub mod orientation;
pub mod packing_utils;
mod rearrange;
pub mod search;

// Re-exports
pub use allocator::PriorityAllocator;
pub use occupancy::{OccupancySet, OccupiedRegion};
pub use oracle::{fits, overlaps, AcceptAll, DimensionScorer, Feasibility, FeasibilityScorer};
pub use orientation::{distinct_orientations, orientations, Orientation};
pub use search::{find_free_position, scan, Interrupt, SearchBudget, SearchOutcome};
pub use stowage_core::{
    AllocationResult, Allocator, AllocatorConfig, Box3D, Container, Error, Item,
    OrientationPolicy, Placement, Result,
};
