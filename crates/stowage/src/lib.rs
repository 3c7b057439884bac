//! # Stowage
//!
//! Placement engine for fixed-size storage containers.
//!
//! This crate provides:
//! - **Allocation**: priority-ordered, zone-aware first-fit placement of boxes
//! - **Lifecycle**: expiry-based waste classification and usage simulation
//!
//! ## Quick Start
//!
//! ```rust
//! use stowage::packing::PriorityAllocator;
//! use stowage::core::{Allocator, Container, Item};
//!
//! let items = vec![Item::new("I1", 10.0, 10.0, 10.0).with_priority(90).with_zone("A")];
//! let containers = vec![Container::new("C1", "A", 20.0, 20.0, 20.0)];
//!
//! let result = PriorityAllocator::default_config().allocate(&items, &containers)?;
//! assert!(result.all_placed());
//! # Ok::<(), stowage::core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `packing` (default): allocator, fit oracle and free-position search
//! - `lifecycle` (default): waste classifier and time simulator
//! - `serde`: Serialization support

/// Core model, errors and abstractions.
pub use stowage_core as core;

/// Placement algorithms.
#[cfg(feature = "packing")]
pub use stowage_packing as packing;

/// Waste classification and simulation.
#[cfg(feature = "lifecycle")]
pub use stowage_lifecycle as lifecycle;

// Re-export commonly used types at root level
pub use stowage_core::{
    AllocationResult, Allocator, AllocatorConfig, Container, Error, Inventory, Item, Placement,
    Result,
};
