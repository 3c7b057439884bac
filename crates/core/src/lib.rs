//! # Stowage Core
//!
//! Core types and abstractions for the Stowage container allocation engine.
//!
//! This crate provides the inventory model and records shared by the placement
//! engine and the lifecycle classifiers.
//!
//! ## Core Components
//!
//! - **Inventory**: [`Item`], [`Container`], [`Inventory`]
//! - **Expiry dates**: [`ExpiryDate`] with the `"N/A"` never-expires sentinel
//! - **Geometry**: [`Box3D`], [`OrientationPolicy`]
//! - **Records**: [`Placement`], [`Rearrangement`], [`UnplacedItem`], [`AllocationResult`]
//! - **Allocator trait**: [`Allocator`], configured by [`AllocatorConfig`]
//!
//! ## Configuration
//!
//! ```rust
//! use stowage_core::{AllocatorConfig, OrientationPolicy};
//!
//! let config = AllocatorConfig::new()
//!     .with_grid_step(5.0)
//!     .with_orientation(OrientationPolicy::Upright)
//!     .with_time_limit(2000);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod expiry;
pub mod geometry;
pub mod inventory;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{EntityKind, Error, Result};
pub use expiry::{format_date, parse_date, ExpiryDate, DATE_FORMAT, UNBOUNDED_SENTINEL};
pub use geometry::{Box3D, OrientationPolicy};
pub use inventory::{check_unique_ids, Container, EntityId, Inventory, Item};
pub use placement::{
    Placement, PlacementStats, Rearrangement, SkippedContainer, UnplacedItem, UnplacedReason,
};
pub use result::{AllocationResult, AllocationSummary};
pub use solver::{Allocator, AllocatorConfig, DEFAULT_GRID_STEP};

pub use chrono::NaiveDate;
