//! # Stowage Lifecycle
//!
//! Time-dependent inventory state for the Stowage engine: which items are waste at a
//! given date, and how usage and expiry evolve as a simulated calendar advances.
//!
//! Both operations are independent of placement.
//!
//! ```rust
//! use std::collections::HashMap;
//! use stowage_lifecycle::{classify_waste, TimeSimulator};
//! use stowage_core::{parse_date, Item};
//!
//! let mut items = vec![Item::new("I1", 1.0, 1.0, 1.0).with_usage_limit(3).with_expiry("2024-01-01")];
//! let cutoff = parse_date("2025-06-01").unwrap();
//! assert!(classify_waste(&items, cutoff).contains("I1"));
//!
//! let mut sim = TimeSimulator::default();
//! let usage = HashMap::from([("I1".to_string(), 3)]);
//! let report = sim.advance(&mut items, 2, &usage).unwrap();
//! assert_eq!(report.items_depleted[0].item_id, "I1");
//! ```

pub mod simulation;
pub mod waste;

pub use simulation::{
    ItemRef, ItemUsage, SimulationConfig, SimulationReport, TimeSimulator, UsageMode,
    DEFAULT_START_DATE,
};
pub use waste::{classify_waste, is_waste, ClassificationError, WasteReport};
