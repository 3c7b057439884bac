//! Command-line front end for the Stowage placement engine.
//!
//! This crate provides:
//! - Inventory loading from the split and flat-list JSON formats
//! - JSON output records for placement, waste, simulation and search results
//! - CSV export of an arrangement
//! - Item lookup with retrieval steps

pub mod export;
pub mod parser;
pub mod search;
pub mod wire;

pub use export::{arrangement_csv, write_arrangement_csv, CSV_HEADER};
pub use parser::{InventoryParser, LoadError};
pub use search::{locate, Query, RetrievalAction, RetrievalStep, SearchHit};
pub use wire::{PlacementOutput, SearchOutput, SimulationOutput, WasteOutput};
