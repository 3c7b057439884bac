//! Inventory and placement file parser.

use crate::wire::{PlacementOutput, PlacementRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use stowage::core::{Container, Inventory, Item, Placement};
use thiserror::Error;

/// Errors that can occur when loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Inventory(#[from] stowage::Error),
}

/// Parser for inventory, placement and usage files.
///
/// Inventories come in two shapes: an object with `items` and `containers` arrays, or
/// one flat array mixing both kinds of record, told apart by their `itemId` or
/// `containerId` field.
#[derive(Debug, Default)]
pub struct InventoryParser;

impl InventoryParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses an inventory from a JSON file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Inventory, LoadError> {
        let content = fs::read_to_string(path)?;
        self.parse_json(&content)
    }

    /// Parses an inventory from a JSON string.
    ///
    /// Duplicate item or container IDs are rejected here, before any processing.
    pub fn parse_json(&self, json: &str) -> Result<Inventory, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        let is_split = value.get("items").is_some() && value.get("containers").is_some();
        let inventory = match value {
            Value::Array(records) => self.split_records(records)?,
            value if is_split => Inventory::deserialize(value)?,
            _ => {
                return Err(LoadError::InvalidFormat(
                    "expected an object with 'items' and 'containers' or an array of records"
                        .into(),
                ))
            }
        };

        inventory.validate_identifiers()?;
        if let Some(item) = inventory.items.iter().find(|i| i.usage_limit() < 0) {
            return Err(LoadError::InvalidFormat(format!(
                "item '{}' has negative usageLimit {}",
                item.id(),
                item.usage_limit()
            )));
        }
        log::debug!(
            "Loaded {} items and {} containers",
            inventory.items.len(),
            inventory.containers.len()
        );
        Ok(inventory)
    }

    /// Parses placements from a placement output file.
    pub fn parse_placements_file(&self, path: impl AsRef<Path>) -> Result<Vec<Placement>, LoadError> {
        let content = fs::read_to_string(path)?;
        self.parse_placements(&content)
    }

    /// Parses placements from placement output JSON, or from a bare array of placements.
    pub fn parse_placements(&self, json: &str) -> Result<Vec<Placement>, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        let records: Vec<PlacementRecord> = match value {
            Value::Array(_) => Vec::deserialize(value)?,
            _ => PlacementOutput::deserialize(value)?.placements,
        };
        Ok(records.into_iter().map(Placement::from).collect())
    }

    /// Parses a daily usage map `{"itemId": quantity, ...}`.
    ///
    /// Quantities must not be negative.
    pub fn parse_usage(&self, json: &str) -> Result<HashMap<String, i64>, LoadError> {
        let usage: HashMap<String, i64> = serde_json::from_str(json)?;
        if let Some((id, quantity)) = usage.iter().find(|(_, quantity)| **quantity < 0) {
            return Err(LoadError::InvalidFormat(format!(
                "usage quantity for item '{}' must not be negative, got {}",
                id, quantity
            )));
        }
        Ok(usage)
    }

    /// Splits a flat record list into items and containers, keeping input order.
    fn split_records(&self, records: Vec<Value>) -> Result<Inventory, LoadError> {
        let mut inventory = Inventory::default();

        for (index, record) in records.into_iter().enumerate() {
            if record.get("itemId").is_some() {
                let item = Item::deserialize(record).map_err(|e| {
                    LoadError::InvalidFormat(format!("record {}: {}", index, e))
                })?;
                inventory.items.push(item);
            } else if record.get("containerId").is_some() {
                let container = Container::deserialize(record).map_err(|e| {
                    LoadError::InvalidFormat(format!("record {}: {}", index, e))
                })?;
                inventory.containers.push(container);
            } else {
                log::debug!("Ignoring record {} without itemId or containerId", index);
            }
        }

        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage::core::ExpiryDate;

    const ITEM: &str = r#"{
        "itemId": "I1", "name": "Food Packet",
        "width": 10, "depth": 10, "height": 20,
        "priority": 80, "expiryDate": "2025-05-20", "usageLimit": 30,
        "preferredZone": "Crew Quarters"
    }"#;

    const CONTAINER: &str = r#"{
        "containerId": "C1", "zone": "Crew Quarters",
        "width": 100, "depth": 85, "height": 200
    }"#;

    #[test]
    fn test_parse_split_format() {
        let json = format!(r#"{{"items": [{ITEM}], "containers": [{CONTAINER}]}}"#);
        let inventory = InventoryParser::new().parse_json(&json).unwrap();

        assert_eq!(inventory.items.len(), 1);
        let item = &inventory.items[0];
        assert_eq!(item.name(), "Food Packet");
        assert_eq!(item.priority(), 80);
        assert_eq!(item.usage_limit(), 30);
        assert_eq!(item.preferred_zone(), "Crew Quarters");
        assert_eq!(item.expiry_date(), &ExpiryDate::parse("2025-05-20"));
        assert_eq!(inventory.containers[0].height(), 200.0);
    }

    #[test]
    fn test_parse_flat_format() {
        let json = format!(r#"[{CONTAINER}, {ITEM}, {{"note": "ignored"}}]"#);
        let inventory = InventoryParser::new().parse_json(&json).unwrap();

        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.containers.len(), 1);
        assert_eq!(inventory.containers[0].id(), "C1");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"[{"itemId": "I1", "width": 1, "depth": 1, "height": 1}]"#;
        let err = InventoryParser::new().parse_json(json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = format!(r#"{{"items": [{ITEM}, {ITEM}], "containers": []}}"#);
        let err = InventoryParser::new().parse_json(&json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Inventory(stowage::Error::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let err = InventoryParser::new().parse_json(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }

    #[test]
    fn test_malformed_expiry_is_kept() {
        let item = ITEM.replace("2025-05-20", "next week");
        let json = format!(r#"{{"items": [{item}], "containers": []}}"#);
        let inventory = InventoryParser::new().parse_json(&json).unwrap();
        assert!(inventory.items[0].expiry_date().is_malformed());
    }

    #[test]
    fn test_parse_usage() {
        let usage = InventoryParser::new()
            .parse_usage(r#"{"I1": 3, "I2": 1}"#)
            .unwrap();
        assert_eq!(usage.get("I1"), Some(&3));
    }

    #[test]
    fn test_negative_usage_is_rejected() {
        let err = InventoryParser::new()
            .parse_usage(r#"{"I1": -5}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }

    #[test]
    fn test_negative_usage_limit_is_rejected() {
        let item = ITEM.replace("\"usageLimit\": 30", "\"usageLimit\": -1");
        let json = format!(r#"{{"items": [{item}], "containers": []}}"#);
        let err = InventoryParser::new().parse_json(&json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }
}
