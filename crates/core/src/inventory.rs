//! Inventory model: items, containers and the input record that holds both.

use crate::error::EntityKind;
use crate::expiry::ExpiryDate;
use crate::{Error, Result};
use nalgebra::Vector3;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for an item or container.
pub type EntityId = String;

fn validate_dimensions(kind: EntityKind, id: &str, dims: [f64; 3]) -> Result<()> {
    for (axis, value) in ["width", "depth", "height"].iter().zip(dims) {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::InvalidDimension {
                kind,
                id: id.to_string(),
                detail: format!("{axis} must be positive, got {value}"),
            });
        }
    }
    Ok(())
}

/// A physical item to be stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    item_id: EntityId,
    name: String,
    width: f64,
    depth: f64,
    height: f64,
    priority: i32,
    expiry_date: ExpiryDate,
    usage_limit: i64,
    preferred_zone: String,
}

impl Item {
    /// Creates an item with the given ID and dimensions.
    ///
    /// The name defaults to the ID, priority to 0, the zone to empty, the item never
    /// expires and has no remaining uses.
    pub fn new(id: impl Into<EntityId>, width: f64, depth: f64, height: f64) -> Self {
        let item_id = id.into();
        Self {
            name: item_id.clone(),
            item_id,
            width,
            depth,
            height,
            priority: 0,
            expiry_date: ExpiryDate::Unbounded,
            usage_limit: 0,
            preferred_zone: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority (higher is more urgent).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the preferred zone.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.preferred_zone = zone.into();
        self
    }

    /// Sets the expiry date.
    pub fn with_expiry(mut self, expiry: impl Into<ExpiryDate>) -> Self {
        self.expiry_date = expiry.into();
        self
    }

    /// Sets the remaining-uses counter.
    pub fn with_usage_limit(mut self, uses: i64) -> Self {
        self.usage_limit = uses;
        self
    }

    /// Returns the item ID.
    pub fn id(&self) -> &EntityId {
        &self.item_id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dimensions (width, depth, height).
    pub fn dimensions(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.depth, self.height)
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the preferred zone.
    pub fn preferred_zone(&self) -> &str {
        &self.preferred_zone
    }

    /// Returns the expiry date.
    pub fn expiry_date(&self) -> &ExpiryDate {
        &self.expiry_date
    }

    /// Returns the remaining uses. May be negative once over-consumed.
    pub fn usage_limit(&self) -> i64 {
        self.usage_limit
    }

    /// Deducts `uses` from the remaining-uses counter and returns the new value.
    ///
    /// The counter saturates at `i64::MIN` instead of wrapping.
    pub fn consume(&mut self, uses: i64) -> i64 {
        self.usage_limit = self.usage_limit.saturating_sub(uses);
        self.usage_limit
    }

    /// Returns the volume of the item's bounding box.
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }

    /// Validates the item's dimensions.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(
            EntityKind::Item,
            &self.item_id,
            [self.width, self.depth, self.height],
        )
    }
}

/// A rectangular storage container tagged with a zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Container {
    container_id: EntityId,
    zone: String,
    width: f64,
    depth: f64,
    height: f64,
}

impl Container {
    /// Creates a container with the given ID, zone and dimensions.
    pub fn new(
        id: impl Into<EntityId>,
        zone: impl Into<String>,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        Self {
            container_id: id.into(),
            zone: zone.into(),
            width,
            depth,
            height,
        }
    }

    /// Returns the container ID.
    pub fn id(&self) -> &EntityId {
        &self.container_id
    }

    /// Returns the zone.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Returns the dimensions (width, depth, height).
    pub fn dimensions(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.depth, self.height)
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the depth.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the interior volume.
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }

    /// Validates the container's dimensions.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(
            EntityKind::Container,
            &self.container_id,
            [self.width, self.depth, self.height],
        )
    }
}

/// The input record: items and containers, both in input order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inventory {
    /// Items, in input order.
    pub items: Vec<Item>,
    /// Containers, in input order.
    pub containers: Vec<Container>,
}

impl Inventory {
    /// Creates an inventory from items and containers.
    pub fn new(items: Vec<Item>, containers: Vec<Container>) -> Self {
        Self { items, containers }
    }

    /// Rejects duplicate item or container identifiers.
    pub fn validate_identifiers(&self) -> Result<()> {
        check_unique_ids(&self.items, &self.containers)
    }

    /// Returns the item with the given ID.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns the container with the given ID.
    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id() == id)
    }
}

/// Returns [`Error::DuplicateIdentifier`] for the first repeated item or container ID.
pub fn check_unique_ids(items: &[Item], containers: &[Container]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id().as_str()) {
            return Err(Error::DuplicateIdentifier {
                kind: EntityKind::Item,
                id: item.id().clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for container in containers {
        if !seen.insert(container.id().as_str()) {
            return Err(Error::DuplicateIdentifier {
                kind: EntityKind::Container,
                id: container.id().clone(),
            });
        }
    }

    Ok(())
}
