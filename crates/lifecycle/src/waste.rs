//! Expiry-based waste classification.

use chrono::NaiveDate;
use stowage_core::{format_date, EntityId, Item};

/// An item whose expiry date could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("item '{item_id}' has malformed expiry date '{value}'")]
pub struct ClassificationError {
    /// The offending item.
    pub item_id: EntityId,
    /// The raw expiry value.
    pub value: String,
}

/// Items classified as waste against one cutoff date.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteReport {
    /// The cutoff the items were classified against.
    pub cutoff: NaiveDate,
    /// Items expiring strictly before the cutoff, in input order.
    pub waste_items: Vec<Item>,
    /// Items that could not be classified.
    pub errors: Vec<ClassificationError>,
}

impl WasteReport {
    /// Human-readable description of the rule applied.
    pub fn note(&self) -> String {
        format!(
            "Items with expiryDate before {} considered waste.",
            format_date(self.cutoff)
        )
    }

    /// Returns true if no item is waste.
    pub fn is_empty(&self) -> bool {
        self.waste_items.is_empty()
    }

    /// Returns true if the item with `item_id` is waste.
    pub fn contains(&self, item_id: &str) -> bool {
        self.waste_items.iter().any(|i| i.id() == item_id)
    }
}

/// Decides whether a single item is waste at `cutoff`.
///
/// # Errors
/// Returns a [`ClassificationError`] if the item's expiry date is malformed.
pub fn is_waste(item: &Item, cutoff: NaiveDate) -> Result<bool, ClassificationError> {
    item.expiry_date()
        .is_before(cutoff)
        .ok_or_else(|| ClassificationError {
            item_id: item.id().clone(),
            value: item.expiry_date().to_string(),
        })
}

/// Partitions `items` into waste and non-waste at `cutoff`.
///
/// An item is waste if it has a bounded expiry date strictly before `cutoff`. Items that
/// never expire are never waste. A malformed date is recorded in the report's error list
/// and classification continues with the remaining items.
pub fn classify_waste(items: &[Item], cutoff: NaiveDate) -> WasteReport {
    let mut report = WasteReport {
        cutoff,
        waste_items: Vec::new(),
        errors: Vec::new(),
    };

    for item in items {
        match is_waste(item, cutoff) {
            Ok(true) => report.waste_items.push(item.clone()),
            Ok(false) => {}
            Err(err) => {
                log::warn!("{}", err);
                report.errors.push(err);
            }
        }
    }

    log::debug!(
        "{} of {} items are waste at {} ({} unreadable)",
        report.waste_items.len(),
        items.len(),
        format_date(cutoff),
        report.errors.len()
    );
    report
}
