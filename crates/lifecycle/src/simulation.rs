//! Calendar simulation: usage deduction, depletion and expiry over time.

use crate::waste::{classify_waste, ClassificationError};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use stowage_core::{format_date, EntityId, Error, Item, Result};

/// Date the simulated calendar starts on unless configured otherwise.
pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 4, 16) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// How a daily usage quantity is applied over a multi-day step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsageMode {
    /// The quantity is deducted once per call, whatever the number of days.
    #[default]
    Once,
    /// The quantity is deducted once per simulated day.
    PerDay,
}

/// Configuration of a [`TimeSimulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// First date of the simulated calendar.
    pub start_date: NaiveDate,
    /// How usage quantities scale with the number of days.
    pub usage_mode: UsageMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            usage_mode: UsageMode::Once,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration: start on [`DEFAULT_START_DATE`], deduct once.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first date of the calendar.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Sets how usage quantities scale with the number of days.
    pub fn with_usage_mode(mut self, mode: UsageMode) -> Self {
        self.usage_mode = mode;
        self
    }
}

/// An item whose usage was deducted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUsage {
    /// The item ID.
    pub item_id: EntityId,
    /// The item's display name.
    pub name: String,
    /// Uses left after the deduction; may be negative.
    pub remaining_uses: i64,
}

/// An item named in an expired or depleted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    /// The item ID.
    pub item_id: EntityId,
    /// The item's display name.
    pub name: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id().clone(),
            name: item.name().to_string(),
        }
    }
}

/// Outcome of one [`TimeSimulator::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// Date before the call.
    pub previous_date: NaiveDate,
    /// Date after the call.
    pub new_date: NaiveDate,
    /// Items with a usage entry, in input order.
    pub items_used: Vec<ItemUsage>,
    /// Items expired at the new date.
    pub items_expired: Vec<ItemRef>,
    /// Items whose remaining uses dropped to zero or below in this call.
    pub items_depleted: Vec<ItemRef>,
    /// Usage entries that named no known item, sorted.
    pub unknown_items: Vec<EntityId>,
    /// Items whose expiry date could not be read.
    pub errors: Vec<ClassificationError>,
}

/// Advances a simulated calendar over an inventory.
///
/// The simulator owns the current date. Each successful [`advance`](Self::advance) moves
/// it forward, so a sequence of calls forms one calendar.
#[derive(Debug, Clone)]
pub struct TimeSimulator {
    current_date: NaiveDate,
    config: SimulationConfig,
}

impl Default for TimeSimulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl TimeSimulator {
    /// Creates a simulator positioned on the configured start date.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            current_date: config.start_date,
            config,
        }
    }

    /// Returns the current simulated date.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Moves the calendar back to the configured start date.
    pub fn reset(&mut self) {
        self.current_date = self.config.start_date;
    }

    /// Advances the calendar by `num_days`, deducting `daily_usage` from `items`.
    ///
    /// `usage_limit` is mutated in place on the given items. Callers that need to rerun a
    /// step must keep a copy of the items beforehand.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `num_days` is zero, a usage quantity is
    /// negative or the new date is out of range. Nothing is mutated in that case.
    pub fn advance(
        &mut self,
        items: &mut [Item],
        num_days: u32,
        daily_usage: &HashMap<EntityId, i64>,
    ) -> Result<SimulationReport> {
        if num_days == 0 {
            return Err(Error::InvalidArgument(
                "number of days to simulate must be at least 1".into(),
            ));
        }
        if let Some((id, quantity)) = daily_usage
            .iter()
            .filter(|(_, quantity)| **quantity < 0)
            .min_by(|a, b| a.0.cmp(b.0))
        {
            return Err(Error::InvalidArgument(format!(
                "usage quantity for item '{}' must not be negative, got {}",
                id, quantity
            )));
        }
        let new_date = self
            .current_date
            .checked_add_days(Days::new(u64::from(num_days)))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "cannot advance {} days past {}",
                    num_days,
                    format_date(self.current_date)
                ))
            })?;

        let mut items_used = Vec::new();
        let mut items_depleted = Vec::new();
        for item in items.iter_mut() {
            let Some(&quantity) = daily_usage.get(item.id()) else {
                continue;
            };
            let uses = match self.config.usage_mode {
                UsageMode::Once => quantity,
                UsageMode::PerDay => quantity.saturating_mul(i64::from(num_days)),
            };
            let remaining_uses = item.consume(uses);
            if remaining_uses <= 0 {
                items_depleted.push(ItemRef::from(&*item));
            }
            items_used.push(ItemUsage {
                item_id: item.id().clone(),
                name: item.name().to_string(),
                remaining_uses,
            });
        }

        let mut unknown_items: Vec<EntityId> = daily_usage
            .keys()
            .filter(|id| !items.iter().any(|item| item.id() == *id))
            .cloned()
            .collect();
        unknown_items.sort();
        for id in &unknown_items {
            log::warn!("Usage entry for unknown item '{}' ignored", id);
        }

        let waste = classify_waste(items, new_date);
        let report = SimulationReport {
            previous_date: self.current_date,
            new_date,
            items_used,
            items_expired: waste.waste_items.iter().map(ItemRef::from).collect(),
            items_depleted,
            unknown_items,
            errors: waste.errors,
        };
        self.current_date = new_date;

        log::info!(
            "Simulated {} -> {}: {} used, {} depleted, {} expired",
            format_date(report.previous_date),
            format_date(report.new_date),
            report.items_used.len(),
            report.items_depleted.len(),
            report.items_expired.len()
        );
        Ok(report)
    }
}
