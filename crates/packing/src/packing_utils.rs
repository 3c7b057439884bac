//! Shared helpers for the greedy pass and the rearrangement pass.
//!
//! - [`priority_order`]: the order items are processed in
//! - [`candidate_order`]: the order containers are tried for one item
//! - [`volume_utilization`]: placed volume over usable container volume

use stowage_core::{Container, Item};

/// Returns item indices sorted by priority, highest first.
///
/// The sort is stable, so items with equal priority keep their input order.
pub fn priority_order(items: &[Item]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(items[i].priority()));
    order
}

/// Returns container indices to try for `item`: containers in the item's preferred zone
/// in input order, then every other container in input order.
pub fn candidate_order(item: &Item, containers: &[&Container]) -> Vec<usize> {
    let zone = item.preferred_zone();
    let (preferred, fallback): (Vec<usize>, Vec<usize>) =
        (0..containers.len()).partition(|&i| containers[i].zone() == zone);
    preferred.into_iter().chain(fallback).collect()
}

/// Computes the ratio of placed volume to the total volume of `containers`.
pub fn volume_utilization(placed_volume: f64, containers: &[&Container]) -> f64 {
    let total: f64 = containers.iter().map(|c| c.volume()).sum();
    if total > 0.0 {
        placed_volume / total
    } else {
        0.0
    }
}
