//! Bounded displacement pass run after the greedy allocation.
//!
//! An item the greedy pass could not place may evict up to `max_displaced` strictly
//! lower-priority items from one candidate container, provided every evicted item can
//! be placed again somewhere. The attempt runs on a copy of the occupancy and is
//! committed whole or not at all.

use crate::allocator::{first_fit, Bins, FirstFit};
use crate::occupancy::OccupiedRegion;
use crate::oracle::FeasibilityScorer;
use crate::orientation::{orientations, Orientation};
use crate::packing_utils::candidate_order;
use crate::search::{scan, SearchBudget, SearchOutcome};
use std::collections::HashMap;
use stowage_core::{
    AllocationResult, AllocatorConfig, Box3D, EntityId, Item, Placement, Rearrangement, Result,
    UnplacedReason,
};

/// Destination of one displaced item.
struct Move {
    item_id: EntityId,
    container: usize,
    bounds: Box3D,
    orientation_index: usize,
}

/// A fully checked displacement plan.
struct Plan<'a> {
    bins: Bins<'a>,
    placement: Placement,
    moves: Vec<Move>,
}

/// Tries to admit every `NoFitFound` item by displacing lower-priority items.
pub(crate) fn run<'a>(
    items: &[Item],
    bins: &mut Bins<'a>,
    result: &mut AllocationResult,
    scorer: &dyn FeasibilityScorer,
    config: &AllocatorConfig,
    budget: &SearchBudget<'_>,
) -> Result<()> {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id().as_str(), i)).collect();
    let pending: Vec<EntityId> = result
        .unplaced
        .iter()
        .filter(|u| u.reason == UnplacedReason::NoFitFound)
        .map(|u| u.item_id.clone())
        .collect();

    for item_id in pending {
        if budget.check().is_some() {
            break;
        }
        let Some(item) = by_id.get(item_id.as_str()).copied() else {
            continue;
        };
        let Ok(item_orientations) = orientations(item, config.orientation) else {
            continue;
        };

        if let Some(plan) = plan_for(item, &item_orientations, bins, &by_id, scorer, config, budget)? {
            apply(plan, bins, result, item);
        }
    }

    Ok(())
}

fn plan_for<'a>(
    item: &Item,
    item_orientations: &[Orientation],
    bins: &Bins<'a>,
    by_id: &HashMap<&str, &Item>,
    scorer: &dyn FeasibilityScorer,
    config: &AllocatorConfig,
    budget: &SearchBudget<'_>,
) -> Result<Option<Plan<'a>>> {
    for ci in candidate_order(item, &bins.containers) {
        if !scorer.assess(item, bins.containers[ci]).is_accept() {
            continue;
        }

        // Most recently committed first.
        let victims: Vec<OccupiedRegion> = bins.occupancy[ci]
            .iter()
            .rev()
            .filter(|r| r.priority < item.priority())
            .take(config.max_displaced)
            .cloned()
            .collect();

        for k in 1..=victims.len() {
            let mut trial = bins.clone();
            for victim in &victims[..k] {
                trial.occupancy[ci].remove(&victim.item_id);
            }

            let (bounds, orientation_index) = match scan(
                trial.containers[ci],
                &trial.occupancy[ci],
                item_orientations,
                config.grid_step,
                budget,
            ) {
                SearchOutcome::Found {
                    bounds,
                    orientation_index,
                } => (bounds, orientation_index),
                SearchOutcome::NoFit => continue,
                SearchOutcome::Interrupted(_) => return Ok(None),
            };
            trial.commit(
                ci,
                OccupiedRegion::new(item.id().clone(), item.priority(), bounds),
            )?;

            let mut displaced: Vec<&OccupiedRegion> = victims[..k].iter().collect();
            displaced.sort_by_key(|r| std::cmp::Reverse(r.priority));

            if let Some(moves) = replace_all(&displaced, &mut trial, by_id, scorer, config, budget)? {
                if trial.is_consistent() {
                    let placement = Placement::new(
                        item.id().clone(),
                        trial.containers[ci].id().clone(),
                        bounds,
                    )
                    .with_orientation_index(orientation_index);
                    return Ok(Some(Plan {
                        bins: trial,
                        placement,
                        moves,
                    }));
                }
            }
        }
    }

    Ok(None)
}

/// Re-places every displaced item; `None` if any of them no longer fits.
fn replace_all(
    displaced: &[&OccupiedRegion],
    trial: &mut Bins<'_>,
    by_id: &HashMap<&str, &Item>,
    scorer: &dyn FeasibilityScorer,
    config: &AllocatorConfig,
    budget: &SearchBudget<'_>,
) -> Result<Option<Vec<Move>>> {
    let mut moves = Vec::with_capacity(displaced.len());
    for region in displaced {
        let Some(victim) = by_id.get(region.item_id.as_str()).copied() else {
            return Ok(None);
        };
        let Ok(victim_orientations) = orientations(victim, config.orientation) else {
            return Ok(None);
        };
        match first_fit(victim, &victim_orientations, trial, scorer, config, budget) {
            FirstFit::Placed {
                container,
                bounds,
                orientation_index,
            } => {
                trial.commit(
                    container,
                    OccupiedRegion::new(region.item_id.clone(), region.priority, bounds),
                )?;
                moves.push(Move {
                    item_id: region.item_id.clone(),
                    container,
                    bounds,
                    orientation_index,
                });
            }
            FirstFit::Unplaced(_) => return Ok(None),
        }
    }
    Ok(Some(moves))
}

fn apply<'a>(plan: Plan<'a>, bins: &mut Bins<'a>, result: &mut AllocationResult, item: &Item) {
    *bins = plan.bins;

    for mv in &plan.moves {
        let to_container = bins.containers[mv.container].id();
        let Some(placement) = result
            .placements
            .iter_mut()
            .find(|p| p.item_id == mv.item_id)
        else {
            continue;
        };
        if placement.container_id == *to_container && placement.bounds == mv.bounds {
            continue;
        }

        result.rearrangements.push(Rearrangement {
            item_id: mv.item_id.clone(),
            from_container: placement.container_id.clone(),
            from_bounds: placement.bounds,
            to_container: to_container.clone(),
            to_bounds: mv.bounds,
            displaced_by: item.id().clone(),
        });
        placement.container_id = to_container.clone();
        placement.bounds = mv.bounds;
        placement.orientation_index = mv.orientation_index;
    }

    log::info!(
        "Displaced {} item(s) to admit '{}' into '{}'",
        plan.moves.len(),
        item.id(),
        plan.placement.container_id
    );
    result.placements.push(plan.placement);
    result.unplaced.retain(|u| u.item_id != *item.id());
}
