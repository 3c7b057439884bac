//! Priority-driven first-fit allocator.

use crate::occupancy::{OccupancySet, OccupiedRegion};
use crate::oracle::{AcceptAll, FeasibilityScorer};
use crate::orientation::{orientations, Orientation};
use crate::packing_utils::{candidate_order, priority_order, volume_utilization};
use crate::rearrange;
use crate::search::{scan, Interrupt, SearchBudget, SearchOutcome};
use rayon::prelude::*;
use stowage_core::{
    check_unique_ids, AllocationResult, AllocationSummary, Allocator, AllocatorConfig, Box3D, Container, Error, Item,
    Placement, Result, SkippedContainer, UnplacedItem, UnplacedReason,
};

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Usable containers of one run and their occupancy, index-aligned.
#[derive(Debug, Clone)]
pub(crate) struct Bins<'a> {
    pub(crate) containers: Vec<&'a Container>,
    pub(crate) occupancy: Vec<OccupancySet>,
}

impl<'a> Bins<'a> {
    pub(crate) fn new(containers: Vec<&'a Container>) -> Self {
        let occupancy = vec![OccupancySet::new(); containers.len()];
        Self {
            containers,
            occupancy,
        }
    }

    /// Commits `region` to the container at `index`, re-checking the invariants.
    pub(crate) fn commit(&mut self, index: usize, region: OccupiedRegion) -> Result<()> {
        self.occupancy[index].commit(region, self.containers[index])
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.containers
            .iter()
            .zip(&self.occupancy)
            .all(|(container, set)| set.is_consistent(container))
    }
}

/// Result of trying every candidate container for one item.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FirstFit {
    Placed {
        container: usize,
        bounds: Box3D,
        orientation_index: usize,
    },
    Unplaced(UnplacedReason),
}

fn resolve(container: usize, outcome: SearchOutcome) -> Option<FirstFit> {
    match outcome {
        SearchOutcome::Found {
            bounds,
            orientation_index,
        } => Some(FirstFit::Placed {
            container,
            bounds,
            orientation_index,
        }),
        SearchOutcome::NoFit => None,
        SearchOutcome::Interrupted(Interrupt::Deadline) => {
            Some(FirstFit::Unplaced(UnplacedReason::TimeBudgetExceeded))
        }
        SearchOutcome::Interrupted(Interrupt::Cancelled) => {
            Some(FirstFit::Unplaced(UnplacedReason::Cancelled))
        }
    }
}

/// Tries the candidate containers of `item` in order and returns the first admissible slot.
///
/// With `parallel_scan`, every accepted container is searched concurrently and the
/// outcomes are read back in candidate order, so the choice matches the sequential scan.
pub(crate) fn first_fit(
    item: &Item,
    item_orientations: &[Orientation],
    bins: &Bins<'_>,
    scorer: &dyn FeasibilityScorer,
    config: &AllocatorConfig,
    budget: &SearchBudget<'_>,
) -> FirstFit {
    let candidates = candidate_order(item, &bins.containers);
    if candidates.is_empty() {
        return FirstFit::Unplaced(UnplacedReason::NoFitFound);
    }

    let accepted: Vec<usize> = candidates
        .into_iter()
        .filter(|&ci| {
            let container = bins.containers[ci];
            let accept = scorer.assess(item, container).is_accept();
            if !accept {
                log::debug!(
                    "Scorer '{}' rejected container '{}' for item '{}'",
                    scorer.name(),
                    container.id(),
                    item.id()
                );
            }
            accept
        })
        .collect();

    if accepted.is_empty() {
        return FirstFit::Unplaced(UnplacedReason::RejectedByScorer);
    }

    let search = |ci: usize| {
        scan(
            bins.containers[ci],
            &bins.occupancy[ci],
            item_orientations,
            config.grid_step,
            budget,
        )
    };

    if config.parallel_scan && accepted.len() > 1 {
        let outcomes: Vec<SearchOutcome> = accepted.par_iter().map(|&ci| search(ci)).collect();
        for (ci, outcome) in accepted.into_iter().zip(outcomes) {
            if let Some(fit) = resolve(ci, outcome) {
                return fit;
            }
        }
    } else {
        for ci in accepted {
            if let Some(fit) = resolve(ci, search(ci)) {
                return fit;
            }
        }
    }

    FirstFit::Unplaced(UnplacedReason::NoFitFound)
}

/// Assigns items to containers in priority order, first-fit.
///
/// Items are processed highest priority first (stable on ties). Each item tries the
/// containers of its preferred zone, then all others, in input order, and takes the
/// first free grid slot found. A committed item is never moved by a later item of the
/// greedy pass; the optional rearrangement pass runs afterwards and only ever moves
/// strictly lower-priority items.
pub struct PriorityAllocator {
    config: AllocatorConfig,
    scorer: Arc<dyn FeasibilityScorer>,
    cancelled: Arc<AtomicBool>,
}

impl PriorityAllocator {
    /// Creates an allocator with the given configuration and no scorer.
    pub fn new(config: AllocatorConfig) -> Self {
        Self {
            config,
            scorer: Arc::new(AcceptAll),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates an allocator with default configuration.
    pub fn default_config() -> Self {
        Self::new(AllocatorConfig::default())
    }

    /// Installs a feasibility scorer consulted before each container search.
    pub fn with_scorer(mut self, scorer: impl FeasibilityScorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Places one item, committing it to `bins` on success.
    fn place_item(
        &self,
        item: &Item,
        bins: &mut Bins<'_>,
        budget: &SearchBudget<'_>,
    ) -> Result<std::result::Result<Placement, UnplacedReason>> {
        match budget.check() {
            Some(Interrupt::Cancelled) => return Ok(Err(UnplacedReason::Cancelled)),
            Some(Interrupt::Deadline) => return Ok(Err(UnplacedReason::TimeBudgetExceeded)),
            None => {}
        }

        let item_orientations = match orientations(item, self.config.orientation) {
            Ok(found) => found,
            Err(Error::InvalidDimension { detail, .. }) => {
                log::warn!("Item '{}' has an invalid dimension: {}", item.id(), detail);
                return Ok(Err(UnplacedReason::InvalidDimension(detail)));
            }
            Err(err) => return Err(err),
        };

        match first_fit(
            item,
            &item_orientations,
            bins,
            self.scorer.as_ref(),
            &self.config,
            budget,
        ) {
            FirstFit::Placed {
                container,
                bounds,
                orientation_index,
            } => {
                bins.commit(
                    container,
                    OccupiedRegion::new(item.id().clone(), item.priority(), bounds),
                )?;
                let container_id = bins.containers[container].id();
                log::debug!(
                    "Placed '{}' in '{}' at {:?}..{:?}",
                    item.id(),
                    container_id,
                    bounds.start,
                    bounds.end
                );
                Ok(Ok(Placement::new(item.id().clone(), container_id.clone(), bounds)
                    .with_orientation_index(orientation_index)))
            }
            FirstFit::Unplaced(reason) => Ok(Err(reason)),
        }
    }
}

impl Allocator for PriorityAllocator {
    fn allocate(&self, items: &[Item], containers: &[Container]) -> Result<AllocationResult> {
        self.allocate_onto(items, containers, &[])
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl PriorityAllocator {
    /// Allocates `items` into containers that already hold the `stowed` placements.
    ///
    /// Every stowed placement must name an item of `items` and a usable container, and
    /// must fit without overlapping the others. Stowed items are committed first, in the
    /// given order, and reported unchanged among the placements unless the rearrangement
    /// pass moves them. The remaining items are allocated as by [`Allocator::allocate`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] for a stowed placement that cannot be committed,
    /// in addition to the errors of [`Allocator::allocate`].
    pub fn allocate_onto(
        &self,
        items: &[Item],
        containers: &[Container],
        stowed: &[Placement],
    ) -> Result<AllocationResult> {
        let start = Instant::now();
        self.config.validate()?;
        check_unique_ids(items, containers)?;

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);

        let mut result = AllocationResult::new();
        let mut usable = Vec::with_capacity(containers.len());
        for container in containers {
            match container.validate() {
                Ok(()) => usable.push(container),
                Err(err) => {
                    log::warn!("Skipping container '{}': {}", container.id(), err);
                    result.skipped_containers.push(SkippedContainer {
                        container_id: container.id().clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let mut bins = Bins::new(usable);
        let stowed_ids = commit_stowed(items, &mut bins, stowed)?;
        result.placements.extend(stowed.iter().cloned());

        let budget = SearchBudget::unlimited()
            .with_time_limit(start, self.config.time_limit_ms)
            .with_cancel_flag(&self.cancelled);

        for idx in priority_order(items) {
            let item = &items[idx];
            if stowed_ids.contains(item.id().as_str()) {
                continue;
            }
            match self.place_item(item, &mut bins, &budget)? {
                Ok(placement) => result.placements.push(placement),
                Err(reason) => {
                    log::debug!("Item '{}' not placed: {}", item.id(), reason);
                    result
                        .unplaced
                        .push(UnplacedItem::new(item.id().clone(), reason));
                }
            }
        }

        if self.config.rearrangement_enabled() && !result.unplaced.is_empty() {
            rearrange::run(
                items,
                &mut bins,
                &mut result,
                self.scorer.as_ref(),
                &self.config,
                &budget,
            )?;
        }

        let placed_volume: f64 = result.placements.iter().map(|p| p.bounds.volume()).sum();
        result.utilization = volume_utilization(placed_volume, &bins.containers);
        result.cancelled = self.cancelled.load(Ordering::Relaxed);
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        let summary = AllocationSummary::from(&result);
        let stats = result.placement_stats();
        log::info!(
            "Allocated {}/{} items across {} containers, {} skipped ({:.1}% utilization, {} rotated, {} moved) in {}ms",
            summary.total_placed,
            summary.total_requested,
            bins.containers.len(),
            summary.containers_skipped,
            summary.utilization_percent,
            stats.rotated_count,
            summary.total_moved,
            summary.time_ms
        );

        Ok(result)
    }
}

/// Commits already stowed placements and returns their item ids.
fn commit_stowed<'a>(
    items: &'a [Item],
    bins: &mut Bins<'_>,
    stowed: &[Placement],
) -> Result<HashSet<&'a str>> {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id().as_str(), i)).collect();
    let mut ids = HashSet::with_capacity(stowed.len());

    for placement in stowed {
        let Some((&id, item)) = by_id.get_key_value(placement.item_id.as_str()) else {
            return Err(Error::InvalidArgument(format!(
                "stowed item '{}' is not in the inventory",
                placement.item_id
            )));
        };
        if !ids.insert(id) {
            return Err(Error::InvalidArgument(format!(
                "item '{}' is stowed twice",
                placement.item_id
            )));
        }
        let Some(ci) = bins
            .containers
            .iter()
            .position(|c| *c.id() == placement.container_id)
        else {
            return Err(Error::InvalidArgument(format!(
                "stowed item '{}' names unknown or unusable container '{}'",
                placement.item_id, placement.container_id
            )));
        };
        if let Err(err) = item.validate() {
            return Err(Error::InvalidArgument(format!("stowed {}", err)));
        }
        if !is_rotation_of(&placement.bounds, item) {
            return Err(Error::InvalidArgument(format!(
                "stowed box of item '{}' is not a rotation of its dimensions",
                placement.item_id
            )));
        }
        if !placement.bounds.is_proper()
            || !bins.occupancy[ci].can_place(&placement.bounds, bins.containers[ci])
        {
            return Err(Error::InvalidArgument(format!(
                "stowed item '{}' does not fit free space of container '{}'",
                placement.item_id, placement.container_id
            )));
        }
        bins.commit(
            ci,
            OccupiedRegion::new(id, item.priority(), placement.bounds),
        )?;
    }

    Ok(ids)
}

/// Checks that the sides of `bounds` are an axis permutation of the item's dimensions.
fn is_rotation_of(bounds: &Box3D, item: &Item) -> bool {
    let mut sides: Vec<f64> = bounds.size().iter().copied().collect();
    let mut dims: Vec<f64> = item.dimensions().iter().copied().collect();
    sides.sort_by(f64::total_cmp);
    dims.sort_by(f64::total_cmp);
    sides
        .iter()
        .zip(&dims)
        .all(|(s, d)| (s - d).abs() <= 1e-9 * d.max(1.0))
}
