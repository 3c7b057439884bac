//! Spatial fit oracle: containment, overlap and optional feasibility scoring.
//!
//! [`fits`] and [`overlaps`] are the authoritative geometric checks. A
//! [`FeasibilityScorer`] may be consulted before any search to skip containers that
//! are hopeless for an item; it can only ever remove candidates, never admit a box
//! the geometry rejects.

use stowage_core::{Box3D, Container, Item};

/// Returns true if `bounds` lies within `container`: `start >= 0` and
/// `end <= (width, depth, height)` componentwise.
pub fn fits(bounds: &Box3D, container: &Container) -> bool {
    bounds.is_within_extent(&container.dimensions())
}

/// Returns true if the two boxes intersect on all three axes.
///
/// Boxes that are disjoint on at least one axis, including boxes that merely touch,
/// do not overlap.
pub fn overlaps(a: &Box3D, b: &Box3D) -> bool {
    a.intersects(b)
}

/// Verdict of a feasibility scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Try the geometric search in this container.
    Accept,
    /// Skip this container for this item.
    Reject,
}

impl Feasibility {
    /// Returns true for [`Feasibility::Accept`].
    pub fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl From<bool> for Feasibility {
    fn from(accept: bool) -> Self {
        if accept {
            Self::Accept
        } else {
            Self::Reject
        }
    }
}

/// Pluggable pre-search filter for (item, container) pairs.
pub trait FeasibilityScorer: Send + Sync {
    /// Decides whether the search should be attempted.
    fn assess(&self, item: &Item, container: &Container) -> Feasibility;

    /// Name used in log output.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> FeasibilityScorer for F
where
    F: Fn(&Item, &Container) -> Feasibility + Send + Sync,
{
    fn assess(&self, item: &Item, container: &Container) -> Feasibility {
        self(item, container)
    }
}

/// Accepts every pair, deferring entirely to geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FeasibilityScorer for AcceptAll {
    fn assess(&self, _item: &Item, _container: &Container) -> Feasibility {
        Feasibility::Accept
    }

    fn name(&self) -> &str {
        "accept-all"
    }
}

/// Rejects a container when the item cannot fit in it under any rotation, even empty.
///
/// Compares the item's sorted sides against the container's sorted sides, which is
/// exact for axis-aligned boxes with free rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionScorer;

impl FeasibilityScorer for DimensionScorer {
    fn assess(&self, item: &Item, container: &Container) -> Feasibility {
        let (item_dims, container_dims) = (item.dimensions(), container.dimensions());
        let mut item_sides = [item_dims.x, item_dims.y, item_dims.z];
        let mut container_sides = [container_dims.x, container_dims.y, container_dims.z];
        item_sides.sort_by(f64::total_cmp);
        container_sides.sort_by(f64::total_cmp);

        item_sides
            .iter()
            .zip(container_sides.iter())
            .all(|(i, c)| i <= c)
            .into()
    }

    fn name(&self) -> &str {
        "dimension"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        let container = Container::new("C1", "A", 20.0, 20.0, 20.0);
        assert!(fits(&Box3D::new([0.0; 3], [10.0; 3]), &container));
        assert!(fits(&Box3D::new([10.0; 3], [20.0; 3]), &container));
        assert!(!fits(&Box3D::new([15.0, 0.0, 0.0], [25.0, 10.0, 10.0]), &container));
        assert!(!fits(&Box3D::new([-5.0, 0.0, 0.0], [5.0, 10.0, 10.0]), &container));
    }

    #[test]
    fn test_overlaps_separating_axis() {
        let a = Box3D::new([0.0; 3], [10.0; 3]);
        // Disjoint on z only.
        let b = Box3D::new([0.0, 0.0, 10.0], [10.0, 10.0, 20.0]);
        // Inside a.
        let c = Box3D::new([2.0; 3], [3.0; 3]);
        assert!(!overlaps(&a, &b));
        assert!(overlaps(&a, &c));
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_accept_all() {
        let item = Item::new("I1", 100.0, 100.0, 100.0);
        let container = Container::new("C1", "A", 1.0, 1.0, 1.0);
        assert_eq!(AcceptAll.assess(&item, &container), Feasibility::Accept);
    }

    #[test]
    fn test_dimension_scorer_allows_rotation() {
        let container = Container::new("C1", "A", 10.0, 50.0, 20.0);
        let tall = Item::new("I1", 45.0, 5.0, 5.0);
        let wide = Item::new("I2", 60.0, 5.0, 5.0);
        assert!(DimensionScorer.assess(&tall, &container).is_accept());
        assert!(!DimensionScorer.assess(&wide, &container).is_accept());
    }

    #[test]
    fn test_closure_scorer() {
        let zone_only = |item: &Item, container: &Container| {
            Feasibility::from(item.preferred_zone() == container.zone())
        };
        let item = Item::new("I1", 1.0, 1.0, 1.0).with_zone("A");
        assert!(zone_only.assess(&item, &Container::new("C1", "A", 5.0, 5.0, 5.0)).is_accept());
        assert!(!zone_only.assess(&item, &Container::new("C2", "B", 5.0, 5.0, 5.0)).is_accept());
        assert_eq!(zone_only.name(), "custom");
    }
}
