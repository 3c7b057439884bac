//! Item lookup and retrieval planning over a placement arrangement.

use stowage::core::{Box3D, Inventory, Placement};

/// What to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'a> {
    pub item_id: Option<&'a str>,
    pub item_name: Option<&'a str>,
}

impl<'a> Query<'a> {
    pub fn by_id(item_id: &'a str) -> Self {
        Self {
            item_id: Some(item_id),
            item_name: None,
        }
    }

    pub fn by_name(item_name: &'a str) -> Self {
        Self {
            item_id: None,
            item_name: Some(item_name),
        }
    }

    /// Returns true if neither an ID nor a name was given.
    pub fn is_empty(&self) -> bool {
        self.item_id.is_none() && self.item_name.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalAction {
    Remove,
    Retrieve,
    PlaceBack,
}

impl RetrievalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Retrieve => "retrieve",
            Self::PlaceBack => "placeBack",
        }
    }
}

/// One step of getting an item out of its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalStep {
    /// 1-based step number.
    pub step: usize,
    pub action: RetrievalAction,
    pub item_id: String,
    pub item_name: String,
}

/// A located item.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub item_id: String,
    pub name: String,
    pub container_id: String,
    pub zone: String,
    pub bounds: Box3D,
    pub retrieval_steps: Vec<RetrievalStep>,
}

/// Finds the placement of the queried item.
///
/// An ID match wins over a name match. Names are matched exactly and the first placement
/// in arrangement order is returned.
pub fn locate(inventory: &Inventory, placements: &[Placement], query: Query<'_>) -> Option<SearchHit> {
    let by_id = query
        .item_id
        .and_then(|id| placements.iter().find(|p| p.item_id == id));
    let target = by_id.or_else(|| {
        let name = query.item_name?;
        placements.iter().find(|p| {
            inventory
                .item(&p.item_id)
                .is_some_and(|item| item.name() == name)
        })
    })?;

    let name_of = |id: &str| {
        inventory
            .item(id)
            .map_or_else(|| id.to_string(), |item| item.name().to_string())
    };
    let zone = inventory
        .container(&target.container_id)
        .map(|c| c.zone().to_string())
        .unwrap_or_default();

    let blockers = blockers(target, placements);
    let mut steps = Vec::with_capacity(blockers.len() * 2 + 1);
    let mut push = |action, id: &str| {
        steps.push(RetrievalStep {
            step: steps.len() + 1,
            action,
            item_id: id.to_string(),
            item_name: name_of(id),
        });
    };
    for blocker in &blockers {
        push(RetrievalAction::Remove, &blocker.item_id);
    }
    push(RetrievalAction::Retrieve, &target.item_id);
    for blocker in blockers.iter().rev() {
        push(RetrievalAction::PlaceBack, &blocker.item_id);
    }

    Some(SearchHit {
        item_id: target.item_id.clone(),
        name: name_of(&target.item_id),
        container_id: target.container_id.clone(),
        zone,
        bounds: target.bounds,
        retrieval_steps: steps,
    })
}

/// Items between `target` and the open face (depth 0) of its container, nearest the face
/// first.
///
/// A blocker lies wholly in front of the target and overlaps it in the width/height plane.
pub fn blockers<'a>(target: &Placement, placements: &'a [Placement]) -> Vec<&'a Placement> {
    let (ts, te) = (target.bounds.start, target.bounds.end);
    let mut found: Vec<&Placement> = placements
        .iter()
        .filter(|p| p.container_id == target.container_id && p.item_id != target.item_id)
        .filter(|p| {
            let (s, e) = (p.bounds.start, p.bounds.end);
            e[1] <= ts[1] && s[0] < te[0] && ts[0] < e[0] && s[2] < te[2] && ts[2] < e[2]
        })
        .collect();
    found.sort_by(|a, b| a.bounds.start[1].total_cmp(&b.bounds.start[1]));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage::core::{Container, Item};

    fn inventory() -> Inventory {
        Inventory::new(
            vec![
                Item::new("back", 10.0, 10.0, 10.0).with_name("Water Bag"),
                Item::new("front", 10.0, 5.0, 10.0).with_name("Snack Box"),
                Item::new("side", 10.0, 10.0, 10.0).with_name("Toolkit"),
                Item::new("middle", 10.0, 5.0, 10.0).with_name("Snack Box"),
            ],
            vec![Container::new("C1", "Storage Bay", 20.0, 30.0, 10.0)],
        )
    }

    fn placements() -> Vec<Placement> {
        vec![
            Placement::new("back", "C1", Box3D::new([0.0, 10.0, 0.0], [10.0, 20.0, 10.0])),
            Placement::new("middle", "C1", Box3D::new([0.0, 5.0, 0.0], [10.0, 10.0, 10.0])),
            Placement::new("front", "C1", Box3D::new([0.0, 0.0, 0.0], [10.0, 5.0, 10.0])),
            Placement::new("side", "C1", Box3D::new([10.0, 0.0, 0.0], [20.0, 10.0, 10.0])),
        ]
    }

    #[test]
    fn test_unblocked_item() {
        let hit = locate(&inventory(), &placements(), Query::by_id("side")).unwrap();
        assert_eq!(hit.zone, "Storage Bay");
        assert_eq!(hit.retrieval_steps.len(), 1);
        assert_eq!(hit.retrieval_steps[0].action, RetrievalAction::Retrieve);
        assert_eq!(hit.retrieval_steps[0].item_name, "Toolkit");
    }

    #[test]
    fn test_blocked_item_plan() {
        let hit = locate(&inventory(), &placements(), Query::by_id("back")).unwrap();
        let plan: Vec<(usize, &str, &str)> = hit
            .retrieval_steps
            .iter()
            .map(|s| (s.step, s.action.as_str(), s.item_id.as_str()))
            .collect();
        assert_eq!(
            plan,
            vec![
                (1, "remove", "front"),
                (2, "remove", "middle"),
                (3, "retrieve", "back"),
                (4, "placeBack", "middle"),
                (5, "placeBack", "front"),
            ]
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let placements = placements();
        let hit = locate(&inventory(), &placements, Query::by_name("Snack Box")).unwrap();
        // "middle" comes first in arrangement order.
        assert_eq!(hit.item_id, "middle");

        let query = Query {
            item_id: Some("side"),
            item_name: Some("Snack Box"),
        };
        assert_eq!(locate(&inventory(), &placements, query).unwrap().item_id, "side");
    }

    #[test]
    fn test_not_found() {
        assert!(locate(&inventory(), &placements(), Query::by_id("ghost")).is_none());
        assert!(locate(&inventory(), &placements(), Query::by_name("Nothing")).is_none());
        assert!(Query {
            item_id: None,
            item_name: None
        }
        .is_empty());
    }
}
