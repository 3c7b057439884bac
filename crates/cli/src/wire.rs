//! JSON output records.
//!
//! Field names are camelCase and coordinates are keyed `width`/`depth`/`height`, matching
//! the inventory input format.

use crate::search::SearchHit;
use serde::{Deserialize, Serialize};
use stowage::core::{
    format_date, AllocationResult, Box3D, Item, Placement, Rearrangement, UnplacedItem,
};
use stowage::lifecycle::{ItemRef, ItemUsage, SimulationReport, WasteReport};

/// A point in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl From<[f64; 3]> for Coordinates {
    fn from(p: [f64; 3]) -> Self {
        Self {
            width: p[0],
            depth: p[1],
            height: p[2],
        }
    }
}

impl From<Coordinates> for [f64; 3] {
    fn from(c: Coordinates) -> Self {
        [c.width, c.depth, c.height]
    }
}

/// A box given by its two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub start_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
}

impl From<Box3D> for Position {
    fn from(b: Box3D) -> Self {
        Self {
            start_coordinates: b.start.into(),
            end_coordinates: b.end.into(),
        }
    }
}

impl From<Position> for Box3D {
    fn from(p: Position) -> Self {
        Box3D::new(p.start_coordinates.into(), p.end_coordinates.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    pub item_id: String,
    pub container_id: String,
    pub position: Position,
}

impl From<&Placement> for PlacementRecord {
    fn from(p: &Placement) -> Self {
        Self {
            item_id: p.item_id.clone(),
            container_id: p.container_id.clone(),
            position: p.bounds.into(),
        }
    }
}

impl From<PlacementRecord> for Placement {
    fn from(r: PlacementRecord) -> Self {
        Placement::new(r.item_id, r.container_id, r.position.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RearrangementRecord {
    pub item_id: String,
    pub from_container: String,
    pub from_position: Position,
    pub to_container: String,
    pub to_position: Position,
    pub displaced_by: String,
}

impl From<&Rearrangement> for RearrangementRecord {
    fn from(r: &Rearrangement) -> Self {
        Self {
            item_id: r.item_id.clone(),
            from_container: r.from_container.clone(),
            from_position: r.from_bounds.into(),
            to_container: r.to_container.clone(),
            to_position: r.to_bounds.into(),
            displaced_by: r.displaced_by.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedRecord {
    pub item_id: String,
    pub reason: String,
}

impl From<&UnplacedItem> for UnplacedRecord {
    fn from(u: &UnplacedItem) -> Self {
        Self {
            item_id: u.item_id.clone(),
            reason: u.reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedContainerRecord {
    pub container_id: String,
    pub reason: String,
}

/// Output of `place`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementOutput {
    #[serde(default = "success")]
    pub success: bool,
    pub placements: Vec<PlacementRecord>,
    #[serde(default)]
    pub rearrangements: Vec<RearrangementRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<UnplacedRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_containers: Vec<SkippedContainerRecord>,
}

fn success() -> bool {
    true
}

impl From<&AllocationResult> for PlacementOutput {
    fn from(result: &AllocationResult) -> Self {
        Self {
            success: true,
            placements: result.placements.iter().map(Into::into).collect(),
            rearrangements: result.rearrangements.iter().map(Into::into).collect(),
            unplaced: result.unplaced.iter().map(Into::into).collect(),
            skipped_containers: result
                .skipped_containers
                .iter()
                .map(|s| SkippedContainerRecord {
                    container_id: s.container_id.clone(),
                    reason: s.reason.clone(),
                })
                .collect(),
        }
    }
}

/// Output of `waste`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteOutput {
    pub waste_items: Vec<Item>,
    pub note: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<&WasteReport> for WasteOutput {
    fn from(report: &WasteReport) -> Self {
        Self {
            waste_items: report.waste_items.clone(),
            note: report.note(),
            errors: report.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedRecord {
    pub item_id: String,
    pub name: String,
    pub remaining_uses: i64,
}

impl From<&ItemUsage> for UsedRecord {
    fn from(u: &ItemUsage) -> Self {
        Self {
            item_id: u.item_id.clone(),
            name: u.name.clone(),
            remaining_uses: u.remaining_uses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRefRecord {
    pub item_id: String,
    pub name: String,
}

impl From<&ItemRef> for ItemRefRecord {
    fn from(r: &ItemRef) -> Self {
        Self {
            item_id: r.item_id.clone(),
            name: r.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    pub items_used: Vec<UsedRecord>,
    pub items_expired: Vec<ItemRefRecord>,
    pub items_depleted_today: Vec<ItemRefRecord>,
}

/// Output of `simulate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    pub success: bool,
    pub new_date: String,
    pub changes: Changes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_items: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<&SimulationReport> for SimulationOutput {
    fn from(report: &SimulationReport) -> Self {
        Self {
            success: true,
            new_date: format_date(report.new_date),
            changes: Changes {
                items_used: report.items_used.iter().map(Into::into).collect(),
                items_expired: report.items_expired.iter().map(Into::into).collect(),
                items_depleted_today: report.items_depleted.iter().map(Into::into).collect(),
            },
            unknown_items: report.unknown_items.clone(),
            errors: report.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    pub item_id: String,
    pub name: String,
    pub container_id: String,
    pub zone: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalStepRecord {
    pub step: usize,
    pub action: &'static str,
    pub item_id: String,
    pub item_name: String,
}

/// Output of `search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<FoundItem>,
    pub retrieval_steps: Vec<RetrievalStepRecord>,
}

impl From<Option<&SearchHit>> for SearchOutput {
    fn from(hit: Option<&SearchHit>) -> Self {
        let Some(hit) = hit else {
            return Self {
                success: true,
                found: false,
                item: None,
                retrieval_steps: Vec::new(),
            };
        };
        Self {
            success: true,
            found: true,
            item: Some(FoundItem {
                item_id: hit.item_id.clone(),
                name: hit.name.clone(),
                container_id: hit.container_id.clone(),
                zone: hit.zone.clone(),
                position: hit.bounds.into(),
            }),
            retrieval_steps: hit
                .retrieval_steps
                .iter()
                .map(|s| RetrievalStepRecord {
                    step: s.step,
                    action: s.action.as_str(),
                    item_id: s.item_id.clone(),
                    item_name: s.item_name.clone(),
                })
                .collect(),
        }
    }
}
