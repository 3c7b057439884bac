//! End-to-end tests over the library surface of the CLI.

use std::collections::HashMap;
use stowage::core::Allocator;
use stowage::lifecycle::{classify_waste, TimeSimulator};
use stowage::packing::PriorityAllocator;
use stowage_cli::{
    arrangement_csv, locate, InventoryParser, PlacementOutput, Query, SearchOutput,
    SimulationOutput, WasteOutput,
};

const INPUT: &str = r#"{
    "items": [
        {"itemId": "001", "name": "Food Packet", "width": 10, "depth": 10, "height": 20,
         "priority": 80, "expiryDate": "2025-05-20", "usageLimit": 30, "preferredZone": "Crew Quarters"},
        {"itemId": "002", "name": "Oxygen Cylinder", "width": 15, "depth": 15, "height": 50,
         "priority": 95, "expiryDate": "N/A", "usageLimit": 100, "preferredZone": "Airlock"},
        {"itemId": "003", "name": "First Aid Kit", "width": 20, "depth": 20, "height": 10,
         "priority": 100, "expiryDate": "2025-03-01", "usageLimit": 5, "preferredZone": "Medical Bay"}
    ],
    "containers": [
        {"containerId": "contA", "zone": "Crew Quarters", "width": 100, "depth": 85, "height": 200},
        {"containerId": "contB", "zone": "Airlock", "width": 50, "depth": 85, "height": 200}
    ]
}"#;

#[test]
fn test_place_export_search_round() {
    let parser = InventoryParser::new();
    let inventory = parser.parse_json(INPUT).unwrap();

    let result = PriorityAllocator::default_config()
        .allocate(&inventory.items, &inventory.containers)
        .unwrap();
    assert!(result.all_placed());

    // First aid kit has no Medical Bay container and falls back to contA.
    assert_eq!(result.placements[0].item_id, "003");
    assert_eq!(result.placements[0].container_id, "contA");
    assert_eq!(result.placement_of("002").unwrap().container_id, "contB");

    let json = serde_json::to_string(&PlacementOutput::from(&result)).unwrap();
    let placements = parser.parse_placements(&json).unwrap();
    assert_eq!(placements, result.placements);

    let csv = arrangement_csv(&placements);
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("003,contA,\"(0,0,0)\",\"(20,20,10)\""));

    let hit = locate(&inventory, &placements, Query::by_name("Oxygen Cylinder"));
    let output = serde_json::to_value(SearchOutput::from(hit.as_ref())).unwrap();
    assert_eq!(output["found"], true);
    assert_eq!(output["item"]["zone"], "Airlock");
    assert_eq!(output["retrievalSteps"][0]["action"], "retrieve");
}

#[test]
fn test_stowed_placements_are_kept() {
    let parser = InventoryParser::new();
    let inventory = parser.parse_json(INPUT).unwrap();
    let allocator = PriorityAllocator::default_config();

    let first = allocator
        .allocate(&inventory.items, &inventory.containers)
        .unwrap();
    let kept: Vec<_> = first
        .placements
        .iter()
        .filter(|p| p.item_id == "001")
        .cloned()
        .collect();

    let second = allocator
        .allocate_onto(&inventory.items, &inventory.containers, &kept)
        .unwrap();
    assert_eq!(second.placement_of("001"), kept.first());
    assert!(second.all_placed());
}

#[test]
fn test_waste_and_simulation_outputs() {
    let mut inventory = InventoryParser::new().parse_json(INPUT).unwrap();
    let cutoff = stowage::core::parse_date("2025-04-16").unwrap();

    let waste = serde_json::to_value(WasteOutput::from(&classify_waste(&inventory.items, cutoff)))
        .unwrap();
    assert_eq!(waste["wasteItems"][0]["itemId"], "003");
    assert_eq!(waste["wasteItems"][0]["expiryDate"], "2025-03-01");
    assert!(waste.get("errors").is_none());

    let usage = HashMap::from([("003".to_string(), 5)]);
    let report = TimeSimulator::default()
        .advance(&mut inventory.items, 2, &usage)
        .unwrap();
    let sim = serde_json::to_value(SimulationOutput::from(&report)).unwrap();
    assert_eq!(sim["newDate"], "2025-04-18");
    assert_eq!(sim["changes"]["itemsUsed"][0]["remainingUses"], 0);
    assert_eq!(sim["changes"]["itemsDepletedToday"][0]["name"], "First Aid Kit");
    assert_eq!(sim["changes"]["itemsExpired"][0]["itemId"], "003");
}
