//! Integration tests for stowage-lifecycle.

use std::collections::HashMap;
use stowage_core::{parse_date, Item, NaiveDate};
use stowage_lifecycle::{classify_waste, SimulationConfig, TimeSimulator, UsageMode};

fn date(value: &str) -> NaiveDate {
    parse_date(value).unwrap()
}

fn inventory() -> Vec<Item> {
    vec![
        Item::new("food", 10.0, 10.0, 20.0)
            .with_name("Food Packet")
            .with_expiry("2025-04-18")
            .with_usage_limit(30),
        Item::new("kit", 15.0, 15.0, 50.0)
            .with_name("Medical Kit")
            .with_expiry("N/A")
            .with_usage_limit(3),
        Item::new("filter", 5.0, 5.0, 5.0)
            .with_name("Air Filter")
            .with_expiry("2025-03-01")
            .with_usage_limit(1),
    ]
}

mod waste_tests {
    use super::*;

    #[test]
    fn test_waste_at_cutoff() {
        let report = classify_waste(&inventory(), date("2025-04-17"));
        let ids: Vec<&str> = report.waste_items.iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["filter"]);
    }

    #[test]
    fn test_unbounded_never_waste() {
        let report = classify_waste(&inventory(), date("9999-12-31"));
        assert!(!report.contains("kit"));
        assert_eq!(report.waste_items.len(), 2);
    }
}

mod simulation_tests {
    use super::*;

    #[test]
    fn test_week_of_use() {
        let mut items = inventory();
        let mut sim = TimeSimulator::default();
        let usage = HashMap::from([("kit".to_string(), 1), ("food".to_string(), 2)]);

        let mut depleted_on = None;
        for _ in 0..7 {
            let report = sim.advance(&mut items, 1, &usage).unwrap();
            if depleted_on.is_none() && report.items_depleted.iter().any(|r| r.item_id == "kit") {
                depleted_on = Some(report.new_date);
            }
        }

        assert_eq!(sim.current_date(), date("2025-04-23"));
        assert_eq!(depleted_on, Some(date("2025-04-19")));
        assert_eq!(items[0].usage_limit(), 16);
        assert!(items[1].usage_limit() < 0);
    }

    #[test]
    fn test_expiry_tracks_calendar() {
        let mut items = inventory();
        let mut sim = TimeSimulator::new(SimulationConfig::new().with_usage_mode(UsageMode::PerDay));

        let report = sim.advance(&mut items, 1, &HashMap::new()).unwrap();
        let expired: Vec<&str> = report.items_expired.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(expired, vec!["filter"]);

        let report = sim.advance(&mut items, 2, &HashMap::new()).unwrap();
        let expired: Vec<&str> = report.items_expired.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(expired, vec!["food", "filter"]);
    }
}
