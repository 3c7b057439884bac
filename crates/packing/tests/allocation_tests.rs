//! Integration tests for stowage-packing.

use proptest::prelude::*;
use std::collections::HashSet;
use stowage_packing::{
    find_free_position, overlaps, Allocator, AllocatorConfig, Box3D, Container, Item,
    OccupancySet, OrientationPolicy, PriorityAllocator,
};

fn sorted_sides(v: [f64; 3]) -> [f64; 3] {
    let mut sides = v;
    sides.sort_by(f64::total_cmp);
    sides
}

mod scenario_tests {
    use super::*;
    use stowage_core::UnplacedReason;

    #[test]
    fn test_first_item_lands_at_origin() {
        let items = vec![Item::new("I1", 10.0, 10.0, 10.0)
            .with_priority(90)
            .with_zone("A")];
        let containers = vec![Container::new("C1", "A", 20.0, 20.0, 20.0)];

        let result = PriorityAllocator::default_config()
            .allocate(&items, &containers)
            .unwrap();

        assert!(result.all_placed());
        assert_eq!(result.placements[0].start(), [0.0, 0.0, 0.0]);
        assert_eq!(result.placements[0].end(), [10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_fully_occupied_container() {
        let container = Container::new("C1", "A", 10.0, 10.0, 10.0);
        let occupied = OccupancySet::from_boxes([Box3D::new([0.0; 3], [10.0; 3])]);
        let item = Item::new("I2", 5.0, 5.0, 5.0);

        let found =
            find_free_position(&container, &occupied, &item, &AllocatorConfig::default()).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_container_fills_in_scan_order() {
        // Eight 5-cubes fill a 10-cube; z varies fastest, then y, then x.
        let items: Vec<Item> = (0..9)
            .map(|i| Item::new(format!("I{i}"), 5.0, 5.0, 5.0))
            .collect();
        let containers = vec![Container::new("C1", "A", 10.0, 10.0, 10.0)];

        let result = PriorityAllocator::default_config()
            .allocate(&items, &containers)
            .unwrap();

        let starts: Vec<[f64; 3]> = result.placements.iter().map(|p| p.start()).collect();
        assert_eq!(
            starts,
            vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 5.0],
                [0.0, 5.0, 0.0],
                [0.0, 5.0, 5.0],
                [5.0, 0.0, 0.0],
                [5.0, 0.0, 5.0],
                [5.0, 5.0, 0.0],
                [5.0, 5.0, 5.0],
            ]
        );
        assert_eq!(result.unplaced_reason("I8"), Some(&UnplacedReason::NoFitFound));
        assert!((result.utilization - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_higher_priority_claims_slot_first() {
        let items = vec![
            Item::new("B", 10.0, 10.0, 10.0).with_priority(10).with_zone("A"),
            Item::new("A", 10.0, 10.0, 10.0).with_priority(20).with_zone("A"),
        ];
        let containers = vec![Container::new("C1", "A", 10.0, 10.0, 10.0)];

        let result = PriorityAllocator::default_config()
            .allocate(&items, &containers)
            .unwrap();

        assert_eq!(result.placement_of("A").map(|p| p.start()), Some([0.0; 3]));
        assert!(result.placement_of("B").is_none());
    }

    #[test]
    fn test_upright_policy_keeps_height() {
        let items = vec![Item::new("tall", 5.0, 5.0, 20.0)];
        let containers = vec![Container::new("C1", "A", 20.0, 20.0, 10.0)];

        let any = PriorityAllocator::default_config()
            .allocate(&items, &containers)
            .unwrap();
        assert!(any.all_placed());

        let upright = PriorityAllocator::new(
            AllocatorConfig::new().with_orientation(OrientationPolicy::Upright),
        )
        .allocate(&items, &containers)
        .unwrap();
        assert!(!upright.all_placed());
    }

    #[test]
    fn test_cancel_before_run_is_reset() {
        let allocator = PriorityAllocator::default_config();
        allocator.cancel();

        let items = vec![Item::new("I1", 1.0, 1.0, 1.0)];
        let containers = vec![Container::new("C1", "A", 5.0, 5.0, 5.0)];
        let result = allocator.allocate(&items, &containers).unwrap();

        assert!(result.completed_normally());
        assert!(result.all_placed());
    }
}

fn arb_item(index: usize) -> impl Strategy<Value = Item> {
    (1u8..=15, 1u8..=15, 1u8..=15, 0i32..5, prop::bool::ANY).prop_map(
        move |(w, d, h, priority, zone_a)| {
            Item::new(format!("I{index}"), w as f64, d as f64, h as f64)
                .with_priority(priority)
                .with_zone(if zone_a { "A" } else { "B" })
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    (1usize..14).prop_flat_map(|n| (0..n).map(arb_item).collect::<Vec<_>>())
}

fn arb_containers() -> impl Strategy<Value = Vec<Container>> {
    prop::collection::vec((10u8..=30, 10u8..=30, 10u8..=30, prop::bool::ANY), 1..4).prop_map(
        |dims| {
            dims.into_iter()
                .enumerate()
                .map(|(i, (w, d, h, zone_a))| {
                    Container::new(
                        format!("C{i}"),
                        if zone_a { "A" } else { "B" },
                        w as f64,
                        d as f64,
                        h as f64,
                    )
                })
                .collect()
        },
    )
}

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn placements_are_contained_and_disjoint(
            items in arb_items(),
            containers in arb_containers(),
        ) {
            let result = PriorityAllocator::default_config()
                .allocate(&items, &containers)
                .unwrap();

            for (i, a) in result.placements.iter().enumerate() {
                let container = containers
                    .iter()
                    .find(|c| *c.id() == a.container_id)
                    .unwrap();
                prop_assert!(a.bounds.is_within_extent(&container.dimensions()));

                for b in &result.placements[i + 1..] {
                    if a.container_id == b.container_id {
                        prop_assert!(!overlaps(&a.bounds, &b.bounds));
                    }
                }
            }
        }

        #[test]
        fn every_item_accounted_for_once(
            items in arb_items(),
            containers in arb_containers(),
        ) {
            let result = PriorityAllocator::default_config()
                .allocate(&items, &containers)
                .unwrap();

            let mut seen = HashSet::new();
            for id in result
                .placements
                .iter()
                .map(|p| &p.item_id)
                .chain(result.unplaced.iter().map(|u| &u.item_id))
            {
                prop_assert!(seen.insert(id.clone()));
            }
            prop_assert_eq!(seen.len(), items.len());
        }

        #[test]
        fn boxes_are_rotations_of_items(
            items in arb_items(),
            containers in arb_containers(),
        ) {
            let result = PriorityAllocator::default_config()
                .allocate(&items, &containers)
                .unwrap();

            for placement in &result.placements {
                let item = items.iter().find(|i| *i.id() == placement.item_id).unwrap();
                let dims = item.dimensions();
                let size = placement.bounds.size();
                prop_assert_eq!(
                    sorted_sides([size.x, size.y, size.z]),
                    sorted_sides([dims.x, dims.y, dims.z])
                );
            }
        }

        #[test]
        fn allocation_is_deterministic(
            items in arb_items(),
            containers in arb_containers(),
            parallel in prop::bool::ANY,
        ) {
            let first = PriorityAllocator::default_config()
                .allocate(&items, &containers)
                .unwrap();
            let second = PriorityAllocator::new(AllocatorConfig::new().with_parallel_scan(parallel))
                .allocate(&items, &containers)
                .unwrap();

            prop_assert_eq!(first.placements, second.placements);
            prop_assert_eq!(first.unplaced, second.unplaced);
        }

        #[test]
        fn lower_priority_items_never_move_higher_ones(
            items in arb_items(),
            containers in arb_containers(),
            threshold in 0i32..5,
        ) {
            let all = PriorityAllocator::default_config()
                .allocate(&items, &containers)
                .unwrap();
            let senior: Vec<Item> = items
                .iter()
                .filter(|i| i.priority() >= threshold)
                .cloned()
                .collect();
            let alone = PriorityAllocator::default_config()
                .allocate(&senior, &containers)
                .unwrap();

            for placement in &alone.placements {
                prop_assert_eq!(all.placement_of(&placement.item_id), Some(placement));
            }
        }
    }
}
