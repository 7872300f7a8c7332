// Catalog query properties
//
// Run with: cargo test --test catalog_properties

use plant_catalog::utils::locale_compare;
use plant_catalog::{query, CatalogQuery, Pager, PlantRecord, SortKey, TypeFilter, PAGE_SIZE};
use proptest::prelude::*;
use std::cmp::Ordering;

const TYPES: [&str; 4] = ["Tree", "Herb", "Shrub", "Succulent"];

fn plant(id: u32, common: &str, scientific: &str, family: &str, plant_type: &str, region: &str) -> PlantRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "common_name": common,
        "scientific_name": scientific,
        "family": family,
        "type": plant_type,
        "native_region": region,
        "description": {
            "height": "1 m",
            "leaf_color": "Green",
            "description": "A plant.",
            "growth_rate": "Moderate"
        },
        "care": { "water": "Moderate", "sunlight": "Full sun", "soil_type": "Loamy" },
        "propagation": { "method": "Seeds", "season": "Spring", "germination_time": "1 week" },
        "safety": {}
    }))
    .expect("valid plant record")
}

/// Small alphabets so that ties and substring hits are common.
fn plants_strategy() -> impl Strategy<Value = Vec<PlantRecord>> {
    prop::collection::vec(
        (
            "[A-Ca-c ]{1,6}",
            "[a-cé]{1,6}",
            prop::sample::select(vec!["Moraceae", "Fabaceae", "Lamiaceae"]),
            prop::sample::select(TYPES.to_vec()),
            prop::sample::select(vec!["India", "East Asia", "Europe"]),
        ),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (common, scientific, family, plant_type, region))| {
                plant(i as u32, &common, &scientific, family, plant_type, region)
            })
            .collect()
    })
}

fn sort_strategy() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn type_strategy() -> impl Strategy<Value = TypeFilter> {
    prop_oneof![
        Just(TypeFilter::All),
        prop::sample::select(TYPES.to_vec()).prop_map(|t| TypeFilter::parse(&t.to_uppercase())),
    ]
}

fn sort_field(plant: &PlantRecord, key: SortKey) -> &str {
    match key {
        SortKey::Name => &plant.common_name,
        SortKey::Scientific => &plant.scientific_name,
        SortKey::Type => &plant.plant_type,
        SortKey::Family => &plant.family,
    }
}

proptest! {
    /// Every result matches, and every matching plant is a result.
    #[test]
    fn filter_is_sound_and_complete(
        plants in plants_strategy(),
        text in "[a-cA-C]{0,2}",
        type_filter in type_strategy(),
        sort in sort_strategy(),
    ) {
        let params = CatalogQuery::new(text, type_filter, sort);
        let results = query(&plants, &params);

        prop_assert!(results.iter().all(|p| params.matches(p)));
        prop_assert_eq!(results.len(), plants.iter().filter(|p| params.matches(p)).count());
    }

    /// Results are ordered by the sort field and ties keep catalog order.
    #[test]
    fn sort_is_ordered_and_stable(plants in plants_strategy(), sort in sort_strategy()) {
        let results = query(&plants, &CatalogQuery::new("", TypeFilter::All, sort));

        for pair in results.windows(2) {
            let order = locale_compare(sort_field(pair[0], sort), sort_field(pair[1], sort));
            prop_assert_ne!(order, Ordering::Greater);
            if order == Ordering::Equal {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    /// Re-running a query over its own output changes nothing.
    #[test]
    fn query_is_idempotent(plants in plants_strategy(), text in "[a-c]{0,1}", sort in sort_strategy()) {
        let params = CatalogQuery::new(text, TypeFilter::All, sort);
        let first: Vec<PlantRecord> = query(&plants, &params).into_iter().cloned().collect();
        let second: Vec<u32> = query(&first, &params).iter().map(|p| p.id).collect();

        prop_assert_eq!(first.iter().map(|p| p.id).collect::<Vec<_>>(), second);
    }

    /// The visible prefix never exceeds the count, and more exist iff count < total.
    #[test]
    fn pager_window(total in 0usize..40, loads in 0usize..8) {
        let results: Vec<usize> = (0..total).collect();
        let mut pager = Pager::new();
        for _ in 0..loads {
            pager.load_more();
        }
        let page = pager.page(&results);

        prop_assert_eq!(page.visible_count, PAGE_SIZE * (loads + 1));
        prop_assert_eq!(page.items.len(), page.visible_count.min(total));
        prop_assert_eq!(page.has_more, page.visible_count < total);
        prop_assert_eq!(page.items, &results[..page.items.len()]);
    }
}
