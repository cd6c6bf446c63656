use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use dynamic_pricing::{
    assemble, CompetitorRecord, DemandRecord, InMemoryObservationStore, SalesRecord,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn sale(item_id: i64, day: u32, price: f64) -> SalesRecord {
    SalesRecord {
        item_id,
        date: date(day),
        units_sold: 10,
        price,
    }
}

fn demand(item_id: i64, day: u32, views: u32, add_to_cart: u32) -> DemandRecord {
    DemandRecord {
        item_id,
        date: date(day),
        views,
        add_to_cart,
    }
}

fn competitor(item_id: i64, day: u32, competitor_price: f64) -> CompetitorRecord {
    CompetitorRecord {
        item_id,
        date: date(day),
        competitor_price,
    }
}

/// Store with one item observed over `days` at the given prices, demand on
/// every day.
fn single_item_store(prices: &[f64]) -> InMemoryObservationStore {
    let mut store = InMemoryObservationStore::new();
    for (i, &price) in prices.iter().enumerate() {
        let day = i as u32 + 1;
        store.record_sale(sale(1, day, price));
        store.record_demand(demand(1, day, 500, 60));
    }
    store
}

#[test]
fn competitor_gap_filled_with_item_mean() {
    let mut store = single_item_store(&[100.0, 101.0, 102.0]);
    store.record_competitor(competitor(1, 1, 100.0));
    store.record_competitor(competitor(1, 3, 110.0));

    let dataset = assemble(&store, None).unwrap();
    let comp: Vec<f64> = dataset.rows().iter().map(|r| r.features[5]).collect();
    assert_eq!(comp, vec![100.0, 105.0, 110.0]);
}

#[test]
fn missing_competitor_history_falls_back_to_own_price() {
    let store = single_item_store(&[100.0, 101.0, 102.0]);

    let dataset = assemble(&store, None).unwrap();
    for row in dataset.rows() {
        assert_eq!(row.features[5], row.features[0]);
    }
}

#[test]
fn shifts_never_cross_item_boundaries() {
    let mut store = InMemoryObservationStore::new();
    // Interleave two items' records in insertion order.
    for day in 1..=3 {
        store.record_sale(sale(1, day, 10.0 + day as f64));
        store.record_sale(sale(2, day, 20.0 + day as f64));
        store.record_demand(demand(1, day, 100, 10));
        store.record_demand(demand(2, day, 100, 10));
    }

    let dataset = assemble(&store, None).unwrap();
    let first_of = |id: i64| dataset.rows().iter().find(|r| r.item_id == id).unwrap();
    let last_of = |id: i64| dataset.latest_row(id).unwrap();

    // First date: prev_price equals the item's own price, not the other item's.
    assert_eq!(first_of(1).prev_price, 11.0);
    assert_eq!(first_of(2).prev_price, 21.0);
    // Last date: no label borrowed from the other item.
    assert_eq!(last_of(1).price_tomorrow, None);
    assert_eq!(last_of(2).price_tomorrow, None);
    // Labels stay inside each item's own sequence.
    assert_eq!(first_of(1).price_tomorrow, Some(12.0));
    assert_eq!(first_of(2).price_tomorrow, Some(22.0));
}

#[test]
fn assembly_is_idempotent() {
    let mut store = single_item_store(&[100.0, 99.0, 103.0, 98.0]);
    store.record_competitor(competitor(1, 2, 97.0));
    store.record_sale(sale(2, 1, 50.0));
    store.record_sale(sale(2, 2, 51.0));
    store.record_demand(demand(2, 1, 80, 8));
    store.record_demand(demand(2, 2, 90, 9));

    let first = assemble(&store, None).unwrap();
    let second = assemble(&store, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_views_yields_zero_conversion_rate() {
    let mut store = InMemoryObservationStore::new();
    store.record_sale(sale(1, 1, 100.0));
    store.record_sale(sale(1, 2, 101.0));
    store.record_demand(demand(1, 1, 0, 0));
    store.record_demand(demand(1, 2, 200, 30));

    let dataset = assemble(&store, None).unwrap();
    assert_eq!(dataset.rows()[0].features[4], 0.0);
    assert_eq!(dataset.rows()[1].features[4], 0.15);
}

#[test]
fn demandless_days_are_dropped_but_still_anchor_the_shifts() {
    let mut store = InMemoryObservationStore::new();
    store.record_sale(sale(1, 1, 100.0));
    store.record_sale(sale(1, 2, 104.0));
    store.record_sale(sale(1, 3, 108.0));
    store.record_demand(demand(1, 1, 100, 10));
    // No demand on day 2.
    store.record_demand(demand(1, 3, 100, 10));

    let dataset = assemble(&store, None).unwrap();
    assert_eq!(dataset.len(), 2);

    // Day 1's label is day 2's price even though day 2 itself was dropped.
    assert_eq!(dataset.rows()[0].price_tomorrow, Some(104.0));
    // Day 3's trend reference is day 2's price.
    assert_eq!(dataset.rows()[1].prev_price, 104.0);
    assert_eq!(dataset.rows()[1].price_tomorrow, None);

    // Training keeps only the labelled survivors; inference still sees day 3.
    assert_eq!(dataset.training_rows().len(), 1);
    assert_eq!(dataset.latest_row(1).unwrap().date, date(3));
}

#[test]
fn derived_columns_follow_the_feature_order() {
    let mut store = InMemoryObservationStore::new();
    store.record_sale(SalesRecord {
        item_id: 1,
        date: date(1),
        units_sold: 80,
        price: 100.0,
    });
    store.record_demand(demand(1, 1, 500, 60));
    store.record_competitor(competitor(1, 1, 98.0));

    let dataset = assemble(&store, None).unwrap();
    let row = dataset.latest_row(1).unwrap();
    assert_eq!(row.features, [100.0, 80.0, 500.0, 60.0, 0.12, 98.0]);
    assert_eq!(row.prev_price, 100.0);
    assert_eq!(row.price_tomorrow, None);
}

#[test]
fn empty_history_assembles_to_empty_dataset() {
    let store = InMemoryObservationStore::new();
    let dataset = assemble(&store, None).unwrap();
    assert!(dataset.is_empty());
    assert!(dataset.training_rows().is_empty());
    assert!(dataset.latest_row(1).is_none());
}
