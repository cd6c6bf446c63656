//! Seeds a small synthetic observation history, trains the pricing model and
//! prints a suggested next-period price for each item.
//!
//! Run with: `cargo run --example suggest_price`

use chrono::NaiveDate;
use dynamic_pricing::{
    CompetitorRecord, DemandRecord, InMemoryArtifactStore, InMemoryObservationStore, Item,
    PricingEngine, SalesRecord,
};

fn seed_store() -> dynamic_pricing::Result<InMemoryObservationStore> {
    let mut store = InMemoryObservationStore::new();

    store.insert_item(Item::new(1, "Desk Lamp", "lighting", 40.0, 50.0, 150.0)?);
    store.insert_item(Item::new(2, "Office Chair", "furniture", 120.0, 150.0, 320.0)?);
    store.insert_item(Item::new(3, "Monitor Stand", "accessories", 18.0, 25.0, 60.0)?);

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let base_prices = [100.0, 230.0, 40.0];

    for (idx, &base) in base_prices.iter().enumerate() {
        let item_id = idx as i64 + 1;
        for day in 0..30u64 {
            let date = start + chrono::Days::new(day);
            // Deterministic drift plus a weekly wobble, so the fitted model
            // has an actual trend to chase.
            let wobble = ((day % 7) as f64 - 3.0) * 0.4;
            let price = base + day as f64 * 0.25 + wobble;
            let views = 400 + (day * 13 % 200) as u32;
            let add_to_cart = views / 8 + (day % 5) as u32;

            store.record_sale(SalesRecord {
                item_id,
                date,
                units_sold: 15 + (day * 7 % 20) as u32,
                price,
            });
            store.record_demand(DemandRecord {
                item_id,
                date,
                views,
                add_to_cart,
            });
            // Every third day the competitor was not observed; assembly fills
            // the gap from the item's own history.
            if day % 3 != 0 {
                store.record_competitor(CompetitorRecord {
                    item_id,
                    date,
                    competitor_price: price - 2.0 + (day % 4) as f64,
                });
            }
        }
    }

    Ok(store)
}

fn main() -> dynamic_pricing::Result<()> {
    let store = seed_store()?;
    let mut engine = PricingEngine::new(store, InMemoryArtifactStore::new());

    let artifact = engine.train(true)?;
    println!("{artifact}");

    for item_id in 1..=3 {
        let history = engine.price_history(item_id)?;
        let latest = history.last().expect("seeded history is non-empty");
        let suggestion = engine.suggest_price(item_id)?;
        println!(
            "item {item_id}: last recorded price {:.2} on {}, suggested next price {suggestion:.2}",
            latest.price, latest.date
        );
    }

    Ok(())
}
