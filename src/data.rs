//! Dataset assembly for the pricing model
//!
//! Joins the sales, demand and competitor observation streams on
//! (item_id, date), fills missing competitor prices, and derives the
//! supervised frame: one feature vector per item-day, the next-period price as
//! label, and the previous price as trend reference. The transform is pure;
//! running it twice over the same history yields identical rows.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use crate::error::{PricingError, Result};
use crate::model::FEATURE_COUNT;
use crate::store::{CompetitorRecord, DemandRecord, ObservationStore, SalesRecord};

/// One assembled item-day with complete features.
///
/// `price_tomorrow` is `None` on an item's last observed date; such rows are
/// excluded from training but remain available for inference, which only
/// needs the features.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub item_id: i64,
    pub date: NaiveDate,
    pub features: [f64; FEATURE_COUNT],
    pub price_tomorrow: Option<f64>,
    pub prev_price: f64,
}

/// A supervised row with a defined label.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub features: [f64; FEATURE_COUNT],
    pub price_tomorrow: f64,
    pub prev_price: f64,
}

/// The assembled dataset, ordered by (item_id, date) ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<ObservationRow>,
}

impl Dataset {
    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows usable for supervised fitting: those with a defined label.
    pub fn training_rows(&self) -> Vec<TrainingRow> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.price_tomorrow.map(|price_tomorrow| TrainingRow {
                    features: row.features,
                    price_tomorrow,
                    prev_price: row.prev_price,
                })
            })
            .collect()
    }

    /// The most recent surviving row for one item, for inference.
    pub fn latest_row(&self, item_id: i64) -> Option<&ObservationRow> {
        self.rows.iter().rev().find(|row| row.item_id == item_id)
    }
}

/// Assemble the dataset from the store, optionally restricted to one item.
pub fn assemble<S: ObservationStore>(store: &S, item_id: Option<i64>) -> Result<Dataset> {
    let sales = store.list_sales(item_id)?;
    if sales.is_empty() {
        return Ok(Dataset::default());
    }
    let demand = store.list_demand(item_id)?;
    let competitor = store.list_competitor(item_id)?;

    let df = join_streams(&sales, &demand, &competitor)?;
    let mut joined = materialize(&df)?;

    // Sort before any shift; shifts must never cross an item boundary.
    joined.sort_by(|a, b| (a.item_id, a.date).cmp(&(b.item_id, b.date)));

    let mut rows = Vec::with_capacity(joined.len());
    let mut start = 0;
    while start < joined.len() {
        let id = joined[start].item_id;
        let mut end = start;
        while end < joined.len() && joined[end].item_id == id {
            end += 1;
        }
        assemble_item(&joined[start..end], &mut rows);
        start = end;
    }

    Ok(Dataset { rows })
}

/// A sales-anchored row straight out of the join, demand and competitor
/// columns still nullable.
struct JoinedRow {
    item_id: i64,
    date: NaiveDate,
    units_sold: i64,
    price: f64,
    views: Option<i64>,
    add_to_cart: Option<i64>,
    competitor_price: Option<f64>,
}

/// Left-join demand and competitor streams onto the sales stream.
fn join_streams(
    sales: &[SalesRecord],
    demand: &[DemandRecord],
    competitor: &[CompetitorRecord],
) -> Result<DataFrame> {
    let df_sales = DataFrame::new(vec![
        Series::new("item_id", sales.iter().map(|r| r.item_id).collect::<Vec<i64>>()),
        Series::new("date", sales.iter().map(|r| day_number(r.date)).collect::<Vec<i32>>()),
        Series::new(
            "units_sold",
            sales.iter().map(|r| i64::from(r.units_sold)).collect::<Vec<i64>>(),
        ),
        Series::new("price", sales.iter().map(|r| r.price).collect::<Vec<f64>>()),
    ])?;

    let df_demand = DataFrame::new(vec![
        Series::new("item_id", demand.iter().map(|r| r.item_id).collect::<Vec<i64>>()),
        Series::new("date", demand.iter().map(|r| day_number(r.date)).collect::<Vec<i32>>()),
        Series::new(
            "views",
            demand.iter().map(|r| i64::from(r.views)).collect::<Vec<i64>>(),
        ),
        Series::new(
            "add_to_cart",
            demand.iter().map(|r| i64::from(r.add_to_cart)).collect::<Vec<i64>>(),
        ),
    ])?;

    let df_competitor = DataFrame::new(vec![
        Series::new(
            "item_id",
            competitor.iter().map(|r| r.item_id).collect::<Vec<i64>>(),
        ),
        Series::new(
            "date",
            competitor.iter().map(|r| day_number(r.date)).collect::<Vec<i32>>(),
        ),
        Series::new(
            "competitor_price",
            competitor.iter().map(|r| r.competitor_price).collect::<Vec<f64>>(),
        ),
    ])?;

    let joined = df_sales
        .join(
            &df_demand,
            ["item_id", "date"],
            ["item_id", "date"],
            JoinArgs::new(JoinType::Left),
        )?
        .join(
            &df_competitor,
            ["item_id", "date"],
            ["item_id", "date"],
            JoinArgs::new(JoinType::Left),
        )?;

    Ok(joined)
}

/// Pull the joined frame back out into typed rows.
fn materialize(df: &DataFrame) -> Result<Vec<JoinedRow>> {
    let item_ids = df.column("item_id")?.i64()?;
    let dates = df.column("date")?.i32()?;
    let units = df.column("units_sold")?.i64()?;
    let prices = df.column("price")?.f64()?;
    let views = df.column("views")?.i64()?;
    let carts = df.column("add_to_cart")?.i64()?;
    let competitors = df.column("competitor_price")?.f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(item_id), Some(date), Some(units_sold), Some(price)) =
            (item_ids.get(i), dates.get(i), units.get(i), prices.get(i))
        else {
            return Err(PricingError::DataError(
                "null value in a sales-anchored column".to_string(),
            ));
        };
        rows.push(JoinedRow {
            item_id,
            date: date_from_day_number(date)?,
            units_sold,
            price,
            views: views.get(i),
            add_to_cart: carts.get(i),
            competitor_price: competitors.get(i),
        });
    }
    Ok(rows)
}

/// Derive one item's rows from its chronological slice of the join.
///
/// Label and reference shifts run over the full sales-anchored sequence, so a
/// day dropped for missing demand still contributes its price to the
/// neighbouring rows. Rows with missing demand fields are then skipped.
fn assemble_item(group: &[JoinedRow], out: &mut Vec<ObservationRow>) {
    let observed: Vec<f64> = group.iter().filter_map(|r| r.competitor_price).collect();
    let competitor_mean = if observed.is_empty() {
        None
    } else {
        Some(observed.iter().sum::<f64>() / observed.len() as f64)
    };

    for (i, row) in group.iter().enumerate() {
        let (Some(views), Some(add_to_cart)) = (row.views, row.add_to_cart) else {
            continue;
        };
        // Per-item mean fill; items with no competitor history at all fall
        // back to each row's own price.
        let competitor_price = row
            .competitor_price
            .or(competitor_mean)
            .unwrap_or(row.price);
        let conversion_rate = if views > 0 {
            add_to_cart as f64 / views as f64
        } else {
            0.0
        };
        let prev_price = if i == 0 { row.price } else { group[i - 1].price };
        let price_tomorrow = group.get(i + 1).map(|next| next.price);

        // Layout follows FEATURE_COLUMNS.
        out.push(ObservationRow {
            item_id: row.item_id,
            date: row.date,
            features: [
                row.price,
                row.units_sold as f64,
                views as f64,
                add_to_cart as f64,
                conversion_rate,
                competitor_price,
            ],
            price_tomorrow,
            prev_price,
        });
    }
}

fn day_number(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn date_from_day_number(days: i32) -> Result<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days)
        .ok_or_else(|| PricingError::DataError(format!("day number {days} out of range")))
}
