//! Counts transactions per price range for the bar chart.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Serialize, Serializer};

use crate::{
    Error, app_state::ReportState, month::resolve_month, statistics::MonthQuery,
    transaction::Transaction,
};

/// The width of each bounded price range.
pub(crate) const RANGE_WIDTH: u32 = 100;
/// The lower bound of the open-ended price range.
pub(crate) const OPEN_RANGE_START: u32 = 900;
/// The label of the open-ended price range.
pub const OPEN_RANGE_LABEL: &str = "901-above";

/// A bar chart price range.
///
/// Ranges are ordered by their lower bound, with the open-ended range last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceRange {
    /// The range `[lower_bound, lower_bound + 100)`.
    ///
    /// Lower bounds are multiples of 100 from 0 to 800.
    From(u32),
    /// Prices of 900 and above, plus any price that falls outside the bounded
    /// ranges (i.e. negative prices).
    Above,
}

impl PriceRange {
    /// The range that `price` falls in.
    pub fn of(price: f64) -> Self {
        if (0.0..OPEN_RANGE_START as f64).contains(&price) {
            let index = (price / RANGE_WIDTH as f64).floor() as u32;
            Self::From(index * RANGE_WIDTH)
        } else {
            Self::Above
        }
    }

    /// The range with `lower_bound`, where `None` is the open-ended range.
    pub fn from_lower_bound(lower_bound: Option<u32>) -> Self {
        match lower_bound {
            Some(lower_bound) if lower_bound < OPEN_RANGE_START => Self::From(lower_bound),
            _ => Self::Above,
        }
    }
}

/// Bounded ranges serialise as their numeric lower bound, the open-ended
/// range as its label.
impl Serialize for PriceRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::From(lower_bound) => serializer.serialize_u32(*lower_bound),
            Self::Above => serializer.serialize_str(OPEN_RANGE_LABEL),
        }
    }
}

/// The number of transactions in a price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    /// The price range.
    pub range: PriceRange,
    /// How many transactions have a price in `range`.
    pub count: u64,
}

/// Count `transactions` per price range.
///
/// Only ranges with at least one transaction are returned, in ascending
/// order of price.
pub fn count_by_price_range<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<PriceRangeCount> {
    let mut counts: BTreeMap<PriceRange, u64> = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(PriceRange::of(transaction.price)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(range, count)| PriceRangeCount { range, count })
        .collect()
}

/// A route handler for the price range bar chart of a month.
///
/// A missing or unrecognised month gives an empty chart.
pub async fn get_bar_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let Some(date_range) = resolve_month(query.month.as_deref(), &state.local_timezone)? else {
        return Ok(Json(Vec::new()));
    };

    let counts = state.transaction_store.count_by_price_range(&date_range)?;

    Ok(Json(counts))
}
