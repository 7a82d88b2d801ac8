//! Sales statistics for a month: the total sale amount and how many
//! products did and did not sell.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{Error, app_state::ReportState, month::resolve_month, transaction::Transaction};

/// The query parameters accepted by the month-scoped report endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// An English month name, e.g. "March".
    pub month: Option<String>,
}

/// Summary statistics over the transactions in a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    /// The sum of the prices of all transactions, sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions where the product sold.
    pub total_sold_items: u64,
    /// The number of transactions where the product did not sell.
    pub total_not_sold_items: u64,
}

impl SalesStatistics {
    /// Summarise `transactions`.
    pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut statistics, transaction| {
                statistics.total_sale_amount += transaction.price;

                if transaction.sold {
                    statistics.total_sold_items += 1;
                } else {
                    statistics.total_not_sold_items += 1;
                }

                statistics
            })
    }
}

/// A route handler for the sales statistics of a month.
///
/// A missing or unrecognised month gives all-zero statistics.
pub async fn get_statistics_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SalesStatistics>, Error> {
    let Some(date_range) = resolve_month(query.month.as_deref(), &state.local_timezone)? else {
        return Ok(Json(SalesStatistics::default()));
    };

    let statistics = state.transaction_store.sales_statistics(&date_range)?;

    Ok(Json(statistics))
}
