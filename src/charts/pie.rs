//! Counts transactions per category for the pie chart.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{
    Error, app_state::ReportState, month::resolve_month, statistics::MonthQuery,
    transaction::Transaction,
};

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// How many transactions are in `category`.
    pub count: u64,
}

/// Count `transactions` per category, one entry per category present.
pub fn count_by_category<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(transaction.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect()
}

/// A route handler for the category pie chart of a month.
///
/// A missing or unrecognised month gives an empty chart.
pub async fn get_pie_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let Some(date_range) = resolve_month(query.month.as_deref(), &state.local_timezone)? else {
        return Ok(Json(Vec::new()));
    };

    let counts = state.transaction_store.count_by_category(&date_range)?;

    Ok(Json(counts))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::json;
    use time::Month;

    use crate::{
        app_state::ReportState,
        stores::{InMemoryTransactionStore, TransactionStore},
        test_utils::{FailingTransactionStore, sold_this_year, transaction},
        transaction::Transaction,
    };

    use super::{CategoryCount, count_by_category, get_pie_chart_endpoint};

    fn get_test_server(transaction_store: Arc<dyn TransactionStore>) -> TestServer {
        let state = ReportState {
            transaction_store,
            local_timezone: "Etc/UTC".to_owned(),
        };
        let app = Router::new()
            .route("/pie-chart", get(get_pie_chart_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn march_store(transactions: Vec<Transaction>) -> Arc<InMemoryTransactionStore> {
        let store = InMemoryTransactionStore::new();
        store
            .insert_many(
                transactions
                    .into_iter()
                    .map(|mut transaction| {
                        transaction.date_of_sale = sold_this_year(Month::March, 5);
                        transaction
                    })
                    .collect(),
            )
            .unwrap();
        Arc::new(store)
    }

    #[test]
    fn one_entry_per_category() {
        let transactions = [
            transaction(1, "Mug", 5.0, "kitchen"),
            transaction(2, "Lamp", 20.0, "home"),
            transaction(3, "Pan", 30.0, "kitchen"),
        ];

        let mut counts = count_by_category(&transactions);
        counts.sort_by(|a, b| a.category.cmp(&b.category));

        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    category: "home".to_owned(),
                    count: 1
                },
                CategoryCount {
                    category: "kitchen".to_owned(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn counts_sum_to_number_of_transactions() {
        let transactions: Vec<_> = (0..25)
            .map(|i| transaction(i, "Item", 1.0, &format!("category {}", i % 4)))
            .collect();

        let total: u64 = count_by_category(&transactions)
            .iter()
            .map(|entry| entry.count)
            .sum();

        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn responds_with_month_categories() {
        let server = get_test_server(march_store(vec![
            transaction(1, "Mug", 5.0, "kitchen"),
            transaction(2, "Lamp", 20.0, "home"),
            transaction(3, "Pan", 30.0, "kitchen"),
        ]));

        let response = server
            .get("/pie-chart")
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([
            { "category": "home", "count": 1 },
            { "category": "kitchen", "count": 2 },
        ]));
    }

    #[tokio::test]
    async fn unknown_month_is_empty_chart() {
        let server = get_test_server(march_store(vec![transaction(1, "Mug", 5.0, "kitchen")]));

        let response = server
            .get("/pie-chart")
            .add_query_param("month", "march")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn store_failure_is_internal_server_error() {
        let server = get_test_server(Arc::new(FailingTransactionStore));

        let response = server.get("/pie-chart").add_query_param("month", "March").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Internal server error" }));
    }
}
