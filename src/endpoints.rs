//! The API endpoints URIs.
//!
//! Every route is nested under [API_PREFIX].

/// The prefix shared by every API route.
pub const API_PREFIX: &str = "/api";
/// The route that seeds the transaction store.
pub const INITIALIZE: &str = "/initialize";
/// The route for listing a page of transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for a month's sales statistics.
pub const STATISTICS: &str = "/statistics";
/// The route for a month's price range bar chart.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for a month's category pie chart.
pub const PIE_CHART: &str = "/pie-chart";

/// Join [API_PREFIX] and `endpoint` into the full request path.
#[cfg(test)]
pub fn api_path(endpoint: &str) -> String {
    format!("{API_PREFIX}{endpoint}")
}
