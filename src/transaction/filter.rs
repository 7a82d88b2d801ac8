//! The rules for which transactions the transaction list returns.

use crate::{month::DateRange, transaction::Transaction};

/// A free text search over transactions.
///
/// The text matches the title or description as a case-insensitive
/// substring. If the text is also a number it matches an equal price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTerm {
    /// The search text, matched literally.
    pub text: String,
    /// The numeric value of the text, if it is a finite number.
    pub price: Option<f64>,
}

impl SearchTerm {
    /// Parse the raw `search` query parameter. A missing parameter is an
    /// empty search, which matches every transaction.
    pub fn parse(value: Option<&str>) -> Self {
        let text = value.unwrap_or_default().to_owned();
        let price = text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Self { text, price }
    }

    /// Whether `transaction` matches the search.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let needle = self.text.to_lowercase();

        transaction.title.to_lowercase().contains(&needle)
            || transaction.description.to_lowercase().contains(&needle)
            || self.price == Some(transaction.price)
    }
}

/// Selects the transactions sold within a date range that match a search.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Only transactions with a sale date in this range match.
    pub date_range: DateRange,
    /// Only transactions matching this search match.
    pub search: SearchTerm,
}

impl TransactionFilter {
    /// Whether `transaction` passes the filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.date_range.contains(transaction.date_of_sale) && self.search.matches(transaction)
    }
}
