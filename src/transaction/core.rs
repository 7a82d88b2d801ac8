//! Defines the transaction record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database_id::TransactionId;

/// A product that was listed for sale, and whether it sold.
///
/// The JSON representation uses camelCase field names, matching the seed
/// data, e.g. `dateOfSale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned by the seed data.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// The listed price.
    pub price: f64,
    /// A longer description of the product.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL of a product image.
    #[serde(default)]
    pub image: String,
    /// Whether the product sold.
    pub sold: bool,
    /// When the product was listed as sold (or unsold).
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}
