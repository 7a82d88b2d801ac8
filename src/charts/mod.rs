//! Chart data for a month of transactions.
//!
//! - The bar chart counts transactions per price range
//! - The pie chart counts transactions per category

mod bar;
mod pie;

pub(crate) use bar::{OPEN_RANGE_START, RANGE_WIDTH};
pub use bar::{PriceRange, PriceRangeCount, count_by_price_range, get_bar_chart_endpoint};
pub use pie::{CategoryCount, count_by_category, get_pie_chart_endpoint};
