#![allow(missing_docs)]

pub(crate) mod fixtures;

pub(crate) use fixtures::{
    FailingSeedSource, FailingTransactionStore, sold_this_year, transaction,
};
