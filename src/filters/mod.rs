//! Range filters built from list query parameters.
//!
//! Malformed parameters are a client error: the builders return
//! [`InvalidQuery`] and the HTTP layer answers 400.

mod amount;
mod date;
mod query;
mod range;

use std::collections::HashMap;

use thiserror::Error;

pub use amount::{MAX_PARAM, MIN_PARAM, build_amount_filter};
pub use date::{
    DATE_PARAM, FROM_PARAM, UP_TO_PARAM, build_date_filter, end_of_day, parse_day, start_of_day,
};
pub use query::ListFilterQuery;
pub use range::{AmountFilter, DateFilter, ListFilter, RangeFilter};

/// Rejected filter parameters. The messages are returned to clients verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidQuery {
    #[error("Unauthorized query parameters")]
    UnauthorizedParameters,
    #[error("Date not valid")]
    InvalidDate,
    #[error("From or upTo not valid")]
    InvalidRange,
    #[error("Min or Max values are not valid")]
    InvalidAmount,
}

/// Build both the date and the amount filter. Date errors are reported first.
pub fn build_list_filter(query: &HashMap<String, String>) -> Result<ListFilter, InvalidQuery> {
    Ok(ListFilter {
        date: build_date_filter(query)?,
        amount: build_amount_filter(query)?,
    })
}
