//! `min` and `max` query parameters.

use std::collections::HashMap;

use super::InvalidQuery;
use super::range::{AmountFilter, RangeFilter};

pub const MIN_PARAM: &str = "min";
pub const MAX_PARAM: &str = "max";

/// Build the amount filter from a query map. Bounds are inclusive numbers.
pub fn build_amount_filter(query: &HashMap<String, String>) -> Result<AmountFilter, InvalidQuery> {
    let min = query.get(MIN_PARAM).map(|v| parse_amount(v)).transpose()?;
    let max = query.get(MAX_PARAM).map(|v| parse_amount(v)).transpose()?;

    Ok(AmountFilter {
        amount: RangeFilter::new(min, max),
    })
}

fn parse_amount(value: &str) -> Result<f64, InvalidQuery> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(InvalidQuery::InvalidAmount)
}
