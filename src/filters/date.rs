//! `date`, `from` and `upTo` query parameters.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use super::InvalidQuery;
use super::range::{DateFilter, RangeFilter};

pub const DATE_PARAM: &str = "date";
pub const FROM_PARAM: &str = "from";
pub const UP_TO_PARAM: &str = "upTo";

const LAST_SECOND_OF_DAY: i64 = 24 * 60 * 60 - 1;

/// Build the date filter from a query map.
///
/// `date` selects a whole day and cannot be combined with `from`/`upTo`.
/// `from` and `upTo` are independent and not checked against each other.
pub fn build_date_filter(query: &HashMap<String, String>) -> Result<DateFilter, InvalidQuery> {
    let date = query.get(DATE_PARAM);
    let from = query.get(FROM_PARAM);
    let up_to = query.get(UP_TO_PARAM);

    if date.is_some() && (from.is_some() || up_to.is_some()) {
        return Err(InvalidQuery::UnauthorizedParameters);
    }

    if let Some(date) = date {
        let day = parse_day(date).ok_or(InvalidQuery::InvalidDate)?;
        return Ok(DateFilter {
            date: Some(RangeFilter::between(start_of_day(day), end_of_day(day))),
        });
    }

    let from = from
        .map(|v| parse_day(v).ok_or(InvalidQuery::InvalidRange))
        .transpose()?;
    let up_to = up_to
        .map(|v| parse_day(v).ok_or(InvalidQuery::InvalidRange))
        .transpose()?;

    Ok(DateFilter {
        date: RangeFilter::new(from.map(start_of_day), up_to.map(end_of_day)),
    })
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// 00:00:00 UTC on `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59 UTC on `day`.
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day) + TimeDelta::seconds(LAST_SECOND_OF_DAY)
}
