//! Inclusive range filters handed to the data store.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Inclusive bounds on one field. At least one bound is set whenever the
/// filter exists; an absent filter is represented by `None` on its owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<T>,
}

impl<T> RangeFilter<T> {
    /// `None` when neither bound is given.
    pub fn new(lower_bound: Option<T>, upper_bound: Option<T>) -> Option<Self> {
        if lower_bound.is_none() && upper_bound.is_none() {
            return None;
        }
        Some(Self {
            lower_bound,
            upper_bound,
        })
    }

    pub fn between(lower_bound: T, upper_bound: T) -> Self {
        Self {
            lower_bound: Some(lower_bound),
            upper_bound: Some(upper_bound),
        }
    }
}

/// Filter on the `date` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DateFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<RangeFilter<DateTime<Utc>>>,
}

impl DateFilter {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
    }
}

/// Filter on the `amount` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AmountFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<RangeFilter<f64>>,
}

impl AmountFilter {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
    }
}

/// Date and amount filters for a list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ListFilter {
    #[serde(flatten)]
    pub date: DateFilter,
    #[serde(flatten)]
    pub amount: AmountFilter,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.amount.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_without_bounds_is_none() {
        assert_eq!(RangeFilter::<f64>::new(None, None), None);
        assert!(RangeFilter::new(Some(1.0), None).is_some());
    }

    #[test]
    fn test_empty_filter_serializes_to_empty_object() {
        let json = serde_json::to_value(ListFilter::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_amount_bounds_serialize_as_numbers() {
        let filter = ListFilter {
            date: DateFilter::default(),
            amount: AmountFilter {
                amount: RangeFilter::new(Some(100.0), None),
            },
        };
        let json = serde_json::to_value(filter).unwrap();
        assert_eq!(json, serde_json::json!({"amount": {"lowerBound": 100.0}}));
    }
}
