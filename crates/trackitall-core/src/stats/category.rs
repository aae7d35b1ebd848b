//! Per-category totals within a date window.
//!
//! Input records come from the data-retrieval layer with dates in any of the
//! shapes [`RecordDate`] accepts. Records whose date cannot be normalized are
//! dropped from every window instead of failing the aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dates::{DateWindow, RecordDate};
use crate::error::GamificationError;

/// A dated, categorized amount (an expense, minutes of study, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default = "missing_date")]
    pub date: RecordDate,
    pub category: String,
    pub amount: f64,
}

fn missing_date() -> RecordDate {
    RecordDate::Unrecognized(serde_json::Value::Null)
}

impl CategoryRecord {
    pub fn new(date: impl Into<RecordDate>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount,
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.date.to_naive_date()
    }
}

/// Totals keyed by category label.
pub type CategoryTotals = BTreeMap<String, f64>;

/// One category's slice of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: u32,
}

/// Window aggregation over [`CategoryRecord`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryAggregator;

impl CategoryAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Sum amounts per category for records dated in `[start, end)`.
    pub fn totals_by_category(
        &self,
        records: &[CategoryRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> CategoryTotals {
        self.totals_in(records, DateWindow::new(start, end))
    }

    pub fn totals_in(&self, records: &[CategoryRecord], window: DateWindow) -> CategoryTotals {
        let mut totals = CategoryTotals::new();
        let mut undated = 0usize;
        for record in records {
            match record.day() {
                Some(day) if window.contains(day) => {
                    *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
                }
                Some(_) => {}
                None => undated += 1,
            }
        }
        if undated > 0 {
            tracing::warn!(undated, "skipped records without a readable date");
        }
        totals
    }

    /// Sum of every record in the window regardless of category.
    pub fn window_total(&self, records: &[CategoryRecord], window: DateWindow) -> f64 {
        self.totals_in(records, window).values().sum()
    }

    /// Each category's rounded percentage of the overall sum.
    ///
    /// A zero (or negative) sum yields 0 for every category.
    pub fn percentage_share(&self, totals: &CategoryTotals) -> BTreeMap<String, u32> {
        let sum: f64 = totals.values().sum();
        totals
            .iter()
            .map(|(category, amount)| {
                let share = if sum > 0.0 {
                    (amount / sum * 100.0).round().max(0.0) as u32
                } else {
                    0
                };
                (category.clone(), share)
            })
            .collect()
    }

    /// Totals and shares, largest amount first.
    pub fn breakdown(&self, totals: &CategoryTotals) -> Vec<CategoryShare> {
        let shares = self.percentage_share(totals);
        let mut rows: Vec<CategoryShare> = totals
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: *amount,
                percentage: shares.get(category).copied().unwrap_or(0),
            })
            .collect();
        rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        rows
    }

    /// Average per day over a period.
    ///
    /// # Errors
    /// Returns [`GamificationError::InvalidPeriod`] if `period_days <= 0`.
    pub fn daily_average(&self, total: f64, period_days: i64) -> Result<f64, GamificationError> {
        if period_days <= 0 {
            return Err(GamificationError::InvalidPeriod { days: period_days });
        }
        Ok(total / period_days as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::month_window;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_end_is_exclusive() {
        let records = vec![
            CategoryRecord::new("2024-01-05", "Food", 100.0),
            CategoryRecord::new("2024-02-01", "Food", 50.0),
        ];
        let totals =
            CategoryAggregator::new().totals_by_category(&records, d(2024, 1, 1), d(2024, 2, 1));
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Food"], 100.0);
    }

    #[test]
    fn mixed_date_shapes_and_bad_dates() {
        let raw = r#"[
            {"date": "2024-01-05", "category": "Food", "amount": 40},
            {"date": 1704844800000, "category": "Food", "amount": 10},
            {"date": {"seconds": 1704844800, "nanoseconds": 0}, "category": "Transport", "amount": 25},
            {"date": "not a date", "category": "Food", "amount": 999},
            {"category": "Food", "amount": 999}
        ]"#;
        let records: Vec<CategoryRecord> = serde_json::from_str(raw).unwrap();
        let totals = CategoryAggregator::new().totals_in(&records, month_window(d(2024, 1, 20)));
        assert_eq!(totals["Food"], 50.0);
        assert_eq!(totals["Transport"], 25.0);
    }

    #[test]
    fn percentage_share_handles_zero_and_empty() {
        let agg = CategoryAggregator::new();
        let mut totals = CategoryTotals::new();
        totals.insert("Food".into(), 100.0);
        totals.insert("Transport".into(), 0.0);
        let shares = agg.percentage_share(&totals);
        assert_eq!(shares["Food"], 100);
        assert_eq!(shares["Transport"], 0);

        assert!(agg.percentage_share(&CategoryTotals::new()).is_empty());

        let mut zeros = CategoryTotals::new();
        zeros.insert("Food".into(), 0.0);
        assert_eq!(agg.percentage_share(&zeros)["Food"], 0);
    }

    #[test]
    fn percentage_share_rounds() {
        let mut totals = CategoryTotals::new();
        totals.insert("A".into(), 1.0);
        totals.insert("B".into(), 2.0);
        let shares = CategoryAggregator::new().percentage_share(&totals);
        assert_eq!(shares["A"], 33);
        assert_eq!(shares["B"], 67);
    }

    #[test]
    fn breakdown_orders_by_amount() {
        let mut totals = CategoryTotals::new();
        totals.insert("Books".into(), 30.0);
        totals.insert("Food".into(), 70.0);
        let rows = CategoryAggregator::new().breakdown(&totals);
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].percentage, 70);
        assert_eq!(rows[1].percentage, 30);
    }

    #[test]
    fn daily_average_rejects_bad_period() {
        let agg = CategoryAggregator::new();
        assert_eq!(agg.daily_average(310.0, 31), Ok(10.0));
        assert_eq!(
            agg.daily_average(10.0, 0),
            Err(GamificationError::InvalidPeriod { days: 0 })
        );
        assert_eq!(
            agg.daily_average(10.0, -3),
            Err(GamificationError::InvalidPeriod { days: -3 })
        );
    }
}
