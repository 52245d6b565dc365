//! Pure aggregation over immutable record snapshots.
//!
//! Every operation is a read-only function of its inputs. Sums use exact
//! decimal arithmetic throughout; the only rounding happens at the display
//! boundary (percentages and ratios, half-even to two decimals).

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::BudgetConfig;
use crate::period::{month_label, DateRange};
use crate::records::{Category, ExpenseRecord};

/// Aggregated spend for one calendar month, with the configured budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyBucket {
    pub month: String,
    pub amount: Decimal,
    pub budget: Decimal,
}

/// Aggregated spend for one category, with its share of the range total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySlice {
    pub name: Category,
    pub value: Decimal,
    pub color: String,
    pub percentage: Decimal,
}

/// Period-over-period change ratio.
///
/// `FromZero` is the sentinel for growth against a zero baseline, where the
/// ratio is unbounded; it serializes as JSON `null`. A zero-spend period
/// against a zero baseline is `Change(0)`, not `FromZero`. Both projectors
/// share this convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PercentChange {
    Change(Decimal),
    FromZero,
}

impl PercentChange {
    pub fn is_from_zero(&self) -> bool {
        matches!(self, PercentChange::FromZero)
    }
}

/// Headline scalars for a current/previous range pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_spent: Decimal,
    pub period_spent: Decimal,
    pub percent_change: PercentChange,
    pub transaction_count: usize,
}

/// Stateless aggregation operations over a record snapshot.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Chronological per-month totals for every calendar month `range`
    /// touches. Months without records still yield a bucket with a zero
    /// total, so downstream chart axes keep their fixed length.
    pub fn monthly_series(
        records: &[ExpenseRecord],
        range: &DateRange,
        budgets: &BudgetConfig,
    ) -> Vec<MonthlyBucket> {
        tracing::debug!(records = records.len(), "computing monthly series");
        range
            .month_starts()
            .into_iter()
            .map(|start| {
                let month_end = crate::period::shift_month(start, 1);
                let bucket_range =
                    DateRange::new(start.max(range.start), month_end.min(range.end));
                let label = month_label(start);
                MonthlyBucket {
                    budget: budgets.budget_for_month(&label),
                    amount: Self::spent_in(records, &bucket_range),
                    month: label,
                }
            })
            .collect()
    }

    /// Per-category totals over `range`, descending by total with the
    /// palette index as the deterministic tie-break. An empty range total
    /// yields an empty breakdown, never a division by zero.
    pub fn category_breakdown(records: &[ExpenseRecord], range: &DateRange) -> Vec<CategorySlice> {
        tracing::debug!(records = records.len(), "computing category breakdown");
        let mut totals: HashMap<Category, Decimal> = HashMap::new();
        for record in records.iter().filter(|record| range.contains(record.date)) {
            *totals.entry(record.category).or_insert(Decimal::ZERO) += record.amount;
        }
        let grand_total: Decimal = totals.values().copied().sum();
        if grand_total.is_zero() {
            return Vec::new();
        }
        let mut slices: Vec<CategorySlice> = totals
            .into_iter()
            .map(|(category, value)| CategorySlice {
                name: category,
                color: category.color().to_string(),
                percentage: round2(Decimal::ONE_HUNDRED * value / grand_total),
                value,
            })
            .collect();
        slices.sort_by(|a, b| {
            b.value
                .cmp(&a.value)
                .then_with(|| a.name.palette_index().cmp(&b.name.palette_index()))
        });
        slices
    }

    /// Headline scalars: all-time spend, current-range spend, change
    /// against the previous range, and the current-range record count.
    pub fn summary_stats(
        records: &[ExpenseRecord],
        current: &DateRange,
        previous: &DateRange,
    ) -> SummaryStats {
        let period_spent = Self::spent_in(records, current);
        let previous_spent = Self::spent_in(records, previous);
        SummaryStats {
            total_spent: records.iter().map(|record| record.amount).sum(),
            period_spent,
            percent_change: Self::percent_change(period_spent, previous_spent),
            transaction_count: Self::count_in(records, current),
        }
    }

    /// Exact sum of amounts over records dated inside `range`.
    pub fn spent_in(records: &[ExpenseRecord], range: &DateRange) -> Decimal {
        records
            .iter()
            .filter(|record| range.contains(record.date))
            .map(|record| record.amount)
            .sum()
    }

    /// Number of records dated inside `range`.
    pub fn count_in(records: &[ExpenseRecord], range: &DateRange) -> usize {
        records
            .iter()
            .filter(|record| range.contains(record.date))
            .count()
    }

    /// `100 * (current - previous) / previous`, with the documented
    /// fallbacks for a zero baseline.
    pub fn percent_change(current: Decimal, previous: Decimal) -> PercentChange {
        if previous.is_zero() {
            if current.is_zero() {
                PercentChange::Change(Decimal::ZERO)
            } else {
                PercentChange::FromZero
            }
        } else {
            PercentChange::Change(round2(
                Decimal::ONE_HUNDRED * (current - previous) / previous,
            ))
        }
    }
}

/// Single rounding rule for display ratios: half-even to two decimals.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
