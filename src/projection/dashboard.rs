use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BudgetConfig;
use crate::engine::{AggregationEngine, CategorySlice, MonthlyBucket, PercentChange};
use crate::period::{
    self, month_label, month_to_date, previous_month, previous_week, week_to_date, DateRange,
};
use crate::records::ExpenseRecord;

/// How many of the most recent records the dashboard lists.
const RECENT_EXPENSE_LIMIT: usize = 5;

/// Months covered by the dashboard's spending chart.
const CHART_MONTHS: u32 = 6;

/// Serializable snapshot backing the dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_spent: Decimal,
    pub this_month_spent: Decimal,
    /// May be negative when the month is over budget; callers need the true
    /// deficit for alerting, so it is never clamped.
    pub budget_left: Decimal,
    pub transactions: usize,
    pub transactions_this_week: usize,
    pub percent_change_month: PercentChange,
    pub percent_change_week: PercentChange,
    pub recent_expenses: Vec<ExpenseRecord>,
    pub monthly_data: Vec<MonthlyBucket>,
    pub category_data: Vec<CategorySlice>,
}

/// Composes the aggregation engine for the dashboard's fixed comparisons:
/// this calendar month against the previous one (by spend) and this ISO
/// week against the previous one (by transaction count).
pub struct DashboardProjector;

impl DashboardProjector {
    pub fn project(
        records: &[ExpenseRecord],
        config: &BudgetConfig,
        now: NaiveDate,
    ) -> DashboardSnapshot {
        tracing::debug!(records = records.len(), %now, "projecting dashboard");
        let this_month = month_to_date(now);
        let last_month = previous_month(now);
        let this_week = week_to_date(now);
        let last_week = previous_week(now);

        let stats = AggregationEngine::summary_stats(records, &this_month, &last_month);
        let week_count = AggregationEngine::count_in(records, &this_week);
        let last_week_count = AggregationEngine::count_in(records, &last_week);

        DashboardSnapshot {
            budget_left: config.budget_for_month(&month_label(now)) - stats.period_spent,
            total_spent: stats.total_spent,
            this_month_spent: stats.period_spent,
            transactions: records.len(),
            transactions_this_week: week_count,
            percent_change_month: stats.percent_change,
            percent_change_week: AggregationEngine::percent_change(
                Decimal::from(week_count),
                Decimal::from(last_week_count),
            ),
            recent_expenses: recent_expenses(records),
            monthly_data: AggregationEngine::monthly_series(
                records,
                &period::trailing_months(now, CHART_MONTHS),
                config,
            ),
            category_data: AggregationEngine::category_breakdown(records, &DateRange::all_time()),
        }
    }
}

/// Most recently dated records, newest first. Equal dates fall back to the
/// id sequence, so later-created records sort later. Truncates silently
/// when fewer than the limit exist.
fn recent_expenses(records: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
    let mut recent: Vec<ExpenseRecord> = records.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    recent.truncate(RECENT_EXPENSE_LIMIT);
    recent
}
