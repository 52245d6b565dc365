use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BudgetConfig;
use crate::engine::{round2, AggregationEngine, CategorySlice, MonthlyBucket};
use crate::period::PeriodToken;
use crate::records::{Category, ExpenseRecord};

/// Serializable snapshot backing the period report view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub monthly_data: Vec<MonthlyBucket>,
    pub category_data: Vec<CategorySlice>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub average_monthly: Decimal,
    pub highest_month: HighestMonth,
    /// Period spend minus the summed per-month budgets; positive means the
    /// period ran over budget.
    pub budget_variance: Decimal,
    /// Absent (JSON `null`) when the period holds no spend at all.
    pub top_category: Option<TopCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighestMonth {
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopCategory {
    pub name: Category,
    pub percentage: Decimal,
}

/// Composes the aggregation engine for an arbitrary resolved period.
pub struct ReportProjector;

impl ReportProjector {
    pub fn project(
        records: &[ExpenseRecord],
        period: PeriodToken,
        config: &BudgetConfig,
        now: NaiveDate,
    ) -> ReportSnapshot {
        tracing::debug!(records = records.len(), %period, %now, "projecting report");
        let resolved = period.resolve(now);
        let monthly_data = AggregationEngine::monthly_series(records, &resolved.current, config);
        let category_data = AggregationEngine::category_breakdown(records, &resolved.current);

        let period_spent: Decimal = monthly_data.iter().map(|bucket| bucket.amount).sum();
        let budget_total: Decimal = monthly_data.iter().map(|bucket| bucket.budget).sum();
        // Resolution guarantees at least one month, so the average never
        // divides by zero.
        let average_monthly = round2(period_spent / Decimal::from(resolved.months));
        // Strictly-greater comparison keeps the earliest month on ties.
        let highest_month = monthly_data
            .iter()
            .fold(None::<&MonthlyBucket>, |best, bucket| match best {
                Some(current) if bucket.amount > current.amount => Some(bucket),
                None => Some(bucket),
                keep => keep,
            })
            .map(|bucket| HighestMonth {
                month: bucket.month.clone(),
                amount: bucket.amount,
            })
            .unwrap_or(HighestMonth {
                month: String::new(),
                amount: Decimal::ZERO,
            });
        let top_category = category_data.first().map(|slice| TopCategory {
            name: slice.name,
            percentage: slice.percentage,
        });

        ReportSnapshot {
            monthly_data,
            category_data,
            summary: ReportSummary {
                average_monthly,
                highest_month,
                budget_variance: period_spent - budget_total,
                top_category,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::records::RecordId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: u64, amount: Decimal, category: Category, date: NaiveDate) -> ExpenseRecord {
        ExpenseRecord {
            id: RecordId(id),
            title: format!("expense-{id}"),
            amount,
            category,
            date,
            description: None,
        }
    }

    fn sample_records() -> Vec<ExpenseRecord> {
        vec![
            record(1, dec!(50), Category::Food, date(2024, 1, 5)),
            record(2, dec!(30), Category::Food, date(2024, 2, 10)),
            record(3, dec!(20), Category::Transport, date(2024, 2, 15)),
        ]
    }

    #[test]
    fn report_matches_three_month_scenario() {
        let snapshot = ReportProjector::project(
            &sample_records(),
            PeriodToken::ThreeMonths,
            &BudgetConfig::new(dec!(1000)),
            date(2024, 2, 29),
        );
        let months: Vec<&str> = snapshot
            .monthly_data
            .iter()
            .map(|bucket| bucket.month.as_str())
            .collect();
        assert_eq!(months, vec!["Dec", "Jan", "Feb"]);
        assert_eq!(snapshot.monthly_data[0].amount, Decimal::ZERO);
        assert_eq!(snapshot.monthly_data[1].amount, dec!(50));
        assert_eq!(snapshot.monthly_data[2].amount, dec!(50));

        let top = snapshot.summary.top_category.expect("top category present");
        assert_eq!(top.name, Category::Food);
        assert_eq!(top.percentage, dec!(80.00));
    }

    #[test]
    fn average_monthly_divides_by_month_count() {
        let snapshot = ReportProjector::project(
            &sample_records(),
            PeriodToken::ThreeMonths,
            &BudgetConfig::default(),
            date(2024, 2, 29),
        );
        // 100 spent across 3 months.
        assert_eq!(snapshot.summary.average_monthly, dec!(33.33));
    }

    #[test]
    fn highest_month_tie_goes_to_earliest() {
        let snapshot = ReportProjector::project(
            &sample_records(),
            PeriodToken::ThreeMonths,
            &BudgetConfig::default(),
            date(2024, 2, 29),
        );
        // Jan and Feb both total 50; Jan wins.
        assert_eq!(snapshot.summary.highest_month.month, "Jan");
        assert_eq!(snapshot.summary.highest_month.amount, dec!(50));
    }

    #[test]
    fn budget_variance_is_spend_minus_summed_budgets() {
        let snapshot = ReportProjector::project(
            &sample_records(),
            PeriodToken::ThreeMonths,
            &BudgetConfig::new(dec!(30)),
            date(2024, 2, 29),
        );
        // 100 spent against 3 * 30 budget: 10 over.
        assert_eq!(snapshot.summary.budget_variance, dec!(10));
    }

    #[test]
    fn empty_period_reports_absent_top_category() {
        let snapshot = ReportProjector::project(
            &[],
            PeriodToken::SixMonths,
            &BudgetConfig::default(),
            date(2024, 2, 29),
        );
        assert!(snapshot.summary.top_category.is_none());
        assert!(snapshot.category_data.is_empty());
        assert_eq!(snapshot.monthly_data.len(), 6);
        assert_eq!(snapshot.summary.average_monthly, Decimal::ZERO);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["summary"]["topCategory"].is_null());
    }
}
