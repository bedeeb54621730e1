//! Dashboard views computed from a canonical table and a filter selection.
//!
//! Every view is a pure function of `(table, selection)`. Month and weekday
//! axes follow first appearance in the unfiltered table. Aggregates over zero
//! rows come back as [`EmptyResult`] rather than NaN.

use chrono::NaiveDate;
use serde::Serialize;

use ledger_core::calendar::BudgetPeriod;
use ledger_core::error::{serialize_aggregate, Aggregate, EmptyResult, LedgerError, Result};
use ledger_core::models::{
    CanonicalTable, CategoryFilter, CategoryId, ExpenseRecord, FilterSelection, MonthFilter, ALL,
    ALL_CATEGORIES, DAILY_TOTAL,
};
use ledger_core::ordering::FirstSeen;
use ledger_core::stats;

// ── View names ────────────────────────────────────────────────────────────────

pub const SUMMARY_VIEW: &str = "summary_metrics";
pub const WEEKDAY_VIEW: &str = "weekday_breakdown";
pub const MONTH_OVER_MONTH_VIEW: &str = "month_over_month";
pub const CATEGORY_BY_MONTH_VIEW: &str = "category_by_month";
pub const MONTHLY_TOTALS_VIEW: &str = "monthly_totals";
pub const RECOMMENDATION_VIEW: &str = "recommended_limit";

// ── Result types ──────────────────────────────────────────────────────────────

/// Which column feeds the category-agnostic views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    DailyTotal,
    Category(CategoryId),
}

impl ValueSource {
    /// Resolve the category part of `selection` against the table's categories.
    pub fn resolve(table: &CanonicalTable, selection: &FilterSelection) -> Result<Self> {
        match &selection.category {
            CategoryFilter::AllCategories => Ok(ValueSource::DailyTotal),
            CategoryFilter::Only(name) => table
                .categories
                .id_of(name)
                .map(ValueSource::Category)
                .ok_or_else(|| LedgerError::UnknownCategory(name.clone())),
        }
    }

    pub fn value(self, record: &ExpenseRecord) -> f64 {
        match self {
            ValueSource::DailyTotal => record.daily_total,
            ValueSource::Category(id) => record.category(id),
        }
    }
}

/// Selectable values for each part of a [`FilterSelection`], sentinel first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub months: Vec<String>,
    /// Weekdays present within the month-filtered rows.
    pub days: Vec<String>,
    pub categories: Vec<String>,
}

/// One point of the spending-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Change in total spending between a month and the one before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthChange {
    pub month: String,
    pub total: f64,
    /// `None` when the previous month's total is zero.
    pub percent_change: Option<f64>,
}

/// Headline numbers over the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_spending: f64,
    pub average_spending: f64,
    pub max_spending: f64,
    /// Income over the filtered rows, whatever the category selection.
    pub total_income: f64,
    /// Latest month-over-month change across the whole ledger; ignores filters.
    #[serde(serialize_with = "serialize_aggregate")]
    pub latest_month_change: Aggregate<MonthChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySpend {
    pub day: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// One stacked bar: every category's total for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMonth {
    pub month: String,
    pub amounts: Vec<CategoryAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

/// Per-month spending with its mean (reference line) and median.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub months: Vec<MonthlyTotal>,
    pub mean: f64,
    pub median: f64,
}

/// Proposed spending ceiling for the month after the ledger ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub limit: f64,
    pub period: BudgetPeriod,
}

/// Everything the presentation layer needs for one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResults {
    pub selection: FilterSelection,
    pub options: FilterOptions,
    /// Column name the category view reads.
    pub value_column: String,
    pub filtered: Vec<ExpenseRecord>,
    pub category_view: Vec<ViewPoint>,
    #[serde(serialize_with = "serialize_aggregate")]
    pub summary: Aggregate<SummaryMetrics>,
    #[serde(serialize_with = "serialize_aggregate")]
    pub weekday_breakdown: Aggregate<Vec<WeekdaySpend>>,
    pub month_over_month: Vec<MonthChange>,
    #[serde(serialize_with = "serialize_aggregate")]
    pub category_by_month: Aggregate<Vec<CategoryMonth>>,
    #[serde(serialize_with = "serialize_aggregate")]
    pub monthly_totals: Aggregate<MonthlyTotals>,
    #[serde(serialize_with = "serialize_aggregate")]
    pub recommendation: Aggregate<Recommendation>,
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Stateless helper that derives every dashboard view.
pub struct Aggregator;

impl Aggregator {
    /// Compute all views for `selection`.
    ///
    /// Fails only when the selection names an unknown category. Views with
    /// nothing to aggregate carry an [`EmptyResult`] instead.
    pub fn compute(table: &CanonicalTable, selection: &FilterSelection) -> Result<DashboardResults> {
        let source = ValueSource::resolve(table, selection)?;
        let months = Self::month_order(table);

        let filtered = Self::filtered_records(table, selection);
        let category_view = Self::category_view(&filtered, source);
        let monthly = Self::monthly_totals(table, &months);
        let month_over_month = Self::month_over_month(table, &months);

        let summary = Self::summary_metrics(&filtered, source, &month_over_month);
        let weekday_breakdown = Self::weekday_breakdown(table, &selection.month, source);
        let category_by_month = Self::category_by_month(table, &filtered, &months);
        let recommendation = Self::recommendation(table, &monthly);

        tracing::debug!(
            rows = table.len(),
            filtered = filtered.len(),
            months = months.len(),
            "aggregation pass complete"
        );

        Ok(DashboardResults {
            selection: selection.clone(),
            options: Self::filter_options(table, &selection.month),
            value_column: match source {
                ValueSource::DailyTotal => DAILY_TOTAL.to_string(),
                ValueSource::Category(id) => table.categories.name(id).to_string(),
            },
            filtered: filtered.into_iter().cloned().collect(),
            category_view,
            summary,
            weekday_breakdown,
            month_over_month,
            category_by_month,
            monthly_totals: monthly,
            recommendation,
        })
    }

    /// Months of the unfiltered table in first-appearance order.
    pub fn month_order(table: &CanonicalTable) -> FirstSeen {
        table.records.iter().map(|r| r.month.as_str()).collect()
    }

    /// Options for the month, day and category selectors.
    ///
    /// Day options are limited to the rows matching `month`.
    pub fn filter_options(table: &CanonicalTable, month: &MonthFilter) -> FilterOptions {
        let month_scope = FilterSelection {
            month: month.clone(),
            ..Default::default()
        };
        let days: FirstSeen = table
            .records
            .iter()
            .filter(|r| month_scope.matches_month(r))
            .map(|r| r.day.as_str())
            .collect();

        FilterOptions {
            months: with_sentinel(ALL, Self::month_order(table).iter()),
            days: with_sentinel(ALL, days.iter()),
            categories: with_sentinel(
                ALL_CATEGORIES,
                table.categories.names().iter().map(String::as_str),
            ),
        }
    }

    /// Rows matching the month filter, then the day filter.
    pub fn filtered_records<'a>(
        table: &'a CanonicalTable,
        selection: &FilterSelection,
    ) -> Vec<&'a ExpenseRecord> {
        table.records.iter().filter(|r| selection.matches(r)).collect()
    }

    /// `(Date, Value)` projection of `records`.
    pub fn category_view(records: &[&ExpenseRecord], source: ValueSource) -> Vec<ViewPoint> {
        records
            .iter()
            .map(|r| ViewPoint {
                date: r.date,
                value: source.value(r),
            })
            .collect()
    }

    /// Totals, average, maximum and income over the filtered rows.
    ///
    /// `month_over_month` is the unfiltered series; its last entry is reported
    /// as the latest change.
    pub fn summary_metrics(
        records: &[&ExpenseRecord],
        source: ValueSource,
        month_over_month: &[MonthChange],
    ) -> Aggregate<SummaryMetrics> {
        let values: Vec<f64> = records.iter().map(|r| source.value(r)).collect();
        let empty = || EmptyResult::new(SUMMARY_VIEW);

        Ok(SummaryMetrics {
            total_spending: values.iter().sum(),
            average_spending: stats::mean(&values).ok_or_else(empty)?,
            max_spending: stats::max(&values).ok_or_else(empty)?,
            total_income: records.iter().map(|r| r.income).sum(),
            latest_month_change: month_over_month
                .last()
                .cloned()
                .ok_or(EmptyResult::new(MONTH_OVER_MONTH_VIEW)),
        })
    }

    /// Spending per weekday within the selected month (all months for
    /// [`MonthFilter::All`]). The day filter does not apply here.
    ///
    /// Weekdays are ordered by first appearance among the month's rows.
    pub fn weekday_breakdown(
        table: &CanonicalTable,
        month: &MonthFilter,
        source: ValueSource,
    ) -> Aggregate<Vec<WeekdaySpend>> {
        let scope = FilterSelection {
            month: month.clone(),
            ..Default::default()
        };
        let rows: Vec<&ExpenseRecord> = table
            .records
            .iter()
            .filter(|r| scope.matches_month(r))
            .collect();
        if rows.is_empty() {
            return Err(EmptyResult::new(WEEKDAY_VIEW));
        }

        let order: FirstSeen = rows.iter().map(|r| r.day.as_str()).collect();
        let sums = sum_in_order(&rows, &order, |r| &r.day, |r| source.value(r));

        Ok(sums
            .into_iter()
            .map(|(day, total)| WeekdaySpend { day, total })
            .collect())
    }

    /// Total `Daily Total` per month over the whole table, in `months` order.
    fn month_sums(table: &CanonicalTable, months: &FirstSeen) -> Vec<MonthlyTotal> {
        let rows: Vec<&ExpenseRecord> = table.records.iter().collect();
        sum_in_order(&rows, months, |r| &r.month, |r| r.daily_total)
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect()
    }

    /// Percent change of each month against the previous one, over the whole
    /// table. The first month has no predecessor and is left out.
    pub fn month_over_month(table: &CanonicalTable, months: &FirstSeen) -> Vec<MonthChange> {
        Self::month_sums(table, months)
            .windows(2)
            .map(|pair| MonthChange {
                month: pair[1].month.clone(),
                total: pair[1].total,
                percent_change: stats::percent_change(pair[0].total, pair[1].total),
            })
            .collect()
    }

    /// Per-month, per-category totals over the filtered rows, months in
    /// first-appearance order of the unfiltered table.
    pub fn category_by_month(
        table: &CanonicalTable,
        records: &[&ExpenseRecord],
        months: &FirstSeen,
    ) -> Aggregate<Vec<CategoryMonth>> {
        if records.is_empty() {
            return Err(EmptyResult::new(CATEGORY_BY_MONTH_VIEW));
        }

        let mut grid: Vec<Option<Vec<f64>>> = vec![None; months.len()];
        for record in records {
            let Some(pos) = months.position(&record.month) else {
                continue;
            };
            let sums = grid[pos].get_or_insert_with(|| vec![0.0; table.categories.len()]);
            for (sum, value) in sums.iter_mut().zip(&record.categories) {
                *sum += value;
            }
        }

        Ok(months
            .iter()
            .zip(grid)
            .filter_map(|(month, sums)| {
                let sums = sums?;
                Some(CategoryMonth {
                    month: month.to_string(),
                    amounts: table
                        .categories
                        .iter()
                        .map(|(id, name)| CategoryAmount {
                            category: name.to_string(),
                            amount: sums[id.0],
                        })
                        .collect(),
                })
            })
            .collect())
    }

    /// Per-month spending over the whole table with mean and median.
    pub fn monthly_totals(table: &CanonicalTable, months: &FirstSeen) -> Aggregate<MonthlyTotals> {
        let months = Self::month_sums(table, months);
        let totals: Vec<f64> = months.iter().map(|m| m.total).collect();
        let empty = || EmptyResult::new(MONTHLY_TOTALS_VIEW);

        Ok(MonthlyTotals {
            mean: stats::mean(&totals).ok_or_else(empty)?,
            median: stats::median(&totals).ok_or_else(empty)?,
            months,
        })
    }

    /// Median monthly spending, proposed for the month after the last date.
    pub fn recommendation(
        table: &CanonicalTable,
        monthly: &Aggregate<MonthlyTotals>,
    ) -> Aggregate<Recommendation> {
        let empty = EmptyResult::new(RECOMMENDATION_VIEW);
        let last = table.max_date().ok_or(empty)?;
        let monthly = monthly.as_ref().map_err(|_| empty)?;
        Ok(Recommendation {
            limit: monthly.median,
            period: BudgetPeriod::following(last),
        })
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Sum `value` over `rows` grouped by `key`, returning only groups that occur,
/// in `order`.
fn sum_in_order<K, V>(rows: &[&ExpenseRecord], order: &FirstSeen, key: K, value: V) -> Vec<(String, f64)>
where
    K: Fn(&ExpenseRecord) -> &String,
    V: Fn(&ExpenseRecord) -> f64,
{
    let mut sums: Vec<Option<f64>> = vec![None; order.len()];
    for row in rows {
        if let Some(pos) = order.position(key(row)) {
            *sums[pos].get_or_insert(0.0) += value(row);
        }
    }
    order
        .iter()
        .zip(sums)
        .filter_map(|(label, sum)| sum.map(|s| (label.to_string(), s)))
        .collect()
}

fn with_sentinel<'a>(sentinel: &'a str, labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    std::iter::once(sentinel)
        .chain(labels)
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::models::{CategorySet, Column, DayFilter};

    fn rec(date: &str, day: &str, bills: f64, food: f64, income: f64) -> ExpenseRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        ExpenseRecord {
            date,
            day: day.to_string(),
            month: ledger_core::calendar::month_name(date).to_string(),
            daily_total: bills + food,
            income,
            categories: vec![bills, food],
            text: vec![],
        }
    }

    fn table(records: Vec<ExpenseRecord>) -> CanonicalTable {
        CanonicalTable {
            layout: vec![
                Column::Date,
                Column::Day,
                Column::Category(CategoryId(0)),
                Column::Category(CategoryId(1)),
                Column::DailyTotal,
                Column::Income,
            ],
            categories: CategorySet::new(vec!["Bills".into(), "Food".into()]),
            text_columns: vec![],
            records,
        }
    }

    /// January 1000, February 1500, March 1200.
    fn quarter() -> CanonicalTable {
        table(vec![
            rec("2024-01-03", "Wednesday", 600.0, 100.0, 5000.0),
            rec("2024-01-01", "Monday", 200.0, 100.0, 0.0),
            rec("2024-02-05", "Monday", 1000.0, 200.0, 5000.0),
            rec("2024-02-06", "Tuesday", 0.0, 300.0, 0.0),
            rec("2024-03-04", "Monday", 700.0, 200.0, 5000.0),
            rec("2024-03-08", "Friday", 0.0, 300.0, 250.0),
        ])
    }

    fn select(month: &str, day: &str, category: &str) -> FilterSelection {
        FilterSelection::from_labels(month, day, category)
    }

    // ── month_over_month ──────────────────────────────────────────────────────

    #[test]
    fn test_month_over_month_series() {
        let t = quarter();
        let series = Aggregator::month_over_month(&t, &Aggregator::month_order(&t));

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].month, "February");
        assert!((series[0].percent_change.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(series[1].month, "March");
        assert!((series[1].percent_change.unwrap() + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_over_month_single_month_is_empty() {
        let t = table(vec![rec("2024-01-01", "Monday", 1.0, 1.0, 0.0)]);
        assert!(Aggregator::month_over_month(&t, &Aggregator::month_order(&t)).is_empty());
    }

    #[test]
    fn test_month_over_month_from_zero_month() {
        let t = table(vec![
            rec("2024-01-01", "Monday", 0.0, 0.0, 0.0),
            rec("2024-02-01", "Thursday", 10.0, 0.0, 0.0),
        ]);
        let series = Aggregator::month_over_month(&t, &Aggregator::month_order(&t));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].percent_change, None);
    }

    #[test]
    fn test_month_order_is_first_appearance_not_calendar() {
        let t = table(vec![
            rec("2024-03-01", "Friday", 1.0, 0.0, 0.0),
            rec("2024-01-01", "Monday", 1.0, 0.0, 0.0),
            rec("2024-02-01", "Thursday", 1.0, 0.0, 0.0),
        ]);
        assert_eq!(
            Aggregator::month_order(&t).labels(),
            &["March", "January", "February"]
        );
    }

    // ── monthly totals / recommendation ───────────────────────────────────────

    #[test]
    fn test_monthly_totals_mean_and_median() {
        let t = quarter();
        let totals = Aggregator::monthly_totals(&t, &Aggregator::month_order(&t)).unwrap();
        let values: Vec<f64> = totals.months.iter().map(|m| m.total).collect();
        assert_eq!(values, vec![1000.0, 1500.0, 1200.0]);
        assert_eq!(totals.median, 1200.0);
        assert!((totals.mean - 1233.333_333_333).abs() < 1e-6);
    }

    #[test]
    fn test_monthly_totals_sum_matches_daily_total() {
        let t = quarter();
        let totals = Aggregator::monthly_totals(&t, &Aggregator::month_order(&t)).unwrap();
        let by_month: f64 = totals.months.iter().map(|m| m.total).sum();
        let by_row: f64 = t.records.iter().map(|r| r.daily_total).sum();
        assert!((by_month - by_row).abs() < 1e-9);
    }

    #[test]
    fn test_recommendation_is_median_for_next_month() {
        let results = Aggregator::compute(&quarter(), &FilterSelection::default()).unwrap();
        let rec = results.recommendation.unwrap();
        assert_eq!(rec.limit, 1200.0);
        assert_eq!(rec.period, BudgetPeriod { month: "April".into(), year: 2024 });
    }

    #[test]
    fn test_recommendation_rolls_over_year() {
        let t = table(vec![
            rec("2024-11-20", "Wednesday", 5.0, 0.0, 0.0),
            rec("2024-12-15", "Sunday", 5.0, 0.0, 0.0),
        ]);
        let results = Aggregator::compute(&t, &FilterSelection::default()).unwrap();
        let period = results.recommendation.unwrap().period;
        assert_eq!(period.month, "January");
        assert_eq!(period.year, 2025);
    }

    #[test]
    fn test_recommendation_ignores_filters() {
        let results = Aggregator::compute(&quarter(), &select("January", "Monday", "Food")).unwrap();
        assert_eq!(results.recommendation.unwrap().limit, 1200.0);
    }

    // ── summary metrics ───────────────────────────────────────────────────────

    #[test]
    fn test_summary_unfiltered() {
        let results = Aggregator::compute(&quarter(), &FilterSelection::default()).unwrap();
        let summary = results.summary.unwrap();
        assert_eq!(summary.total_spending, 3700.0);
        assert!((summary.average_spending - 3700.0 / 6.0).abs() < 1e-9);
        assert_eq!(summary.max_spending, 1200.0);
        assert_eq!(summary.total_income, 15250.0);
        let latest = summary.latest_month_change.unwrap();
        assert_eq!(latest.month, "March");
    }

    #[test]
    fn test_summary_category_changes_spend_not_income() {
        let results = Aggregator::compute(&quarter(), &select("February", "All", "Food")).unwrap();
        let summary = results.summary.unwrap();
        assert_eq!(summary.total_spending, 500.0);
        assert_eq!(summary.max_spending, 300.0);
        assert_eq!(summary.total_income, 5000.0);
    }

    #[test]
    fn test_summary_month_change_is_global() {
        let results = Aggregator::compute(&quarter(), &select("January", "All", "All Categories")).unwrap();
        let latest = results.summary.unwrap().latest_month_change.unwrap();
        assert_eq!(latest.month, "March");
        assert!((latest.percent_change.unwrap() + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_empty_when_day_absent_from_month() {
        let results = Aggregator::compute(&quarter(), &select("January", "Friday", "All Categories")).unwrap();
        assert_eq!(results.summary, Err(EmptyResult::new(SUMMARY_VIEW)));
        assert_eq!(
            results.category_by_month,
            Err(EmptyResult::new(CATEGORY_BY_MONTH_VIEW))
        );
        assert!(results.filtered.is_empty());
        assert!(results.category_view.is_empty());
    }

    #[test]
    fn test_summary_latest_change_empty_for_single_month() {
        let t = table(vec![rec("2024-01-01", "Monday", 1.0, 1.0, 0.0)]);
        let results = Aggregator::compute(&t, &FilterSelection::default()).unwrap();
        assert_eq!(
            results.summary.unwrap().latest_month_change,
            Err(EmptyResult::new(MONTH_OVER_MONTH_VIEW))
        );
    }

    // ── category view ─────────────────────────────────────────────────────────

    #[test]
    fn test_all_categories_view_is_daily_total() {
        let t = quarter();
        for sel in [
            select("All", "All", "All Categories"),
            select("February", "All", "All Categories"),
            select("March", "Monday", "All Categories"),
        ] {
            let results = Aggregator::compute(&t, &sel).unwrap();
            assert_eq!(results.value_column, "Daily Total");
            assert_eq!(results.category_view.len(), results.filtered.len());
            for (point, record) in results.category_view.iter().zip(&results.filtered) {
                assert_eq!(point.date, record.date);
                assert_eq!(point.value, record.daily_total);
            }
        }
    }

    #[test]
    fn test_single_category_view() {
        let results = Aggregator::compute(&quarter(), &select("All", "All", "Bills")).unwrap();
        assert_eq!(results.value_column, "Bills");
        let values: Vec<f64> = results.category_view.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![600.0, 200.0, 1000.0, 0.0, 700.0, 0.0]);
    }

    #[test]
    fn test_unknown_category_fails_pass() {
        let err = Aggregator::compute(&quarter(), &select("All", "All", "Travel")).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownCategory(name) if name == "Travel"));
    }

    // ── weekday breakdown ─────────────────────────────────────────────────────

    #[test]
    fn test_weekday_order_follows_source() {
        let t = quarter();
        let days = Aggregator::weekday_breakdown(&t, &MonthFilter::All, ValueSource::DailyTotal).unwrap();
        let labels: Vec<&str> = days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(labels, vec!["Wednesday", "Monday", "Tuesday", "Friday"]);
        assert_eq!(days[1].total, 300.0 + 1200.0 + 900.0);
    }

    #[test]
    fn test_weekday_scope_is_month_only() {
        // The day filter narrows the summary but not this view.
        let results = Aggregator::compute(&quarter(), &select("February", "Monday", "All Categories")).unwrap();
        let days = results.weekday_breakdown.unwrap();
        let labels: Vec<&str> = days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(labels, vec!["Monday", "Tuesday"]);
    }

    #[test]
    fn test_weekday_uses_selected_category() {
        let days = Aggregator::weekday_breakdown(
            &quarter(),
            &MonthFilter::Only("March".into()),
            ValueSource::Category(CategoryId(1)),
        )
        .unwrap();
        assert_eq!(days[0], WeekdaySpend { day: "Monday".into(), total: 200.0 });
        assert_eq!(days[1], WeekdaySpend { day: "Friday".into(), total: 300.0 });
    }

    #[test]
    fn test_weekday_unknown_month_is_empty() {
        let result = Aggregator::weekday_breakdown(
            &quarter(),
            &MonthFilter::Only("July".into()),
            ValueSource::DailyTotal,
        );
        assert_eq!(result, Err(EmptyResult::new(WEEKDAY_VIEW)));
    }

    // ── category by month ─────────────────────────────────────────────────────

    #[test]
    fn test_category_by_month_unfiltered() {
        let results = Aggregator::compute(&quarter(), &FilterSelection::default()).unwrap();
        let stacks = results.category_by_month.unwrap();
        let months: Vec<&str> = stacks.iter().map(|s| s.month.as_str()).collect();
        assert_eq!(months, vec!["January", "February", "March"]);
        assert_eq!(
            stacks[0].amounts,
            vec![
                CategoryAmount { category: "Bills".into(), amount: 800.0 },
                CategoryAmount { category: "Food".into(), amount: 200.0 },
            ]
        );
    }

    #[test]
    fn test_category_by_month_respects_day_filter() {
        let results = Aggregator::compute(&quarter(), &select("All", "Monday", "All Categories")).unwrap();
        let stacks = results.category_by_month.unwrap();
        assert_eq!(stacks.len(), 3);
        assert_eq!(stacks[1].amounts[0].amount, 1000.0);
        assert_eq!(stacks[1].amounts[1].amount, 200.0);
    }

    // ── filter options ────────────────────────────────────────────────────────

    #[test]
    fn test_filter_options() {
        let t = quarter();
        let all = Aggregator::filter_options(&t, &MonthFilter::All);
        assert_eq!(all.months, vec!["All", "January", "February", "March"]);
        assert_eq!(all.days, vec!["All", "Wednesday", "Monday", "Tuesday", "Friday"]);
        assert_eq!(all.categories, vec!["All Categories", "Bills", "Food"]);

        let march = Aggregator::filter_options(&t, &MonthFilter::Only("March".into()));
        assert_eq!(march.days, vec!["All", "Monday", "Friday"]);
    }

    #[test]
    fn test_with_sentinel_prepends_label() {
        let months: FirstSeen = ["May", "April"].into_iter().collect();
        assert_eq!(with_sentinel(ALL, months.iter()), vec!["All", "May", "April"]);
        assert_eq!(with_sentinel(ALL_CATEGORIES, std::iter::empty()), vec!["All Categories"]);
    }

    // ── empty table ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_table_reports_empty_views() {
        let results = Aggregator::compute(&table(vec![]), &FilterSelection::default()).unwrap();
        assert!(results.summary.is_err());
        assert!(results.weekday_breakdown.is_err());
        assert!(results.month_over_month.is_empty());
        assert!(results.category_by_month.is_err());
        assert_eq!(
            results.monthly_totals,
            Err(EmptyResult::new(MONTHLY_TOTALS_VIEW))
        );
        assert_eq!(
            results.recommendation,
            Err(EmptyResult::new(RECOMMENDATION_VIEW))
        );
    }

    #[test]
    fn test_selection_is_echoed() {
        let sel = FilterSelection {
            day: DayFilter::Only("Monday".into()),
            ..Default::default()
        };
        let results = Aggregator::compute(&quarter(), &sel).unwrap();
        assert_eq!(results.selection, sel);
        assert_eq!(results.filtered.len(), 3);
    }
}
