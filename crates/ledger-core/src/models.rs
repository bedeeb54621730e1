use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Column names ──────────────────────────────────────────────────────────────

pub const DATE: &str = "Date";
pub const DAY: &str = "Day";
pub const DAILY_TOTAL: &str = "Daily Total";
pub const MONTH: &str = "Month";
pub const INCOME: &str = "Income";
pub const INCOME_SOURCE: &str = "Income Source";

/// Columns with fixed meaning. Everything else is either a spending category
/// or free text.
pub const RESERVED_COLUMNS: [&str; 6] = [DATE, DAY, DAILY_TOTAL, MONTH, INCOME, INCOME_SOURCE];

/// `true` when `name` is one of [`RESERVED_COLUMNS`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_COLUMNS.contains(&name)
}

/// Sentinel for "no month / day restriction".
pub const ALL: &str = "All";

/// Sentinel for "use Daily Total rather than a single category".
pub const ALL_CATEGORIES: &str = "All Categories";

// ── RawTable ──────────────────────────────────────────────────────────────────

/// Delimited input exactly as read: a header row plus string cells.
///
/// Every row has exactly `headers.len()` cells; ragged input is padded with
/// empty cells or truncated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Categories ────────────────────────────────────────────────────────────────

/// Position of a category inside a [`CategorySet`] and inside every
/// [`ExpenseRecord::categories`] vector of the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub usize);

/// Spending categories discovered from the input columns, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Look up a category by its column name.
    pub fn id_of(&self, name: &str) -> Option<CategoryId> {
        self.names.iter().position(|n| n == name).map(CategoryId)
    }

    pub fn name(&self, id: CategoryId) -> &str {
        &self.names[id.0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(id, name)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (CategoryId(i), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ── Canonical table ───────────────────────────────────────────────────────────

/// Meaning of one column of the canonical table, in input order.
///
/// The derived `Month` column is not part of the layout; it always follows the
/// layout when the table is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Date,
    Day,
    DailyTotal,
    Income,
    Category(CategoryId),
    /// Index into [`CanonicalTable::text_columns`].
    Text(usize),
}

/// One day of the ledger after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    /// Weekday label as written in the input, trimmed.
    pub day: String,
    /// English month name derived from `date`.
    pub month: String,
    pub daily_total: f64,
    pub income: f64,
    /// Amounts per category, indexed by [`CategoryId`].
    pub categories: Vec<f64>,
    /// Free-text cells, indexed like [`CanonicalTable::text_columns`].
    pub text: Vec<String>,
}

impl ExpenseRecord {
    pub fn category(&self, id: CategoryId) -> f64 {
        self.categories[id.0]
    }
}

/// The normalized ledger every aggregate is computed from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalTable {
    /// Column layout, in input order, without artifact columns.
    pub layout: Vec<Column>,
    pub categories: CategorySet,
    /// Names of the non-numeric columns (including `Income Source`).
    pub text_columns: Vec<String>,
    pub records: Vec<ExpenseRecord>,
}

impl CanonicalTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest date in the table.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// Header name for a layout column.
    pub fn column_name(&self, column: Column) -> &str {
        match column {
            Column::Date => DATE,
            Column::Day => DAY,
            Column::DailyTotal => DAILY_TOTAL,
            Column::Income => INCOME,
            Column::Category(id) => self.categories.name(id),
            Column::Text(i) => &self.text_columns[i],
        }
    }

    /// Render the table back into raw string cells.
    ///
    /// Dates are written as ISO `YYYY-MM-DD`, numbers in their shortest
    /// round-trip form, and the derived `Month` column is appended last.
    /// Normalizing the result yields this table again.
    pub fn to_raw_table(&self) -> RawTable {
        let mut headers: Vec<String> = self
            .layout
            .iter()
            .map(|c| self.column_name(*c).to_string())
            .collect();
        headers.push(MONTH.to_string());

        let rows = self
            .records
            .iter()
            .map(|record| {
                let mut row: Vec<String> = self
                    .layout
                    .iter()
                    .map(|column| match *column {
                        Column::Date => record.date.format("%Y-%m-%d").to_string(),
                        Column::Day => record.day.clone(),
                        Column::DailyTotal => record.daily_total.to_string(),
                        Column::Income => record.income.to_string(),
                        Column::Category(id) => record.category(id).to_string(),
                        Column::Text(i) => record.text[i].clone(),
                    })
                    .collect();
                row.push(record.month.clone());
                row
            })
            .collect();

        RawTable::new(headers, rows)
    }
}

// ── Filter selection ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthFilter {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayFilter {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Read `Daily Total`.
    #[default]
    AllCategories,
    /// Read this category's column in place of `Daily Total`.
    Only(String),
}

/// The `(month, day, category)` triple narrowing which rows and which column
/// feed the aggregates. Immutable; every view is a function of the table and
/// this value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub month: MonthFilter,
    pub day: DayFilter,
    pub category: CategoryFilter,
}

impl FilterSelection {
    /// Build a selection from user-facing labels, recognising the `"All"` and
    /// `"All Categories"` sentinels.
    pub fn from_labels(month: &str, day: &str, category: &str) -> Self {
        let month = month.trim();
        let day = day.trim();
        let category = category.trim();
        Self {
            month: if month.is_empty() || month == ALL {
                MonthFilter::All
            } else {
                MonthFilter::Only(month.to_string())
            },
            day: if day.is_empty() || day == ALL {
                DayFilter::All
            } else {
                DayFilter::Only(day.to_string())
            },
            category: if category.is_empty() || category == ALL_CATEGORIES {
                CategoryFilter::AllCategories
            } else {
                CategoryFilter::Only(category.to_string())
            },
        }
    }

    /// `true` when `record` passes the month filter.
    pub fn matches_month(&self, record: &ExpenseRecord) -> bool {
        match &self.month {
            MonthFilter::All => true,
            MonthFilter::Only(m) => record.month == *m,
        }
    }

    /// `true` when `record` passes the month filter and then the day filter.
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        self.matches_month(record)
            && match &self.day {
                DayFilter::All => true,
                DayFilter::Only(d) => record.day == *d,
            }
    }

    pub fn month_label(&self) -> &str {
        match &self.month {
            MonthFilter::All => ALL,
            MonthFilter::Only(m) => m,
        }
    }

    pub fn day_label(&self) -> &str {
        match &self.day {
            DayFilter::All => ALL,
            DayFilter::Only(d) => d,
        }
    }

    pub fn category_label(&self) -> &str {
        match &self.category {
            CategoryFilter::AllCategories => ALL_CATEGORIES,
            CategoryFilter::Only(c) => c,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
