//! Text and JSON rendering of an [`Analysis`].

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use ledger_core::error::{Aggregate, EmptyResult, Result};
use ledger_core::formatting::{format_currency, format_percent};
use ledger_data::analysis::Analysis;

/// Placeholder for a percent change with a zero base.
const UNDEFINED: &str = "n/a";

// ── Text table ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Column-aligned plain-text table. Widths are measured in terminal cells so
/// currency symbols such as `₹` line up.
struct TextTable {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
    /// Rows printed below a rule, e.g. mean and median.
    footer: Vec<Vec<String>>,
}

impl TextTable {
    /// First column left-aligned, the rest right-aligned.
    fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = (0..headers.len())
            .map(|i| if i == 0 { Align::Left } else { Align::Right })
            .collect();
        Self {
            headers,
            align,
            rows: Vec::new(),
            footer: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn footer(&mut self, cells: Vec<String>) {
        self.footer.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in self.rows.iter().chain(&self.footer) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }

    fn render_line(&self, out: &mut String, cells: &[String], widths: &[usize]) {
        let mut line = String::from("  ");
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let pad = " ".repeat(width.saturating_sub(cell.width()));
            match self.align[i] {
                Align::Left => {
                    line.push_str(cell);
                    line.push_str(&pad);
                }
                Align::Right => {
                    line.push_str(&pad);
                    line.push_str(cell);
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    fn render(&self, out: &mut String) {
        let widths = self.widths();
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let rule = format!("  {}\n", "─".repeat(rule_width));

        self.render_line(out, &self.headers, &widths);
        out.push_str(&rule);
        for row in &self.rows {
            self.render_line(out, row, &widths);
        }
        if !self.footer.is_empty() {
            out.push_str(&rule);
            for row in &self.footer {
                self.render_line(out, row, &widths);
            }
        }
    }
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Render `analysis` as a pretty-printed JSON document.
///
/// Views without data appear as `{"status": "empty", "view": ...}`.
pub fn render_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Render `analysis` as plain text: scalar metrics followed by the five
/// result tables. Views without data print a "no data" line.
pub fn render_text(analysis: &Analysis, currency: &str) -> String {
    let results = &analysis.results;
    let meta = &analysis.metadata;
    let money = |v: f64| format_currency(v, currency);
    let mut out = String::new();

    let _ = writeln!(out, "Expense Dashboard");
    let _ = writeln!(
        out,
        "Source: {} ({} of {} rows kept)",
        meta.source.display(),
        meta.rows_kept,
        meta.rows_read
    );
    let _ = writeln!(
        out,
        "Filters: month={}  day={}  category={}",
        results.selection.month_label(),
        results.selection.day_label(),
        results.selection.category_label()
    );
    let _ = writeln!(out, "Months: {}", results.options.months.join(", "));
    let _ = writeln!(out, "Days: {}", results.options.days.join(", "));
    let _ = writeln!(out, "Categories: {}", results.options.categories.join(", "));

    // ── Metrics ────────────────────────────────────────────────────────────
    section(&mut out, "Summary");
    match &results.summary {
        Ok(summary) => {
            let mut table = TextTable::new(["Metric", "Value"]);
            table.row(vec!["Total Spending".into(), money(summary.total_spending)]);
            table.row(vec![
                "Average Daily Spending".into(),
                money(summary.average_spending),
            ]);
            table.row(vec!["Max Spending".into(), money(summary.max_spending)]);
            table.row(vec!["Total Income".into(), money(summary.total_income)]);
            table.row(vec![
                "Month-over-Month Change".into(),
                match &summary.latest_month_change {
                    Ok(change) => format!("{} ({})", percent(change.percent_change), change.month),
                    Err(_) => UNDEFINED.to_string(),
                },
            ]);
            table.render(&mut out);
        }
        Err(empty) => no_data(&mut out, empty),
    }

    section(&mut out, "Recommended Spending Limit");
    match &results.recommendation {
        Ok(rec) => {
            let _ = writeln!(out, "  {} for {}", money(rec.limit), rec.period);
        }
        Err(empty) => no_data(&mut out, empty),
    }

    // ── Tables ─────────────────────────────────────────────────────────────
    section(
        &mut out,
        &format!("Spending over Time ({})", results.value_column),
    );
    if results.category_view.is_empty() {
        no_data(&mut out, &EmptyResult::new("spending_over_time"));
    } else {
        let mut table = TextTable::new(["Date", results.value_column.as_str()]);
        for point in &results.category_view {
            table.row(vec![point.date.format("%d/%m/%Y").to_string(), money(point.value)]);
        }
        table.render(&mut out);
    }

    section(&mut out, "Spending by Weekday");
    render_view(&mut out, &results.weekday_breakdown, |days| {
        let mut table = TextTable::new(["Day", "Total"]);
        for d in days {
            table.row(vec![d.day.clone(), money(d.total)]);
        }
        table
    });

    section(&mut out, "Month-over-Month Change");
    if results.month_over_month.is_empty() {
        no_data(&mut out, &EmptyResult::new("month_over_month"));
    } else {
        let mut table = TextTable::new(["Month", "Total", "Change"]);
        for m in &results.month_over_month {
            table.row(vec![m.month.clone(), money(m.total), percent(m.percent_change)]);
        }
        table.render(&mut out);
    }

    section(&mut out, "Category Spending by Month");
    render_view(&mut out, &results.category_by_month, |months| {
        let categories: Vec<String> = months
            .first()
            .map(|m| m.amounts.iter().map(|a| a.category.clone()).collect())
            .unwrap_or_else(Vec::new);
        let mut table = TextTable::new(std::iter::once("Month".to_string()).chain(categories));
        for m in months {
            let mut cells = vec![m.month.clone()];
            cells.extend(m.amounts.iter().map(|a| money(a.amount)));
            table.row(cells);
        }
        table
    });

    section(&mut out, "Monthly Spending");
    render_view(&mut out, &results.monthly_totals, |totals| {
        let mut table = TextTable::new(["Month", "Total"]);
        for m in &totals.months {
            table.row(vec![m.month.clone(), money(m.total)]);
        }
        table.footer(vec!["Mean".into(), money(totals.mean)]);
        table.footer(vec!["Median".into(), money(totals.median)]);
        table
    });

    out
}

// ── Internal helpers ───────────────────────────────────────────────────────────

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
}

fn no_data(out: &mut String, empty: &EmptyResult) {
    let _ = writeln!(out, "  No data available ({})", empty.view);
}

fn percent(change: Option<f64>) -> String {
    change.map_or_else(|| UNDEFINED.to_string(), format_percent)
}

fn render_view<T>(out: &mut String, view: &Aggregate<T>, build: impl FnOnce(&T) -> TextTable) {
    match view {
        Ok(value) => build(value).render(out),
        Err(empty) => no_data(out, empty),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
