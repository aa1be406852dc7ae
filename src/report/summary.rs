//! Terminal summary of a cleaning and summarizing run

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use polars::prelude::{DataFrame, DataType, PolarsResult};

use crate::pipeline::{ColumnDescription, ColumnStats, MarginResult, OutlierReport, SummaryResult};
use crate::utils::format_confidence;

use super::document::{format_margin, format_value, NOT_AVAILABLE};

/// Summary of one run, displayed once the report is written
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_after_cleaning: usize,
    pub columns: usize,
    pub missing_before: usize,
    pub missing_after_imputation: usize,
    pub outliers: OutlierReport,
    pub weight_fallback: Option<String>,
}

impl RunSummary {
    pub fn new(rows_loaded: usize, columns: usize) -> Self {
        Self {
            rows_loaded,
            rows_after_cleaning: rows_loaded,
            columns,
            ..Default::default()
        }
    }

    pub fn set_missing(&mut self, before: usize, after_imputation: usize) {
        self.missing_before = before;
        self.missing_after_imputation = after_imputation;
    }

    pub fn set_outliers(&mut self, report: OutlierReport) {
        self.rows_after_cleaning = report.final_rows;
        self.outliers = report;
    }

    /// Share of loaded rows removed by outlier filtering, in percent
    pub fn removal_pct(&self) -> f64 {
        if self.rows_loaded > 0 {
            ((self.rows_loaded - self.rows_after_cleaning) as f64 / self.rows_loaded as f64)
                * 100.0
        } else {
            0.0
        }
    }

    /// Table of run counts
    pub fn overview_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Loaded"), Cell::new(self.rows_loaded)]);
        table.add_row(vec![Cell::new("📐 Columns"), Cell::new(self.columns)]);
        table.add_row(vec![
            Cell::new("🕳️  Missing (before)"),
            Cell::new(self.missing_before).fg(if self.missing_before == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Missing (after imputation)"),
            Cell::new(self.missing_after_imputation),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Rows Removed (outliers)"),
            Cell::new(self.outliers.total_removed()).fg(
                if self.outliers.total_removed() == 0 {
                    Color::White
                } else {
                    Color::Red
                },
            ),
        ]);
        table.add_row(vec![
            Cell::new("✅ Rows Kept"),
            Cell::new(self.rows_after_cleaning)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("📉 Removed"),
            Cell::new(format!("{:.1}%", self.removal_pct())).fg(Color::Cyan),
        ]);

        table
    }

    pub fn display(&self, summary: &SummaryResult, margins: &MarginResult) {
        print_section("📋", "RUN SUMMARY");
        print_indented(&self.overview_table());

        if let Some(reason) = &self.weight_fallback {
            println!();
            println!(
                "    {} {}",
                style("Weights ignored:").yellow(),
                style(reason).dim()
            );
        }

        let removing: Vec<_> = self
            .outliers
            .columns
            .iter()
            .filter(|c| c.rows_removed > 0)
            .collect();
        if !removing.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Outlier Removals").yellow(),
                style(format!("({})", removing.len())).dim()
            );
            for removal in removing {
                println!(
                    "        {} {} {}",
                    style("•").dim(),
                    removal.column,
                    style(format!("-{} of {}", removal.rows_removed, removal.rows_before)).dim()
                );
            }
        }

        print_section("📊", "STATISTICS");
        print_indented(&results_table(summary, margins));
    }
}

/// One row per variable with its mean and margin of error
pub fn results_table(summary: &SummaryResult, margins: &MarginResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Variable").add_attribute(Attribute::Bold),
        Cell::new(summary.kind.label()).add_attribute(Attribute::Bold),
        Cell::new(format!("Margin ({})", format_confidence(margins.confidence)))
            .add_attribute(Attribute::Bold),
    ]);

    for mean in &summary.means {
        let value = mean
            .value
            .map(format_value)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let margin = margins
            .get(&mean.variable)
            .map(format_margin)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        table.add_row(vec![
            Cell::new(&mean.variable),
            Cell::new(value).set_alignment(CellAlignment::Right),
            Cell::new(margin).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Rows shown by the data previews
pub const PREVIEW_ROWS: usize = 5;

/// One row per column with its descriptive statistics. Cells that do not
/// apply to the column kind stay blank.
pub fn describe_table(descriptions: &[ColumnDescription]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        [
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max", "unique", "top",
            "freq",
        ]
        .into_iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    for desc in descriptions {
        let mut row = vec![Cell::new(&desc.column)];
        match &desc.stats {
            ColumnStats::Numeric(stats) => {
                row.push(Cell::new(stats.count).set_alignment(CellAlignment::Right));
                for value in [
                    stats.mean, stats.std, stats.min, stats.q25, stats.q50, stats.q75, stats.max,
                ] {
                    row.push(Cell::new(format_stat(value)).set_alignment(CellAlignment::Right));
                }
                row.extend([Cell::new(""), Cell::new(""), Cell::new("")]);
            }
            ColumnStats::Categorical(stats) => {
                row.push(Cell::new(stats.count).set_alignment(CellAlignment::Right));
                row.extend((0..7).map(|_| Cell::new("")));
                row.push(Cell::new(stats.unique).set_alignment(CellAlignment::Right));
                row.push(Cell::new(stats.top.as_deref().unwrap_or(NOT_AVAILABLE)));
                row.push(Cell::new(stats.freq).set_alignment(CellAlignment::Right));
            }
        }
        table.add_row(row);
    }

    table
}

/// First `rows` rows of the table, every value shown as text
pub fn preview_table(df: &DataFrame, rows: usize) -> PolarsResult<Table> {
    let head = df.head(Some(rows));

    let mut columns: Vec<Vec<String>> = Vec::with_capacity(head.width());
    for column in head.get_columns() {
        // Nested values have no text form; show their type instead
        let Ok(text) = column.cast(&DataType::String) else {
            columns.push(vec![format!("<{}>", column.dtype()); head.height()]);
            continue;
        };
        let values = text
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or("null").to_string())
            .collect();
        columns.push(values);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        head.get_column_names()
            .into_iter()
            .map(|name| Cell::new(name.as_str()).add_attribute(Attribute::Bold)),
    );
    for i in 0..head.height() {
        table.add_row(columns.iter().map(|values| Cell::new(&values[i])));
    }

    Ok(table)
}

/// Print the descriptive statistics section
pub fn display_description(descriptions: &[ColumnDescription]) {
    print_section("🔎", "DESCRIPTIVE STATISTICS");
    print_indented(&describe_table(descriptions));
}

/// Print the first rows of a table under the given title
pub fn display_preview(title: &str, df: &DataFrame) -> PolarsResult<()> {
    let table = preview_table(df, PREVIEW_ROWS)?;
    print_section("👀", title);
    print_indented(&table);
    Ok(())
}

fn format_stat(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
