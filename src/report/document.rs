//! Renderer-agnostic report document
//!
//! The document is a flat list of blocks (headings, text lines, spacers and
//! bordered tables). Widths are in page units; a renderer decides how a unit
//! maps to its output.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::pipeline::{ImputeMethod, Margin, MarginResult, OutlierMethod, SummaryResult};

/// Title used when none is configured
pub const DEFAULT_TITLE: &str = "Survey Data Processing Report";

/// Usable width for tables
pub const PAGE_WIDTH: f64 = 190.0;

/// Width of full-line text blocks
pub const LINE_WIDTH: f64 = 200.0;

/// Summary table columns are never narrower than this
pub const MIN_COLUMN_WIDTH: f64 = 40.0;

/// Margin table cell widths
pub const MARGIN_VARIABLE_WIDTH: f64 = 100.0;
pub const MARGIN_VALUE_WIDTH: f64 = 90.0;

/// Text shown for values that could not be computed
pub const NOT_AVAILABLE: &str = "NA";

/// Timestamp format used in the metadata block
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

/// A table cell with its width in page units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub width: f64,
    pub bordered: bool,
}

impl Cell {
    pub fn bordered(text: impl Into<String>, width: f64) -> Self {
        Self {
            text: text.into(),
            width,
            bordered: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<Cell>>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String, align: Align, size: u8 },
    Text { text: String },
    Spacer { height: f64 },
    Table(TableBlock),
}

/// Structured facts about the run, also echoed in the metadata block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub dataset: String,
    pub imputation: String,
    pub outlier_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_column: Option<String>,
    pub confidence: f64,
    pub tool_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub metadata: ReportMetadata,
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    /// All tables in document order
    pub fn tables(&self) -> Vec<&TableBlock> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

/// Parameters for creating a ReportDocumentBuilder
pub struct ReportBuilderParams {
    pub title: String,
    pub dataset_name: String,
    pub imputation: ImputeMethod,
    pub outlier_method: OutlierMethod,
    pub generated_at: DateTime<Local>,
}

/// Builder assembling summary and margin results into a [`ReportDocument`]
pub struct ReportDocumentBuilder {
    params: ReportBuilderParams,
    blocks: Vec<Block>,
}

impl ReportDocumentBuilder {
    pub fn new(params: ReportBuilderParams) -> Self {
        Self {
            params,
            blocks: Vec::new(),
        }
    }

    fn heading(&mut self, text: &str, align: Align, size: u8) {
        self.blocks.push(Block::Heading {
            text: text.to_string(),
            align,
            size,
        });
    }

    fn text(&mut self, text: String) {
        self.blocks.push(Block::Text { text });
    }

    fn spacer(&mut self, height: f64) {
        self.blocks.push(Block::Spacer { height });
    }

    pub fn build(mut self, summary: &SummaryResult, margins: &MarginResult) -> ReportDocument {
        let title = self.params.title.clone();
        let generated_at = self.params.generated_at.format(TIMESTAMP_FORMAT).to_string();

        self.heading(&title, Align::Center, 14);

        self.spacer(5.0);
        self.text(format!("Generated on: {}", generated_at));
        self.text(format!("File: {}", self.params.dataset_name));
        self.text(format!(
            "Imputation: {} | Outlier Method: {}",
            self.params.imputation, self.params.outlier_method
        ));
        if let Some(weight) = &summary.weight_column {
            self.text(format!("Weight column: {}", weight));
        }

        self.spacer(10.0);
        self.heading("Summary Statistics", Align::Left, 12);
        self.blocks.push(Block::Table(summary_table(summary)));

        self.spacer(10.0);
        self.heading("Margin of Error", Align::Left, 12);
        self.blocks.push(Block::Table(margin_table(margins)));

        ReportDocument {
            title,
            metadata: ReportMetadata {
                generated_at,
                dataset: self.params.dataset_name,
                imputation: self.params.imputation.to_string(),
                outlier_method: self.params.outlier_method.to_string(),
                weight_column: summary.weight_column.clone(),
                confidence: margins.confidence,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            blocks: self.blocks,
        }
    }
}

/// Width of each column when `column_count` columns share the page.
pub fn column_width(column_count: usize) -> f64 {
    let share = (PAGE_WIDTH / column_count.max(1) as f64).floor();
    share.max(MIN_COLUMN_WIDTH)
}

/// Bordered `Variable | Mean` table with a header row.
pub fn summary_table(summary: &SummaryResult) -> TableBlock {
    let headers = ["Variable", summary.kind.label()];
    let width = column_width(headers.len());

    let header = headers
        .iter()
        .map(|h| Cell::bordered(*h, width))
        .collect();
    let rows = summary
        .means
        .iter()
        .map(|m| {
            let value = m.value.map(format_value).unwrap_or_else(|| NOT_AVAILABLE.to_string());
            vec![
                Cell::bordered(m.variable.clone(), width),
                Cell::bordered(value, width),
            ]
        })
        .collect();

    TableBlock {
        header: Some(header),
        rows,
    }
}

/// Bordered `variable | margin` table; margins have four decimals.
pub fn margin_table(margins: &MarginResult) -> TableBlock {
    let rows = margins
        .margins
        .iter()
        .map(|m| {
            vec![
                Cell::bordered(m.variable.clone(), MARGIN_VARIABLE_WIDTH),
                Cell::bordered(format_margin(m.margin), MARGIN_VALUE_WIDTH),
            ]
        })
        .collect();

    TableBlock { header: None, rows }
}

/// Shortest round-trip form, keeping a `.0` on integral values (`10.0`, `2.5`).
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub fn format_margin(margin: Margin) -> String {
    match margin {
        Margin::Defined(v) => format!("{:.4}", v),
        Margin::Undefined => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ColumnMargin, ColumnMean, SummaryKind};
    use chrono::TimeZone;

    fn create_test_builder() -> ReportDocumentBuilder {
        ReportDocumentBuilder::new(ReportBuilderParams {
            title: DEFAULT_TITLE.to_string(),
            dataset_name: "survey.csv".to_string(),
            imputation: ImputeMethod::Median,
            outlier_method: OutlierMethod::Iqr,
            generated_at: Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap(),
        })
    }

    fn summary() -> SummaryResult {
        SummaryResult {
            kind: SummaryKind::Mean,
            weight_column: None,
            means: vec![
                ColumnMean {
                    variable: "age".to_string(),
                    value: Some(41.25),
                },
                ColumnMean {
                    variable: "income".to_string(),
                    value: None,
                },
            ],
        }
    }

    fn margins() -> MarginResult {
        MarginResult {
            confidence: 0.95,
            margins: vec![
                ColumnMargin {
                    variable: "age".to_string(),
                    margin: Margin::Defined(1.963243161),
                },
                ColumnMargin {
                    variable: "income".to_string(),
                    margin: Margin::Undefined,
                },
            ],
        }
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(2), 95.0);
        assert_eq!(column_width(5), 40.0);
        assert_eq!(column_width(6), 40.0);
        assert_eq!(column_width(0), 190.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(10.0), "10.0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_margin() {
        assert_eq!(format_margin(Margin::Defined(1.963243161)), "1.9632");
        assert_eq!(format_margin(Margin::Defined(0.0)), "0.0000");
        assert_eq!(format_margin(Margin::Undefined), "NA");
    }

    #[test]
    fn test_metadata_block() {
        let doc = create_test_builder().build(&summary(), &margins());
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.metadata.generated_at, "2024-03-05 14:07:09");
        assert_eq!(doc.metadata.imputation, "Median");
        assert_eq!(doc.metadata.outlier_method, "IQR");

        let texts: Vec<&str> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Generated on: 2024-03-05 14:07:09",
                "File: survey.csv",
                "Imputation: Median | Outlier Method: IQR",
            ]
        );
    }

    #[test]
    fn test_summary_table() {
        let doc = create_test_builder().build(&summary(), &margins());
        let tables = doc.tables();
        assert_eq!(tables.len(), 2);

        let summary_table = tables[0];
        let header = summary_table.header.as_ref().unwrap();
        assert_eq!(header[0].text, "Variable");
        assert_eq!(header[1].text, "Mean");
        assert!(header.iter().all(|c| c.width == 95.0 && c.bordered));
        assert_eq!(summary_table.rows[0][1].text, "41.25");
        assert_eq!(summary_table.rows[1][1].text, "NA");
    }

    #[test]
    fn test_margin_table() {
        let doc = create_test_builder().build(&summary(), &margins());
        let margin_table = doc.tables()[1];
        assert!(margin_table.header.is_none());
        assert_eq!(margin_table.rows[0][0].width, MARGIN_VARIABLE_WIDTH);
        assert_eq!(margin_table.rows[0][1].width, MARGIN_VALUE_WIDTH);
        assert_eq!(margin_table.rows[0][1].text, "1.9632");
        assert_eq!(margin_table.rows[1][1].text, "NA");
    }

    #[test]
    fn test_weighted_summary_header_and_weight_line() {
        let mut weighted = summary();
        weighted.kind = SummaryKind::WeightedMean;
        weighted.weight_column = Some("wt".to_string());

        let doc = create_test_builder().build(&weighted, &margins());
        assert_eq!(doc.tables()[0].header.as_ref().unwrap()[1].text, "Weighted Mean");
        assert_eq!(doc.metadata.weight_column.as_deref(), Some("wt"));
        assert!(doc
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Text { text } if text == "Weight column: wt")));
    }

    #[test]
    fn test_document_serializes_to_json() {
        let doc = create_test_builder().build(&summary(), &margins());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["blocks"][0]["kind"], "heading");
        assert_eq!(json["metadata"]["dataset"], "survey.csv");
    }
}
