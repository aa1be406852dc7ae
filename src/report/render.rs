//! Rendering report documents
//!
//! [`DocumentRenderer`] is the seam between the document model and an output
//! format. [`TextRenderer`] produces a plain-text report with boxed tables.

use super::document::{Align, Block, Cell, ReportDocument, LINE_WIDTH};

/// Output format driven by [`render_document`]
pub trait DocumentRenderer {
    /// Write a full line of text.
    fn write_line(&mut self, text: &str, align: Align);

    /// Append a cell of the given width to the current row.
    fn write_cell(&mut self, text: &str, width: f64, bordered: bool);

    /// Finish the current row; on an empty row this emits a blank line.
    fn next_line(&mut self);

    /// Serialize everything written so far.
    fn finish(self) -> Vec<u8>;
}

/// Drive a renderer over every block of the document and return its bytes.
pub fn render_document<R: DocumentRenderer>(doc: &ReportDocument, mut renderer: R) -> Vec<u8> {
    for block in &doc.blocks {
        match block {
            Block::Heading { text, align, .. } => renderer.write_line(text, *align),
            Block::Text { text } => renderer.write_line(text, Align::Left),
            Block::Spacer { .. } => renderer.next_line(),
            Block::Table(table) => {
                let rows = table.header.iter().chain(table.rows.iter());
                for row in rows {
                    write_row(&mut renderer, row);
                }
            }
        }
    }
    renderer.finish()
}

fn write_row<R: DocumentRenderer>(renderer: &mut R, row: &[Cell]) {
    for cell in row {
        renderer.write_cell(&cell.text, cell.width, cell.bordered);
    }
    renderer.next_line();
}

/// Page units per output character
const UNITS_PER_CHAR: f64 = 2.0;

/// Plain-text renderer; a bordered row is boxed with `+---+` rules
#[derive(Debug, Default)]
pub struct TextRenderer {
    lines: Vec<String>,
    row: String,
    row_widths: Vec<usize>,
    row_bordered: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_width(width: f64) -> usize {
        ((width / UNITS_PER_CHAR).round() as usize).max(4)
    }

    fn rule(widths: &[usize]) -> String {
        let mut rule: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w - 1)))
            .collect();
        rule.push('+');
        rule
    }

    fn flush_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        let widths = std::mem::take(&mut self.row_widths);

        if self.row_bordered {
            let rule = Self::rule(&widths);
            if self.lines.last() != Some(&rule) {
                self.lines.push(rule.clone());
            }
            self.lines.push(format!("{}|", row));
            self.lines.push(rule);
        } else {
            self.lines.push(row.trim_end().to_string());
        }
        self.row_bordered = false;
    }
}

impl DocumentRenderer for TextRenderer {
    fn write_line(&mut self, text: &str, align: Align) {
        if !self.row.is_empty() {
            self.flush_row();
        }
        let line = match align {
            Align::Left => text.to_string(),
            Align::Center => {
                let width = Self::char_width(LINE_WIDTH);
                let len = text.chars().count();
                let pad = width.saturating_sub(len) / 2;
                format!("{}{}", " ".repeat(pad), text)
            }
        };
        self.lines.push(line);
    }

    fn write_cell(&mut self, text: &str, width: f64, bordered: bool) {
        let chars = Self::char_width(width);
        if bordered {
            let inner = chars - 3;
            let text = fit(text, inner);
            self.row.push_str(&format!("| {:<inner$} ", text, inner = inner));
            self.row_bordered = true;
        } else {
            let text = fit(text, chars);
            self.row.push_str(&format!("{:<chars$}", text, chars = chars));
        }
        self.row_widths.push(chars);
    }

    fn next_line(&mut self) {
        if self.row.is_empty() {
            self.lines.push(String::new());
        } else {
            self.flush_row();
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if !self.row.is_empty() {
            self.flush_row();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out.into_bytes()
    }
}

/// Cut text to at most `max` characters.
fn fit(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
