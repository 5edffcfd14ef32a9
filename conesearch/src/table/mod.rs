//! Tabular query results
//!
//! A [`ResultTable`] keeps the column order and raw text cells exactly as
//! the remote service returned them. The column set belongs to the service
//! schema, not to this crate. Projection, terminal rendering and CSV export
//! all operate on this one representation.

use std::io::{self, Write};

use thiserror::Error;

/// Errors raised when manipulating result tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// An ordered table of string cells as returned by a cone search service
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Create an empty table with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the column count.
    pub fn push_row(&mut self, row: Vec<String>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "Row cell count must match column count"
        );
        self.rows.push(row);
    }

    /// Column names, in service order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows as cell slices
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Find the index of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a single column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Reduce the table to the requested columns, in the requested order.
    ///
    /// An empty request returns the table unchanged. Requesting a column
    /// the service did not return is an error, never a silent skip.
    pub fn project(&self, requested: &[String]) -> Result<ResultTable, TableError> {
        if requested.is_empty() {
            return Ok(self.clone());
        }

        let mut indices = Vec::with_capacity(requested.len());
        for name in requested {
            let idx = self
                .column_index(name)
                .ok_or_else(|| TableError::ColumnNotFound(name.clone()))?;
            indices.push(idx);
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(ResultTable {
            columns: requested.to_vec(),
            rows,
        })
    }

    /// Write the table as comma-separated text, header line first
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let header: Vec<String> = self.columns.iter().map(|c| csv_escape(c)).collect();
        writeln!(writer, "{}", header.join(","))?;

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| csv_escape(c)).collect();
            writeln!(writer, "{}", cells.join(","))?;
        }
        Ok(())
    }

    /// Render the table as fixed-width text for the terminal.
    ///
    /// Lines longer than `max_width` are truncated. A footer reports the
    /// row count so an empty result is still visible as such.
    pub fn render(&self, max_width: usize) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let separator = build_separator(&widths);
        let mut out = String::new();
        push_line(&mut out, &separator, max_width);
        push_line(&mut out, &build_row(&self.columns, &widths), max_width);
        push_line(&mut out, &separator, max_width);
        for row in &self.rows {
            push_line(&mut out, &build_row(row, &widths), max_width);
        }
        push_line(&mut out, &separator, max_width);
        push_line(&mut out, &format!("rows: {}", self.rows.len()), max_width);
        out
    }
}

/// Detect the terminal width, falling back to 80 columns when the output
/// is not a terminal
pub fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        s.push_str(&format!(" {:<width$} |", cell, width = w));
    }
    s
}

fn push_line(out: &mut String, line: &str, max_width: usize) {
    match line.char_indices().nth(max_width) {
        Some((idx, _)) => out.push_str(&line[..idx]),
        None => out.push_str(line),
    }
    out.push('\n');
}

/// Quote a cell if it contains a delimiter, quote or newline
fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new(vec![
            "ra".to_string(),
            "dec".to_string(),
            "mag".to_string(),
        ]);
        table.push_row(vec!["10.5".to_string(), "41.2".to_string(), "12.3".to_string()]);
        table.push_row(vec!["10.6".to_string(), "41.3".to_string(), "14.1".to_string()]);
        table.push_row(vec!["10.7".to_string(), "41.1".to_string(), "9.8".to_string()]);
        table
    }

    #[test]
    fn test_project_empty_request_is_identity() {
        let table = sample_table();
        let projected = table.project(&[]).unwrap();
        assert_eq!(projected, table);
    }

    #[test]
    fn test_project_selects_and_reorders() {
        let table = sample_table();
        let projected = table
            .project(&["mag".to_string(), "ra".to_string()])
            .unwrap();

        assert_eq!(projected.columns(), &["mag".to_string(), "ra".to_string()]);
        assert_eq!(projected.len(), 3);

        let first: Vec<&[String]> = projected.rows().collect();
        assert_eq!(first[0], &["12.3".to_string(), "10.5".to_string()]);
        assert_eq!(first[2], &["9.8".to_string(), "10.7".to_string()]);
    }

    #[test]
    fn test_project_missing_column_fails() {
        let table = sample_table();
        let err = table.project(&["parallax".to_string()]).unwrap_err();
        assert_eq!(err, TableError::ColumnNotFound("parallax".to_string()));
    }

    #[test]
    fn test_column_access() {
        let table = sample_table();
        assert_eq!(table.column("dec").unwrap(), vec!["41.2", "41.3", "41.1"]);
        assert!(table.column("nope").is_err());
    }

    #[test]
    fn test_write_csv() {
        let table = sample_table();
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ra,dec,mag");
        assert_eq!(lines[1], "10.5,41.2,12.3");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_write_csv_quotes_delimiters() {
        let mut table = ResultTable::new(vec!["name".to_string(), "note".to_string()]);
        table.push_row(vec!["NGC 224".to_string(), "spiral, barred".to_string()]);

        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().nth(1).unwrap(), "NGC 224,\"spiral, barred\"");
    }

    #[test]
    fn test_render_reports_row_count() {
        let table = sample_table();
        let rendered = table.render(80);
        assert!(rendered.contains("| ra "));
        assert!(rendered.contains("rows: 3"));
    }

    #[test]
    fn test_render_empty_table() {
        let table = ResultTable::new(vec!["ra".to_string()]);
        let rendered = table.render(80);
        assert!(rendered.contains("rows: 0"));
    }

    #[test]
    fn test_render_truncates_to_width() {
        let table = sample_table();
        let rendered = table.render(10);
        assert!(rendered.lines().all(|l| l.len() <= 10));
    }

    #[test]
    #[should_panic(expected = "Row cell count")]
    fn test_push_row_wrong_arity_panics() {
        let mut table = ResultTable::new(vec!["ra".to_string(), "dec".to_string()]);
        table.push_row(vec!["1.0".to_string()]);
    }
}
