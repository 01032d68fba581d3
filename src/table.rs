//! Tabular data shaping and table options.
//!
//! [`TableData`] is a plain grid of strings. Whether the first row is drawn as
//! a header band is decided by the [`TableStyle`](crate::TableStyle) at draw
//! time, so the same data renders with or without a header.

use crate::error::DocumentError;
use crate::text::approx_text_width;
use crate::TableStyle;
use serde_json::Value;

/// Horizontal padding inside each cell, both sides, in points.
pub(crate) const CELL_PADDING: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Build from rows of displayable values.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: ToString,
    {
        TableData {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    /// Build from a JSON array of flat objects. Keys become the first row;
    /// each record contributes one data row.
    ///
    /// JSON object key order is not reliable, so columns are sorted by key.
    /// Use [`TableData::from_rows`] when column order matters.
    pub fn from_records(records: &Value) -> Result<Self, DocumentError> {
        let items = records
            .as_array()
            .ok_or_else(|| DocumentError::InvalidTable("records must be a JSON array".into()))?;
        let first = items
            .first()
            .and_then(|v| v.as_object())
            .ok_or_else(|| {
                DocumentError::InvalidTable("records must be a non-empty array of objects".into())
            })?;

        let mut columns: Vec<String> = first.keys().cloned().collect();
        columns.sort();

        let mut rows = Vec::with_capacity(items.len() + 1);
        rows.push(columns.clone());

        for item in items {
            let obj = item.as_object().ok_or_else(|| {
                DocumentError::InvalidTable("every record must be a JSON object".into())
            })?;
            let row = columns
                .iter()
                .map(|key| match obj.get(key) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    _ => String::new(),
                })
                .collect();
            rows.push(row);
        }

        Ok(TableData { rows })
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Reject empty tables and ragged rows.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.rows.is_empty() {
            return Err(DocumentError::InvalidTable("table has no rows".into()));
        }
        let cols = self.column_count();
        if cols == 0 {
            return Err(DocumentError::InvalidTable("table has no columns".into()));
        }
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != cols {
                return Err(DocumentError::InvalidTable(format!(
                    "row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    cols
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnWidths {
    /// Size each column to its widest cell, scaled down to the content width
    /// when the total overflows.
    Auto,
    /// Divide the content width evenly.
    Uniform,
    /// Explicit widths in points, one per column.
    Fixed(Vec<f32>),
}

impl Default for ColumnWidths {
    fn default() -> Self {
        ColumnWidths::Auto
    }
}

impl ColumnWidths {
    pub(crate) fn resolve(
        &self,
        data: &TableData,
        style: &TableStyle,
        content_width: f32,
    ) -> Result<Vec<f32>, DocumentError> {
        let cols = data.column_count();
        match self {
            ColumnWidths::Uniform => Ok(vec![content_width / cols as f32; cols]),
            ColumnWidths::Fixed(widths) => {
                if widths.len() != cols {
                    return Err(DocumentError::InvalidTable(format!(
                        "{} column widths given for {} columns",
                        widths.len(),
                        cols
                    )));
                }
                if widths.iter().any(|w| *w <= 0.0) {
                    return Err(DocumentError::InvalidTable(
                        "column widths must be positive".into(),
                    ));
                }
                Ok(widths.clone())
            }
            ColumnWidths::Auto => {
                let mut widths = vec![0.0_f32; cols];
                for row in &data.rows {
                    for (i, cell) in row.iter().enumerate() {
                        let w = approx_text_width(cell, style.size) + 2.0 * CELL_PADDING;
                        widths[i] = widths[i].max(w);
                    }
                }
                let total: f32 = widths.iter().sum();
                if total > content_width {
                    let scale = content_width / total;
                    for w in &mut widths {
                        *w *= scale;
                    }
                }
                Ok(widths)
            }
        }
    }
}

/// Table placement on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePosition {
    /// Centered between the page edges.
    Center,
    /// Flush with the left margin.
    Default,
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub widths: ColumnWidths,
    /// Name of a registered table style.
    pub style: String,
    pub position: TablePosition,
    /// Wrap cell text to fit the column. When off, cells are a single line.
    pub wrap: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            widths: ColumnWidths::Auto,
            style: "table".to_string(),
            position: TablePosition::Center,
            wrap: true,
        }
    }
}

impl TableOptions {
    pub fn with_style(mut self, name: impl Into<String>) -> Self {
        self.style = name.into();
        self
    }

    pub fn with_widths(mut self, widths: ColumnWidths) -> Self {
        self.widths = widths;
        self
    }

    pub fn with_position(mut self, position: TablePosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}
