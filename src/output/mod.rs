//! Human-readable tables generated from a [`Session`](crate::core::session::Session).
//!
//! - **summary**: every cluster of every organism, with one row per hit
//! - **binary**: one row per cluster, one column per query, counting the
//!   cluster's subjects hit by that query
//!
//! Without a delimiter, columns are padded to a common width; with one, cells
//! are joined by it (e.g. `,` for CSV or `\t` for TSV).

pub mod binary;
pub mod summary;

pub use binary::binary;
pub use summary::summary;

/// Kind of table produced by `Session::format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Summary,
    Binary,
}

impl TableKind {
    /// Parse a table kind from its exact (lowercase) name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "summary" => Some(Self::Summary),
            "binary" => Some(Self::Binary),
            _ => None,
        }
    }
}

/// Display options shared by both tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Decimal places for scores
    pub decimals: u32,
    /// Omit column header rows
    pub hide_headers: bool,
    /// Cell delimiter; columns are space-aligned when unset
    pub delimiter: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimals: 4,
            hide_headers: false,
            delimiter: None,
        }
    }
}

/// Gap between aligned columns
const COLUMN_GAP: &str = "  ";

/// Render rows either joined by `delimiter` or padded into aligned columns
pub(crate) fn render_table(rows: &[Vec<String>], delimiter: Option<&str>) -> String {
    if let Some(delimiter) = delimiter {
        return rows
            .iter()
            .map(|row| row.join(delimiter))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
