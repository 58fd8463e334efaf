use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell as it came out of the spreadsheet loader
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Empty,
}

impl RawValue {
    /// Numeric reading of the cell. Unparsable text and NaN read as absent.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Empty => return None,
        };
        if value.is_nan() { None } else { Some(value) }
    }

    /// Trimmed text reading of the cell; blank cells read as absent
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawValue::Number(n) if n.is_nan() => None,
            RawValue::Number(n) => Some(format_number(*n)),
            RawValue::Empty => None,
        }
    }
}

/// Renders integral values without a fractional part (3.0 becomes "3")
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

static EMPTY_CELL: RawValue = RawValue::Empty;

/// Loosely structured table handed over by the loader
///
/// Headers are the original column names, untouched. Rows may be shorter than
/// the header row; missing trailing cells read as `RawValue::Empty`.
#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        RawTable {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
    }

    /// Borrowed views over the rows, in input order
    pub fn iter_rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |cells| RowView {
            headers: &self.headers,
            cells,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of a `RawTable`, addressable by original column name
#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    headers: &'a [String],
    cells: &'a [RawValue],
}

impl<'a> RowView<'a> {
    pub fn new(headers: &'a [String], cells: &'a [RawValue]) -> Self {
        RowView { headers, cells }
    }

    /// Cell under the named column; repeated names resolve to the last one
    pub fn get(&self, column: &str) -> &'a RawValue {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// Qualitative risk bucket attached to each canonical record
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Low,
    Medium,
    High,
    Unknown,
    /// An explicit classification cell that is none of the canonical names
    Labeled(String),
}

impl Classification {
    /// Reads an explicit classification cell: trimmed and title-cased, with the
    /// canonical names recognised case-insensitively and blanks as `Unknown`.
    pub fn from_label(raw: &str) -> Self {
        let label = title_case(raw.trim());
        match label.as_str() {
            "" => Classification::Unknown,
            "Low" => Classification::Low,
            "Medium" => Classification::Medium,
            "High" => Classification::High,
            "Unknown" => Classification::Unknown,
            _ => Classification::Labeled(label),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Classification::Low => "Low",
            Classification::Medium => "Medium",
            Classification::High => "High",
            Classification::Unknown => "Unknown",
            Classification::Labeled(label) => label,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One normalized, role-mapped input row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub area: String,
    pub activity: Option<String>,
    pub hazard: Option<String>,
    pub probability: Option<f64>,
    pub severity: Option<f64>,
    pub risk_score: Option<f64>,
    pub classification: Classification,
}

/// Title-cases text the way the dashboards did: a letter is upper-cased when
/// the character before it is not a letter, lower-cased otherwise.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
