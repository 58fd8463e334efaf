use crate::record::{RawTable, RawValue};
use log::info;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Load a risk table from a CSV file
///
/// The first non-blank record is the header row. Cells that parse as numbers
/// become `RawValue::Number`, blank cells become `RawValue::Empty`, anything
/// else is kept as text.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<RawTable, Box<dyn Error>>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use riskboard::loader::from_csv;
///
/// match from_csv("matriz_riesgos.csv") {
///     Ok(table) => println!("Loaded {} rows", table.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<RawTable, Box<dyn Error>> {
    let content = fs::read_to_string(filepath)?;
    from_csv_str(&content)
}

/// Load a risk table from CSV text already in memory (e.g. an upload body)
///
/// Quoted fields may span several lines; blank lines between records are
/// skipped.
pub fn from_csv_str(content: &str) -> Result<RawTable, Box<dyn Error>> {
    // Excel writes a byte order mark in front of UTF-8 CSV exports
    let content = content.trim_start_matches('\u{feff}');
    let mut records = parse_csv_records(content)?.into_iter();

    let headers: Vec<String> = records
        .next()
        .ok_or("CSV file is empty")?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    let cols = headers.len();

    let mut table = RawTable::new(headers);
    for record in records {
        let mut row: Vec<RawValue> = record
            .into_iter()
            .take(cols) // Skip extra data
            .map(|field| cell_value(&field))
            .collect();
        row.resize(cols, RawValue::Empty);
        table.push_row(row);
    }

    info!("loaded {} rows x {} columns from CSV", table.len(), cols);
    Ok(table)
}

// Only finite numbers count; "NaN" or "Infinity" in a cell is text
fn cell_value(field: &str) -> RawValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return RawValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(num) if num.is_finite() => RawValue::Number(num),
        _ => RawValue::Text(field.to_string()),
    }
}

/// Load a risk table from an Excel file
///
/// Reads the first worksheet; its first row is the header row.
///
/// # Arguments
/// * `filepath` - Path to the Excel file to load
///
/// # Returns
/// * `Result<RawTable, Box<dyn Error>>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use riskboard::loader::from_excel;
///
/// match from_excel("matriz_riesgos.xlsx") {
///     Ok(table) => println!("Loaded {} rows", table.len()),
///     Err(e) => eprintln!("Error loading Excel: {}", e),
/// }
/// ```
#[cfg(feature = "excel")]
pub fn from_excel(filepath: impl AsRef<Path>) -> Result<RawTable, Box<dyn Error>> {
    use calamine::{Data, Reader, open_workbook_auto};

    let mut workbook = open_workbook_auto(filepath)?;

    // Get the first worksheet
    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or("No sheets found in Excel file")?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or("Excel sheet is empty")?
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        })
        .collect();
    let cols = headers.len();

    let mut table = RawTable::new(headers);
    for row in rows {
        let mut values: Vec<RawValue> = row
            .iter()
            .take(cols)
            .map(|cell| match cell {
                Data::Int(i) => RawValue::Number(*i as f64),
                Data::Float(f) => RawValue::Number(*f),
                Data::String(s) if s.trim().is_empty() => RawValue::Empty,
                Data::String(s) => RawValue::Text(s.clone()),
                Data::Empty => RawValue::Empty,
                // Dates, booleans and cell errors are kept as their text form
                other => RawValue::Text(other.to_string()),
            })
            .collect();
        if values.iter().all(|v| *v == RawValue::Empty) {
            continue;
        }
        values.resize(cols, RawValue::Empty);
        table.push_row(values);
    }

    info!(
        "loaded {} rows x {} columns from sheet {:?}",
        table.len(),
        cols,
        sheet_name
    );
    Ok(table)
}

// Parse CSV text into records of fields. A newline inside quotes belongs to
// the field; outside quotes it ends the record.
fn parse_csv_records(content: &str) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = true;
                if in_quotes && chars.peek() == Some(&'"') {
                    // Double quote inside quoted field - add a single quote
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                // End of field
                record.push(std::mem::take(&mut current_field));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                line += 1;
                record.push(std::mem::take(&mut current_field));
                if !is_blank(&record, quoted) {
                    records.push(std::mem::take(&mut record));
                }
                record.clear();
                quoted = false;
                record_line = line;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                current_field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(format!(
            "Unterminated quoted field in record starting at line {}",
            record_line
        )
        .into());
    }

    // Add the last record
    record.push(current_field);
    if !is_blank(&record, quoted) {
        records.push(record);
    }

    Ok(records)
}

fn is_blank(record: &[String], quoted: bool) -> bool {
    !quoted && record.len() == 1 && record[0].trim().is_empty()
}

/// Detect file type and load appropriate format
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<RawTable, Box<dyn Error>>` - The loaded table or an error
pub fn load_table(filepath: impl AsRef<Path>) -> Result<RawTable, Box<dyn Error>> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(path),
        #[cfg(feature = "excel")]
        Some("xlsx") | Some("xls") => from_excel(path),
        #[cfg(not(feature = "excel"))]
        Some("xlsx") | Some("xls") => Err("Excel support requires the 'excel' feature".into()),
        Some(ext) => Err(format!("Unsupported file extension: {}", ext).into()),
        None => Err("File has no extension".into()),
    }
}
