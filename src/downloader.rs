use crate::record::{CanonicalRecord, format_number};
use std::error::Error;

/// Column headers written on export. They are the names the column detection
/// looks for, so an exported file loads back into the same canonical table.
pub const EXPORT_HEADERS: [&str; 7] = [
    "Área",
    "Actividad",
    "Peligro",
    "Probabilidad",
    "Severidad",
    "Nivel de riesgo",
    "Clasificación",
];

fn export_row(record: &CanonicalRecord) -> [String; 7] {
    let number = |n: Option<f64>| n.map(format_number).unwrap_or_default();
    [
        record.area.clone(),
        record.activity.clone().unwrap_or_default(),
        record.hazard.clone().unwrap_or_default(),
        number(record.probability),
        number(record.severity),
        number(record.risk_score),
        record.classification.to_string(),
    ]
}

fn push_csv_field(out: &mut String, value: &str) {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        let escaped = value.replace('"', "\"\"");
        out.push_str(&format!("\"{}\"", escaped));
    } else {
        out.push_str(value);
    }
}

/// Convert canonical records to CSV format
///
/// Absent fields are written as empty cells. Special characters (commas,
/// quotes, newlines) are escaped.
///
/// # Examples
/// ```
/// use riskboard::downloader::to_csv;
///
/// let csv = to_csv(&[]);
/// assert!(csv.starts_with("Área,Actividad"));
/// ```
pub fn to_csv(records: &[CanonicalRecord]) -> String {
    let mut csv_content = EXPORT_HEADERS.join(",");
    csv_content.push('\n');

    for record in records {
        for (c, value) in export_row(record).iter().enumerate() {
            if c > 0 {
                csv_content.push(',');
            }
            push_csv_field(&mut csv_content, value);
        }
        csv_content.push('\n');
    }

    csv_content
}

/// Convert canonical records to XLSX format
///
/// Numeric fields are written as numbers and text fields as strings; absent
/// fields leave the cell blank.
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
#[cfg(feature = "excel")]
pub fn to_xlsx(records: &[CanonicalRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    for (c, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, c as u16, *header)?;
    }

    for (r, record) in records.iter().enumerate() {
        let row = (r + 1) as u32;
        worksheet.write_string(row, 0, record.area.as_str())?;
        if let Some(activity) = &record.activity {
            worksheet.write_string(row, 1, activity.as_str())?;
        }
        if let Some(hazard) = &record.hazard {
            worksheet.write_string(row, 2, hazard.as_str())?;
        }
        for (c, value) in [
            (3u16, record.probability),
            (4, record.severity),
            (5, record.risk_score),
        ] {
            if let Some(n) = value {
                worksheet.write_number(row, c, n)?;
            }
        }
        worksheet.write_string(row, 6, record.classification.as_str())?;
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

/// Write canonical records to `path`, picking the format from its extension
pub fn export_file(
    records: &[CanonicalRecord],
    path: impl AsRef<std::path::Path>,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let bytes = match extension.as_deref() {
        Some("csv") => to_csv(records).into_bytes(),
        #[cfg(feature = "excel")]
        Some("xlsx") => to_xlsx(records)?,
        #[cfg(not(feature = "excel"))]
        Some("xlsx") => return Err("Excel export requires the 'excel' feature".into()),
        Some(ext) => return Err(format!("Unsupported export extension: {}", ext).into()),
        None => return Err("Export file has no extension".into()),
    };

    std::fs::write(path, bytes)?;
    Ok(())
}
