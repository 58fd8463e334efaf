use crate::columns::{ColumnMap, Role};
use crate::config::RiskConfig;
use crate::error::RiskError;
use crate::record::{CanonicalRecord, Classification, RawTable, RowView, title_case};
use crate::risk::derive_risk_score;
use log::{info, warn};

/// Builds the canonical table with the default thresholds
///
/// # Errors
/// * `RiskError::MissingRequiredColumn(Role::Area)` when no column name
///   contains "area". Nothing is produced in that case.
///
/// # Examples
/// ```
/// use riskboard::record::{RawTable, RawValue};
/// use riskboard::table::build_canonical;
///
/// let mut raw = RawTable::new(vec![
///     "Área de Trabajo".to_string(),
///     "Prob (1-5)".to_string(),
///     "Severidad (1-5)".to_string(),
/// ]);
/// raw.push_row(vec![
///     RawValue::Text("Mina Norte".to_string()),
///     RawValue::Number(4.0),
///     RawValue::Number(3.0),
/// ]);
///
/// let records = build_canonical(&raw).unwrap();
/// assert_eq!(records[0].risk_score, Some(12.0));
/// ```
pub fn build_canonical(raw: &RawTable) -> Result<Vec<CanonicalRecord>, RiskError> {
    build_canonical_with(raw, &RiskConfig::default())
}

/// Builds the canonical table, classifying scores with `config.row`
///
/// Row order is preserved. Rows with a blank Area cell are rejected; no row is
/// dropped for unparsable numbers.
pub fn build_canonical_with(
    raw: &RawTable,
    config: &RiskConfig,
) -> Result<Vec<CanonicalRecord>, RiskError> {
    let columns = ColumnMap::resolve(&raw.headers);

    let area_column = match columns.area.as_deref() {
        Some(column) => column,
        None => {
            warn!("no area column among headers {:?}", raw.headers);
            return Err(RiskError::MissingRequiredColumn(Role::Area));
        }
    };

    let mut records = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter_rows().enumerate() {
        match canonical_record(&row, area_column, &columns, config) {
            Some(record) => records.push(record),
            None => warn!("row {} rejected: blank area", idx + 1),
        }
    }

    info!(
        "built {} canonical records from {} rows",
        records.len(),
        raw.len()
    );
    Ok(records)
}

fn canonical_record(
    row: &RowView<'_>,
    area_column: &str,
    columns: &ColumnMap,
    config: &RiskConfig,
) -> Option<CanonicalRecord> {
    let area = title_case(&row.get(area_column).as_text()?);

    let text = |column: &Option<String>| column.as_deref().and_then(|c| row.get(c).as_text());
    let number = |column: &Option<String>| column.as_deref().and_then(|c| row.get(c).as_number());

    let risk_score = derive_risk_score(row, columns);
    let classification = match columns.classification.as_deref() {
        Some(column) => match row.get(column).as_text() {
            Some(label) => Classification::from_label(&label),
            None => Classification::Unknown,
        },
        None => config.row.classify(risk_score),
    };

    Some(CanonicalRecord {
        area,
        activity: text(&columns.activity),
        hazard: text(&columns.hazard),
        probability: number(&columns.probability),
        severity: number(&columns.severity),
        risk_score,
        classification,
    })
}
