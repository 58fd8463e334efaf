use crate::columns::ColumnMap;
use crate::error::RiskError;
use crate::record::{Classification, RowView};
use serde::{Deserialize, Serialize};

/// Cut points for classifying a single record's risk score
///
/// `score <= medium_above` is Low, `score <= high_above` is Medium, anything
/// above is High.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowThresholds {
    pub medium_above: f64,
    pub high_above: f64,
}

impl Default for RowThresholds {
    fn default() -> Self {
        Self {
            medium_above: 4.0,
            high_above: 12.0,
        }
    }
}

impl RowThresholds {
    pub fn new(medium_above: f64, high_above: f64) -> Result<Self, RiskError> {
        let thresholds = Self {
            medium_above,
            high_above,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        if self.medium_above > self.high_above {
            return Err(RiskError::InvalidThresholds {
                scale: "row",
                lower: self.medium_above,
                upper: self.high_above,
            });
        }
        Ok(())
    }

    pub fn classify(&self, score: Option<f64>) -> Classification {
        match score {
            None => Classification::Unknown,
            Some(s) if s.is_nan() => Classification::Unknown,
            Some(s) if s <= self.medium_above => Classification::Low,
            Some(s) if s <= self.high_above => Classification::Medium,
            Some(_) => Classification::High,
        }
    }
}

/// Cut points for classifying an area's mean risk score
///
/// These run on a different scale from `RowThresholds` and the two are not
/// interchangeable. `mean >= high_from` is High, `mean >= medium_from` is
/// Medium, anything below is Low.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AverageThresholds {
    pub medium_from: f64,
    pub high_from: f64,
}

impl Default for AverageThresholds {
    fn default() -> Self {
        Self {
            medium_from: 8.0,
            high_from: 15.0,
        }
    }
}

impl AverageThresholds {
    pub fn new(medium_from: f64, high_from: f64) -> Result<Self, RiskError> {
        let thresholds = Self {
            medium_from,
            high_from,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        if self.medium_from > self.high_from {
            return Err(RiskError::InvalidThresholds {
                scale: "average",
                lower: self.medium_from,
                upper: self.high_from,
            });
        }
        Ok(())
    }

    pub fn classify(&self, mean_score: Option<f64>) -> Classification {
        match mean_score {
            None => Classification::Unknown,
            Some(m) if m.is_nan() => Classification::Unknown,
            Some(m) if m >= self.high_from => Classification::High,
            Some(m) if m >= self.medium_from => Classification::Medium,
            Some(_) => Classification::Low,
        }
    }
}

/// Numeric risk score for one row
///
/// A mapped risk-level column always takes priority; an unparsable value
/// there gives no score rather than falling through to the product. Without
/// one, the score is `probability * severity` when both parse.
pub fn derive_risk_score(row: &RowView<'_>, columns: &ColumnMap) -> Option<f64> {
    if let Some(level) = columns.risk_level.as_deref() {
        return row.get(level).as_number();
    }

    match (columns.probability.as_deref(), columns.severity.as_deref()) {
        (Some(prob), Some(sev)) => {
            let probability = row.get(prob).as_number()?;
            let severity = row.get(sev).as_number()?;
            Some(probability * severity)
        }
        _ => None,
    }
}

/// Per-row classification with the default cut points {4, 12}
///
/// # Examples
/// ```
/// use riskboard::record::Classification;
/// use riskboard::risk::classify_row;
///
/// assert_eq!(classify_row(Some(4.0)), Classification::Low);
/// assert_eq!(classify_row(Some(12.01)), Classification::High);
/// assert_eq!(classify_row(None), Classification::Unknown);
/// ```
pub fn classify_row(score: Option<f64>) -> Classification {
    RowThresholds::default().classify(score)
}

/// Area-average classification with the default cut points {8, 15}
pub fn classify_average(mean_score: Option<f64>) -> Classification {
    AverageThresholds::default().classify(mean_score)
}
