use crate::record::{CanonicalRecord, Classification, title_case};
use crate::risk::AverageThresholds;
use serde::Serialize;

/// Risk indicator for one area
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaSummary {
    pub area: String,
    /// Number of records in the area
    pub records: usize,
    /// Number of those records that carry a risk score
    pub scored: usize,
    pub mean_score: Option<f64>,
    pub classification: Classification,
}

/// An area's slice of the overall risk distribution, in percent
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaShare {
    pub area: String,
    pub percent: f64,
}

/// Distinct areas in order of first appearance
pub fn area_names(records: &[CanonicalRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.contains(&record.area) {
            names.push(record.area.clone());
        }
    }
    names
}

/// Records belonging to `area`. The query is trimmed and title-cased the same
/// way canonical areas are, so "mina norte " finds "Mina Norte".
pub fn filter_by_area<'a>(records: &'a [CanonicalRecord], area: &str) -> Vec<&'a CanonicalRecord> {
    let wanted = title_case(area.trim());
    records.iter().filter(|r| r.area == wanted).collect()
}

/// Mean of the scores that are present; `None` when no record has one
pub fn mean_risk_score<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    let (sum, count) = records
        .into_iter()
        .filter_map(|r| r.risk_score)
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Indicator for a single area
pub fn summarize_area(
    records: &[CanonicalRecord],
    area: &str,
    thresholds: &AverageThresholds,
) -> AreaSummary {
    let selected = filter_by_area(records, area);
    summary_of(title_case(area.trim()), &selected, thresholds)
}

/// One indicator per area, in order of first appearance
pub fn summarize_by_area(
    records: &[CanonicalRecord],
    thresholds: &AverageThresholds,
) -> Vec<AreaSummary> {
    area_names(records)
        .into_iter()
        .map(|area| {
            let selected: Vec<&CanonicalRecord> =
                records.iter().filter(|r| r.area == area).collect();
            summary_of(area, &selected, thresholds)
        })
        .collect()
}

fn summary_of(
    area: String,
    selected: &[&CanonicalRecord],
    thresholds: &AverageThresholds,
) -> AreaSummary {
    let mean_score = mean_risk_score(selected.iter().copied());
    AreaSummary {
        area,
        records: selected.len(),
        scored: selected.iter().filter(|r| r.risk_score.is_some()).count(),
        mean_score,
        classification: thresholds.classify(mean_score),
    }
}

/// Each area's mean score as a percentage of the sum of all area means
///
/// Areas without a mean are left out. Returns an empty list when the means sum
/// to zero.
pub fn risk_share(summaries: &[AreaSummary]) -> Vec<AreaShare> {
    let total: f64 = summaries.iter().filter_map(|s| s.mean_score).sum();
    if total == 0.0 {
        return Vec::new();
    }

    summaries
        .iter()
        .filter_map(|s| {
            s.mean_score.map(|mean| AreaShare {
                area: s.area.clone(),
                percent: mean / total * 100.0,
            })
        })
        .collect()
}

/// Record counts per classification: Low, Medium, High, Unknown, then any
/// explicit labels in order of first appearance. Zero counts are kept for the
/// four canonical buckets.
pub fn count_by_classification<'a, I>(records: I) -> Vec<(Classification, usize)>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    let mut counts: Vec<(Classification, usize)> = vec![
        (Classification::Low, 0),
        (Classification::Medium, 0),
        (Classification::High, 0),
        (Classification::Unknown, 0),
    ];

    for record in records {
        match counts.iter_mut().find(|(c, _)| *c == record.classification) {
            Some(entry) => entry.1 += 1,
            None => counts.push((record.classification.clone(), 1)),
        }
    }
    counts
}
