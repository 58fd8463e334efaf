use riskboard::columns::ColumnMap;
use riskboard::config::RiskConfig;
use riskboard::error::RiskError;
use riskboard::record::{Classification, RawValue, RowView};
use riskboard::risk::{
    AverageThresholds, RowThresholds, classify_average, classify_row, derive_risk_score,
};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_classify_row_boundaries() {
    assert_eq!(classify_row(Some(0.0)), Classification::Low);
    assert_eq!(classify_row(Some(4.0)), Classification::Low);
    assert_eq!(classify_row(Some(4.01)), Classification::Medium);
    assert_eq!(classify_row(Some(12.0)), Classification::Medium);
    assert_eq!(classify_row(Some(12.01)), Classification::High);
    assert_eq!(classify_row(None), Classification::Unknown);
    assert_eq!(classify_row(Some(f64::NAN)), Classification::Unknown);
    println!("✓ Per-row thresholds {{4, 12}}");
}

#[test]
fn test_classify_average_boundaries() {
    assert_eq!(classify_average(Some(7.99)), Classification::Low);
    assert_eq!(classify_average(Some(8.0)), Classification::Medium);
    assert_eq!(classify_average(Some(14.99)), Classification::Medium);
    assert_eq!(classify_average(Some(15.0)), Classification::High);
    assert_eq!(classify_average(None), Classification::Unknown);
    assert_eq!(classify_average(Some(f64::NAN)), Classification::Unknown);
    println!("✓ Per-area thresholds {{8, 15}}");
}

#[test]
fn test_scales_are_independent() {
    // 13 is High per row but only Medium as an area mean
    assert_eq!(classify_row(Some(13.0)), Classification::High);
    assert_eq!(classify_average(Some(13.0)), Classification::Medium);
}

#[test]
fn test_alternative_threshold_pairs() {
    let six_twelve = AverageThresholds::new(6.0, 12.0).unwrap();
    assert_eq!(six_twelve.classify(Some(7.0)), Classification::Medium);
    assert_eq!(six_twelve.classify(Some(12.0)), Classification::High);

    let three_six = AverageThresholds::new(3.0, 6.0).unwrap();
    assert_eq!(three_six.classify(Some(2.9)), Classification::Low);
    assert_eq!(three_six.classify(Some(6.0)), Classification::High);

    let row = RowThresholds::new(2.0, 5.0).unwrap();
    assert_eq!(row.classify(Some(5.0)), Classification::Medium);
    assert_eq!(row.classify(Some(5.5)), Classification::High);
}

#[test]
fn test_invalid_thresholds_rejected() {
    assert!(matches!(
        RowThresholds::new(12.0, 4.0),
        Err(RiskError::InvalidThresholds { scale: "row", .. })
    ));
    assert!(matches!(
        AverageThresholds::new(15.0, 8.0),
        Err(RiskError::InvalidThresholds { scale: "average", .. })
    ));
}

#[test]
fn test_risk_level_wins_over_product() {
    let names = headers(&["Área", "Nivel de Riesgo", "Probabilidad", "Severidad"]);
    let map = ColumnMap::resolve(&names);
    let cells = vec![
        RawValue::Text("Mina".to_string()),
        RawValue::Number(10.0),
        RawValue::Number(3.0),
        RawValue::Number(5.0),
    ];
    let row = RowView::new(&names, &cells);
    assert_eq!(derive_risk_score(&row, &map), Some(10.0));
    println!("✓ RiskLevel column takes priority");
}

#[test]
fn test_unparsable_risk_level_is_absent() {
    let names = headers(&["Área", "Nivel de Riesgo", "Probabilidad", "Severidad"]);
    let map = ColumnMap::resolve(&names);
    let cells = vec![
        RawValue::Text("Mina".to_string()),
        RawValue::Text("alto".to_string()),
        RawValue::Number(3.0),
        RawValue::Number(5.0),
    ];
    let row = RowView::new(&names, &cells);
    assert_eq!(derive_risk_score(&row, &map), None);
}

#[test]
fn test_product_of_probability_and_severity() {
    let names = headers(&["Área", "Prob", "Gravedad"]);
    let map = ColumnMap::resolve(&names);

    let cells = vec![
        RawValue::Text("Mina".to_string()),
        RawValue::Text(" 2.5 ".to_string()),
        RawValue::Number(4.0),
    ];
    assert_eq!(derive_risk_score(&RowView::new(&names, &cells), &map), Some(10.0));

    let bad = vec![
        RawValue::Text("Mina".to_string()),
        RawValue::Number(4.0),
        RawValue::Text("N/A".to_string()),
    ];
    assert_eq!(derive_risk_score(&RowView::new(&names, &bad), &map), None);

    let short = vec![RawValue::Text("Mina".to_string()), RawValue::Number(4.0)];
    assert_eq!(derive_risk_score(&RowView::new(&names, &short), &map), None);
}

#[test]
fn test_no_score_columns() {
    let names = headers(&["Área", "Prob"]);
    let map = ColumnMap::resolve(&names);
    let cells = vec![RawValue::Text("Mina".to_string()), RawValue::Number(4.0)];
    assert_eq!(derive_risk_score(&RowView::new(&names, &cells), &map), None);
}

#[test]
fn test_config_from_json() {
    let config = RiskConfig::from_json_str(r#"{ "average": { "medium_from": 6, "high_from": 12 } }"#)
        .unwrap();
    assert_eq!(config.row, RowThresholds::default());
    assert_eq!(config.average.medium_from, 6.0);
    assert_eq!(config.average.high_from, 12.0);

    let empty = RiskConfig::from_json_str("{}").unwrap();
    assert_eq!(empty, RiskConfig::default());

    assert!(matches!(
        RiskConfig::from_json_str(r#"{ "row": { "medium_above": 20 } }"#),
        Err(RiskError::InvalidThresholds { .. })
    ));
    assert!(matches!(
        RiskConfig::from_json_str("not json"),
        Err(RiskError::Config(_))
    ));
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(matches!(
        RiskConfig::from_json_str(r#"{ "average": { "medium_form": 6, "high_from": 12 } }"#),
        Err(RiskError::Config(_))
    ));
    assert!(matches!(
        RiskConfig::from_json_str(r#"{ "rows": { "medium_above": 3 } }"#),
        Err(RiskError::Config(_))
    ));
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("riskboard.json");
    std::fs::write(&path, r#"{ "row": { "medium_above": 3, "high_above": 6 } }"#).unwrap();

    let config = RiskConfig::from_json_file(&path).unwrap();
    assert_eq!(config.row.classify(Some(4.0)), Classification::Medium);
    assert_eq!(config.average, AverageThresholds::default());

    assert!(matches!(
        RiskConfig::from_json_file(dir.path().join("missing.json")),
        Err(RiskError::Io(_))
    ));
}
