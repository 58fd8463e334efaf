use riskboard::downloader::{EXPORT_HEADERS, export_file, to_csv};
use riskboard::loader::{from_csv, from_csv_str, load_table};
use riskboard::record::{CanonicalRecord, Classification, RawValue};
use riskboard::table::build_canonical;
use std::fs;

const MATRIX: &str = "\u{feff}Área de Trabajo,Actividad,Peligro,Prob (1-5),Severidad (1-5)
Mina Norte,Perforación,\"Caída de rocas, zona 2\",4,3

mina sur,Voladura,Proyección,5,5
Planta,Mantenimiento,Ruido,2,N/A
";

#[test]
fn test_from_csv_str() {
    let raw = from_csv_str(MATRIX).unwrap();
    assert_eq!(raw.headers[0], "Área de Trabajo");
    assert_eq!(raw.len(), 3);
    assert_eq!(raw.rows[0][2], RawValue::Text("Caída de rocas, zona 2".to_string()));
    assert_eq!(raw.rows[0][3], RawValue::Number(4.0));
    assert_eq!(raw.rows[2][4], RawValue::Text("N/A".to_string()));
    println!("✓ CSV parsed with quoting and BOM");
}

#[test]
fn test_csv_short_and_long_rows() {
    let raw = from_csv_str("Área,Prob,Severidad\nMina,2\nPlanta,1,2,3,4\n").unwrap();
    assert_eq!(raw.rows[0], vec![
        RawValue::Text("Mina".to_string()),
        RawValue::Number(2.0),
        RawValue::Empty,
    ]);
    assert_eq!(raw.rows[1].len(), 3);
}

#[test]
fn test_csv_errors() {
    assert!(from_csv_str("").is_err());
    assert!(from_csv_str("Área\n\"sin cerrar\n").is_err());
    assert!(load_table("matriz.txt").is_err());
    assert!(load_table("matriz").is_err());
}

#[test]
fn test_csv_round_trip() {
    let records = build_canonical(&from_csv_str(MATRIX).unwrap()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].area, "Mina Sur");
    assert_eq!(records[1].classification, Classification::High);
    assert_eq!(records[2].classification, Classification::Unknown);

    let csv = to_csv(&records);
    assert!(csv.starts_with(&EXPORT_HEADERS.join(",")));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(&path, &csv).unwrap();

    let reloaded = build_canonical(&from_csv(&path).unwrap()).unwrap();
    assert_eq!(reloaded.len(), records.len());
    for (a, b) in records.iter().zip(reloaded.iter()) {
        assert_eq!(a.area, b.area);
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.hazard, b.hazard);
    }
    println!("✓ Exported CSV reloads to the same canonical table");
}

#[test]
fn test_multiline_field_round_trip() {
    let records = vec![CanonicalRecord {
        area: "Mina Norte".to_string(),
        activity: None,
        hazard: Some("Caída de rocas\nzona 2".to_string()),
        probability: None,
        severity: None,
        risk_score: Some(9.0),
        classification: Classification::Medium,
    }, CanonicalRecord {
        area: "Planta".to_string(),
        activity: Some("Mantenimiento".to_string()),
        hazard: Some("Ruido".to_string()),
        probability: Some(2.0),
        severity: Some(2.0),
        risk_score: Some(4.0),
        classification: Classification::Low,
    }];

    let csv = to_csv(&records);
    assert!(csv.contains("\"Caída de rocas\nzona 2\""));

    let reloaded = build_canonical(&from_csv_str(&csv).unwrap()).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].area, "Mina Norte");
    assert_eq!(reloaded[0].hazard.as_deref(), Some("Caída de rocas\nzona 2"));
    assert_eq!(reloaded[0].risk_score, Some(9.0));
    assert_eq!(reloaded[0].classification, Classification::Medium);
    assert_eq!(reloaded[1].area, "Planta");
    assert_eq!(reloaded[1].risk_score, Some(4.0));
    assert_eq!(reloaded[1].classification, Classification::Low);
    println!("✓ Line breaks inside quoted fields survive export and reload");
}

#[test]
fn test_crlf_records() {
    let raw = from_csv_str("Área,Peligro\r\nMina,\"Polvo\r\nsílice\"\r\n\r\nPlanta,Ruido\r\n").unwrap();
    assert_eq!(raw.headers, vec!["Área", "Peligro"]);
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.rows[0][1], RawValue::Text("Polvo\r\nsílice".to_string()));
    assert_eq!(raw.rows[1][0], RawValue::Text("Planta".to_string()));
}

#[test]
fn test_non_finite_text_stays_text() {
    let raw = from_csv_str("Área,Nivel de riesgo\nNaN,3\nInfinity,4\ninf,nan\n").unwrap();
    assert_eq!(raw.rows[0][0], RawValue::Text("NaN".to_string()));
    assert_eq!(raw.rows[1][0], RawValue::Text("Infinity".to_string()));

    let records = build_canonical(&raw).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].area, "Nan");
    assert_eq!(records[0].risk_score, Some(3.0));
    assert_eq!(records[1].area, "Infinity");
    assert_eq!(records[1].risk_score, Some(4.0));
    assert_eq!(records[2].area, "Inf");
    assert_eq!(records[2].risk_score, None);
    assert_eq!(records[2].classification, Classification::Unknown);
}

#[test]
fn test_export_file_by_extension() {
    let records = build_canonical(&from_csv_str(MATRIX).unwrap()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("salida.csv");
    export_file(&records, &csv_path).unwrap();
    assert_eq!(fs::read_to_string(&csv_path).unwrap(), to_csv(&records));

    assert!(export_file(&records, dir.path().join("salida.pdf")).is_err());
}

#[cfg(feature = "excel")]
#[test]
fn test_xlsx_round_trip() {
    use riskboard::downloader::to_xlsx;
    use riskboard::loader::from_excel;

    let records = build_canonical(&from_csv_str(MATRIX).unwrap()).unwrap();
    let bytes = to_xlsx(&records).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xlsx");
    fs::write(&path, bytes).unwrap();

    let reloaded = build_canonical(&from_excel(&path).unwrap()).unwrap();
    assert_eq!(reloaded.len(), records.len());
    for (a, b) in records.iter().zip(reloaded.iter()) {
        assert_eq!(a.area, b.area);
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.classification, b.classification);
    }
}
