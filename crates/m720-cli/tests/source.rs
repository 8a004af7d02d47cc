//! Integration tests for format resolution, loading and checking.

use std::path::Path;

use m720_cli::source::{DeclarationFormat, check, encoding_options, load, store, to_json};
use m720_fixed::{FixedWidthOptions, write_fixed_width};
use m720_model::{AssetType, Declaration, Detail, Header, Origin, Valoracion};
use tempfile::tempdir;

fn sample() -> Declaration {
    let mut detail = Detail::new(
        2024,
        "12345678Z",
        "X1234567L",
        "MÜLLER ANNA",
        AssetType::Insurance,
        2,
        Origin::Acquired,
    );
    detail.valoracion_1 = Valoracion::positive(75_000);
    let header = Header::new(2024, "12345678Z", "GARCIA LOPEZ JUAN", "7200000000001");
    let mut declaration = Declaration::new(header, vec![detail]);
    declaration.refresh_totals();
    declaration
}

fn defaults() -> FixedWidthOptions {
    FixedWidthOptions::default()
}

#[test]
fn test_fixed_to_csv_and_back() {
    let dir = tempdir().expect("tempdir");
    let fixed = dir.path().join("2024.720");
    let csv = dir.path().join("2024.csv");
    write_fixed_width(&fixed, &sample()).expect("write fixed");

    let declaration = load(&fixed, DeclarationFormat::Fixed, defaults()).expect("load fixed");
    store(&csv, DeclarationFormat::Csv, defaults(), &declaration).expect("store csv");
    let back = load(&csv, DeclarationFormat::Csv, defaults()).expect("load csv");

    assert_eq!(back, sample());
}

#[test]
fn test_store_with_other_encoding() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("utf8.720");
    let utf8 = encoding_options("utf-8").expect("utf-8");

    store(&path, DeclarationFormat::Fixed, utf8, &sample()).expect("store");
    let bytes = std::fs::read(&path).expect("read bytes");
    assert!(bytes.windows(2).any(|pair| pair == "Ü".as_bytes()));
    assert_eq!(
        load(&path, DeclarationFormat::Fixed, utf8).expect("load"),
        sample()
    );
}

#[test]
fn test_check_reports_fixed_width_violations() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.720");
    let mut declaration = sample();
    declaration.header.numero_total_registros = 3;
    write_fixed_width(&path, &declaration).expect("write");

    let outcome = check(&path, DeclarationFormat::Fixed, defaults()).expect("check");
    assert!(!outcome.is_valid());
    assert_eq!(outcome.details, Some(1));
    assert_eq!(
        outcome.violations,
        vec!["Número total de registros 3 does not match detail count 1"]
    );
}

#[test]
fn test_check_reports_csv_violations() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.csv");
    let mut declaration = sample();
    declaration.detalles[0].subclave = 3;
    store(&path, DeclarationFormat::Csv, defaults(), &declaration).expect("store");

    let outcome = check(&path, DeclarationFormat::Csv, defaults()).expect("check");
    assert_eq!(outcome.details, None);
    assert_eq!(
        outcome.violations,
        vec!["Detail 1: subclave must be between 1 and 2 for clave 'S'"]
    );
    assert!(load(&path, DeclarationFormat::Csv, defaults()).is_err());
}

#[test]
fn test_check_valid_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("good.csv");
    store(&path, DeclarationFormat::Csv, defaults(), &sample()).expect("store");

    let outcome = check(&path, DeclarationFormat::Csv, defaults()).expect("check");
    assert!(outcome.is_valid());
    assert_eq!(outcome.details, Some(1));
}

#[test]
fn test_missing_file_has_context() {
    let err = load(
        Path::new("/nonexistent/2024.720"),
        DeclarationFormat::Fixed,
        defaults(),
    )
    .expect_err("missing");
    let message = format!("{err:#}");
    assert!(message.starts_with("read fixed-width file /nonexistent/2024.720"));
    assert!(message.contains("file not found"));
}

#[test]
fn test_json_export() {
    let json = to_json(&sample(), false).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["header"]["nif_declarante"], "12345678Z");
    assert_eq!(value["detalles"][0]["clave_tipo_bien"], "S");
    assert!(!json.contains('\n'));
    assert!(to_json(&sample(), true).expect("pretty").contains('\n'));
}

#[test]
fn test_json_input_is_checked_like_fixed_width() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("edited.json");
    let mut declaration = sample();
    declaration.header.nombre_razon = "A".repeat(45);
    store(&path, DeclarationFormat::Json, defaults(), &declaration).expect("store");

    assert_eq!(
        DeclarationFormat::resolve(&path, None).expect("infer"),
        DeclarationFormat::Json
    );
    let outcome = check(&path, DeclarationFormat::Json, defaults()).expect("check");
    assert_eq!(outcome.details, Some(1));
    assert_eq!(
        outcome.violations,
        vec!["Header nombre_razon exceeds max length 40"]
    );
}

#[test]
fn test_json_input_reads_blank_text_as_absent() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("blank.json");
    let mut declaration = sample();
    declaration.detalles[0].codigo_pais = Some(String::new());
    declaration.header.persona_contacto = Some("  ".to_string());
    std::fs::write(&path, to_json(&declaration, true).expect("json")).expect("write");

    let back = load(&path, DeclarationFormat::Json, defaults()).expect("load");
    assert_eq!(back, sample());
    assert!(check(&path, DeclarationFormat::Json, defaults()).expect("check").is_valid());
}

#[test]
fn test_malformed_json_has_context() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"header\":").expect("write");

    let err = load(&path, DeclarationFormat::Json, defaults()).expect_err("malformed");
    assert!(format!("{err:#}").starts_with("parse JSON file "));
}
