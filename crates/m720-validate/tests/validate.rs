use chrono::NaiveDate;
use m720_model::{AssetType, Declaration, Detail, Header, Origin, Valoracion};
use m720_validate::{Tier, ensure_valid, validate, validate_report};

fn detail(asset: AssetType, subclave: u8) -> Detail {
    Detail::new(
        2024,
        "12345678Z",
        "12345678Z",
        "GARCIA LOPEZ JUAN",
        asset,
        subclave,
        Origin::Acquired,
    )
}

fn account(cents: Valoracion) -> Detail {
    let mut d = detail(AssetType::BankAccount, 1);
    d.codigo_pais = Some("DE".to_string());
    d.clave_ident_cuenta = Some("I".to_string());
    d.codigo_bic = Some("COBADEFFXXX".to_string());
    d.codigo_cuenta = Some("DE89370400440532013000".to_string());
    d.identificacion_entidad = Some("COMMERZBANK AG".to_string());
    d.fecha_incorporacion = NaiveDate::from_ymd_opt(2019, 1, 15);
    d.valoracion_1 = cents;
    d
}

fn declaration(detalles: Vec<Detail>) -> Declaration {
    let header = Header::new(2024, "12345678Z", "GARCIA LOPEZ JUAN", "7200000000001");
    let mut declaration = Declaration::new(header, detalles);
    declaration.refresh_totals();
    declaration
}

fn valid_declaration() -> Declaration {
    let mut shares = detail(AssetType::Securities, 1);
    shares.clave_identificacion = 1;
    shares.identificacion_valores = Some("US0378331005".to_string());
    shares.clave_repr_valores = Some("A".to_string());
    shares.numero_valores_entera = 150;
    shares.valoracion_1 = Valoracion::positive(2_345_678);
    shares.valoracion_2 = Valoracion::positive(1_200_000);

    let mut flat = detail(AssetType::MovableProperty, 5);
    flat.clave_tipo_bien_inmueble = Some("U".to_string());
    flat.tipo_derecho_real_inmueble = Some("NUDA PROPIEDAD".to_string());
    flat.domicilio_pais = Some("PT".to_string());
    flat.origen = Origin::Extinguished;
    flat.fecha_extincion = NaiveDate::from_ymd_opt(2024, 7, 1);
    flat.porcentaje_participacion_entera = 50;

    declaration(vec![account(Valoracion::positive(100_000)), shares, flat])
}

#[test]
fn test_valid_declaration() {
    let declaration = valid_declaration();
    assert_eq!(validate(&declaration), Vec::<String>::new());
    assert!(ensure_valid(&declaration).is_ok());
}

#[test]
fn test_sum_reconciliation_exact() {
    // -250.005 truncates to -250.00 before it reaches the model.
    let mut declaration = declaration(vec![
        account(Valoracion::positive(100_000)),
        account(Valoracion::negative(25_000)),
    ]);
    declaration.header.suma_valoracion_1 = Valoracion::positive(75_000);
    assert!(validate(&declaration).is_empty());

    declaration.header.suma_valoracion_1 = Valoracion::positive(75_001);
    let problems = validate(&declaration);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].starts_with("SUMA VALORACIÓN 1 mismatch"));

    declaration.header.suma_valoracion_1 = Valoracion::positive(74_999);
    assert_eq!(validate(&declaration).len(), 1);
}

#[test]
fn test_second_sum_checked() {
    let mut declaration = valid_declaration();
    declaration.header.suma_valoracion_2 = Valoracion::ZERO;
    let problems = validate(&declaration);
    assert_eq!(
        problems,
        vec!["SUMA VALORACIÓN 2 mismatch: header 0.00 vs sum 12000.00"]
    );
}

#[test]
fn test_count_mismatch() {
    let mut declaration = valid_declaration();
    declaration.detalles.pop();
    declaration.refresh_totals();
    declaration.header.numero_total_registros = 3;
    assert_eq!(
        validate(&declaration),
        vec!["Número total de registros 3 does not match detail count 2"]
    );
}

#[test]
fn test_real_estate_subtype() {
    let declaration = declaration(vec![detail(AssetType::RealEstate, 2)]);
    assert_eq!(
        validate(&declaration),
        vec!["Detail 1: subclave must be 0 for clave 'I'"]
    );
}

#[test]
fn test_movable_property_without_flag() {
    let declaration = declaration(vec![detail(AssetType::MovableProperty, 1)]);
    assert_eq!(
        validate(&declaration),
        vec!["Detail 1: tipo inmueble must be U/R"]
    );
}

#[test]
fn test_extinguished_without_date() {
    let mut closed = account(Valoracion::ZERO);
    closed.origen = Origin::Extinguished;
    let declaration = declaration(vec![account(Valoracion::ZERO), closed]);
    assert_eq!(
        validate(&declaration),
        vec!["Detail 2: origen 'C' requires fecha_extincion"]
    );
}

#[test]
fn test_all_violations_reported() {
    let mut declaration = valid_declaration();
    declaration.header.modelo = "714".to_string();
    declaration.header.nif_declarante = "12345678A".to_string();
    declaration.detalles[0].subclave = 9;
    declaration.detalles[1].identificacion_valores = None;
    declaration.detalles[2].fecha_extincion = None;
    declaration.header.numero_total_registros = 7;

    let report = validate_report(&declaration);
    let messages = report.messages();
    assert_eq!(
        messages,
        vec![
            "Modelo must be 720",
            "Header nif_declarante '12345678A' is not a valid NIF/NIE",
            "Número total de registros 7 does not match detail count 3",
            "Detail 1: subclave must be between 1 and 5 for clave 'C'",
            "Detail 2: identificacion_valores is required for clave 'V'",
            "Detail 3: origen 'C' requires fecha_extincion",
        ]
    );
    assert_eq!(report.count(Tier::Identity), 1);
    assert_eq!(report.count(Tier::Business), 3);

    let err = ensure_valid(&declaration).expect_err("invalid");
    assert_eq!(err.violations.len(), 6);
    assert!(err.to_string().contains("; Detail 1: subclave"));
}

#[test]
fn test_validation_does_not_mutate() {
    let mut declaration = valid_declaration();
    declaration.header.numero_total_registros = 0;
    let before = declaration.clone();
    let _ = validate(&declaration);
    assert_eq!(declaration, before);
}

#[test]
fn test_report_serializes() {
    let mut declaration = valid_declaration();
    declaration.detalles[0].clave_condicion = 0;
    let json = serde_json::to_value(validate_report(&declaration)).expect("serialize");
    assert_eq!(json["violations"][0]["tier"], "business");
    assert_eq!(json["violations"][0]["detail"], 1);
}

#[test]
fn test_text_wider_than_its_columns_is_structural() {
    let mut declaration = valid_declaration();
    declaration.header.nombre_razon = "A".repeat(50);
    declaration.detalles[0].codigo_bic = Some("B".repeat(20));
    declaration.detalles[2].domicilio_pais = Some("PRT".to_string());

    let report = validate_report(&declaration);
    assert_eq!(
        report.messages(),
        vec![
            "Header nombre_razon exceeds max length 40",
            "Detail 1: codigo_bic exceeds max length 11",
            "Detail 3: domicilio_pais exceeds max length 2",
        ]
    );
    assert_eq!(report.count(Tier::Structural), 3);
}

#[test]
fn test_asset_specific_fields_elsewhere_are_accepted() {
    let mut insurance = detail(AssetType::Insurance, 1);
    insurance.fecha_extincion = NaiveDate::from_ymd_opt(2024, 2, 29);
    insurance.clave_ident_cuenta = Some("O".to_string());
    insurance.clave_tipo_bien_inmueble = Some("R".to_string());
    insurance.tipo_derecho_real_inmueble = Some("USUFRUCTO".to_string());

    let mut declaration = declaration(vec![insurance]);
    declaration.header.numero_identificativo_anterior = Some("7200000000000".to_string());
    assert_eq!(validate(&declaration), Vec::<String>::new());
}
