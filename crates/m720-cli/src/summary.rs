use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use m720_cli::source::ValidationOutcome;
use m720_model::{Declaration, Detail, Header, Sign, Valoracion};

use crate::types::ConvertResult;

pub fn print_declaration(path: &Path, declaration: &Declaration) {
    println!("File: {}", path.display());
    println!("{}", header_table(&declaration.header));

    if declaration.detalles.is_empty() {
        println!("No detail records.");
        return;
    }
    println!();
    println!("Details:");
    println!("{}", detail_table(declaration));
}

pub fn print_validation(outcome: &ValidationOutcome) {
    println!("File: {} ({})", outcome.path.display(), outcome.format);
    if let Some(details) = outcome.details {
        println!("Details: {details}");
    }
    if outcome.is_valid() {
        println!("{}", status_table("VALID", Color::Green));
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Violation")]);
    apply_table_style(&mut table, 120);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, violation) in outcome.violations.iter().enumerate() {
        table.add_row(vec![dim_cell(idx + 1), Cell::new(violation)]);
    }
    println!("{table}");
    eprintln!(
        "{} violation{} found",
        outcome.violations.len(),
        if outcome.violations.len() == 1 { "" } else { "s" }
    );
}

pub fn print_conversion(result: &ConvertResult) {
    println!(
        "Converted {} ({}) -> {} ({}), {} detail records",
        result.input.display(),
        result.from,
        result.output.display(),
        result.to,
        result.details
    );
}

fn header_table(header: &Header) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Header"), header_cell("Value")]);
    apply_table_style(&mut table, 100);
    let kind = match (
        header.declaracion_complementaria,
        header.declaracion_sustitutiva,
    ) {
        (true, false) => "complementaria",
        (false, true) => "sustitutiva",
        (false, false) => "ordinaria",
        (true, true) => "complementaria + sustitutiva",
    };
    let rows = [
        ("Ejercicio", Cell::new(header.ejercicio)),
        ("NIF declarante", Cell::new(&header.nif_declarante)),
        ("Nombre / razón social", Cell::new(&header.nombre_razon)),
        ("Contacto", optional_cell(header.persona_contacto.as_deref())),
        ("Teléfono", optional_cell(header.telefono_contacto.as_deref())),
        ("Número identificativo", Cell::new(&header.numero_identificativo)),
        ("Declaración", Cell::new(kind)),
        (
            "Número anterior",
            optional_cell(header.numero_identificativo_anterior.as_deref()),
        ),
        ("Registros", Cell::new(header.numero_total_registros)),
        ("Suma valoración 1", amount_cell(header.suma_valoracion_1)),
        ("Suma valoración 2", amount_cell(header.suma_valoracion_2)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), value]);
    }
    table
}

fn detail_table(declaration: &Declaration) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Clave"),
        header_cell("Sub"),
        header_cell("NIF declarado"),
        header_cell("Nombre"),
        header_cell("País"),
        header_cell("Origen"),
        header_cell("Valoración 1"),
        header_cell("Valoración 2"),
        header_cell("%"),
    ]);
    apply_table_style(&mut table, 165);
    if table.column_count() >= 10 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(3)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(3)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(14)),
            ColumnConstraint::LowerBoundary(Width::Fixed(14)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ]);
    }
    for column in [0, 2, 7, 8, 9] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for (idx, detail) in declaration.detalles.iter().enumerate() {
        table.add_row(detail_row(idx + 1, detail));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{} records", declaration.detalles.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        amount_cell(declaration.total_valoracion_1()).add_attribute(Attribute::Bold),
        amount_cell(declaration.total_valoracion_2()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn detail_row(index: usize, detail: &Detail) -> Vec<Cell> {
    let asset = detail.clave_tipo_bien;
    vec![
        dim_cell(index),
        Cell::new(format!("{} {}", asset.code(), asset.label()))
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(detail.subclave),
        Cell::new(&detail.nif_declarado),
        Cell::new(&detail.nombre_razon_declarado),
        optional_cell(detail.codigo_pais.as_deref()),
        Cell::new(detail.origen.code()),
        amount_cell(detail.valoracion_1),
        amount_cell(detail.valoracion_2),
        Cell::new(format!(
            "{}.{:02}",
            detail.porcentaje_participacion_entera, detail.porcentaje_participacion_decimal
        )),
    ]
}

fn status_table(label: &str, color: Color) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table, 40);
    table.add_row(vec![
        Cell::new(label).fg(color).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn amount_cell(amount: Valoracion) -> Cell {
    let cell = Cell::new(amount);
    match amount.sign {
        Sign::Negative => cell.fg(Color::Red),
        Sign::Positive => cell,
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
