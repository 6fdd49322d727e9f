use equipment_migration::{
    generate, generate_from_source, open_source, rows_from_cells, write_migration, EntityKind,
    Generated, IssueKind,
};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

// ===== Helpers =====

const SCHEMA: &str = "
CREATE TABLE brands (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE protocols (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE models (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    brand_id TEXT NOT NULL REFERENCES brands(id),
    created_at TEXT NOT NULL
);
CREATE TABLE ports (
    id TEXT PRIMARY KEY,
    protocol_id TEXT NOT NULL REFERENCES protocols(id),
    port INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE equipments (
    id TEXT PRIMARY KEY,
    model_id TEXT NOT NULL REFERENCES models(id),
    port_id TEXT NOT NULL REFERENCES ports(id),
    is_published BOOLEAN NOT NULL,
    created_at TEXT NOT NULL
);
";

/// In-memory database with the target schema, FKs on and a `now()` function
fn database() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    conn.create_scalar_function("now", 0, FunctionFlags::SQLITE_UTF8, |_ctx| {
        Ok("2026-01-01 00:00:00".to_string())
    })
    .unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

fn run(records: Vec<Vec<&str>>) -> Generated {
    let mut all = vec![vec!["Port", "Protocol", "Model", "Brand"]];
    all.extend(records);
    generate(&rows_from_cells(all), "test")
}

// ===== SQL validity =====

#[test]
fn test_up_block_applies_with_foreign_keys() {
    let generated = run(vec![
        vec!["80", "HTTP", "ModelX", "BrandY"],
        vec!["80", "HTTP", "ModelZ", "BrandY"],
        vec!["1883", "MQTT", "Sensor", "Bolt"],
    ]);

    let conn = database();
    conn.execute_batch(generated.script.up()).unwrap();

    assert_eq!(count(&conn, "brands"), 2);
    assert_eq!(count(&conn, "protocols"), 2);
    assert_eq!(count(&conn, "models"), 3);
    assert_eq!(count(&conn, "ports"), 2);
    assert_eq!(count(&conn, "equipments"), 3);

    let published: i64 = conn
        .query_row("SELECT COUNT(*) FROM equipments WHERE is_published = true", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(published, 3);

    let port: i64 = conn
        .query_row(
            "SELECT p.port FROM ports p JOIN protocols pr ON pr.id = p.protocol_id WHERE pr.title = 'MQTT'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(port, 1883);
}

#[test]
fn test_empty_sheet_produces_valid_sql() {
    let generated = run(Vec::new());

    let conn = database();
    conn.execute_batch(generated.script.up()).unwrap();
    conn.execute_batch(generated.script.down()).unwrap();

    for table in ["brands", "protocols", "models", "ports", "equipments"] {
        assert_eq!(count(&conn, table), 0);
    }
}

#[test]
fn test_partially_empty_collections_are_valid_sql() {
    // Brand and model exist, but no protocol → no ports, no equipments
    let generated = run(vec![vec!["80", "", "X1", "Acme"]]);
    assert!(generated.equipments.is_empty());

    let conn = database();
    conn.execute_batch(generated.script.up()).unwrap();

    assert_eq!(count(&conn, "brands"), 1);
    assert_eq!(count(&conn, "models"), 1);
    assert_eq!(count(&conn, "ports"), 0);
    assert_eq!(count(&conn, "equipments"), 0);
}

#[test]
fn test_down_block_reverts_up_block() {
    let generated = run(vec![
        vec!["80", "HTTP", "X1", "Acme"],
        vec!["443", "HTTPS", "X2", "Acme"],
    ]);

    let conn = database();
    // Whole goose document: up then down, markers are plain comments
    conn.execute_batch(&generated.script.to_string()).unwrap();

    for table in ["brands", "protocols", "models", "ports", "equipments"] {
        assert_eq!(count(&conn, table), 0, "{table} should be empty after down");
    }
}

#[test]
fn test_quotes_in_titles_survive() {
    let generated = run(vec![vec!["80", "HTTP", "Rack 19'' 2U", "O'Reilly Networks"]]);

    let conn = database();
    conn.execute_batch(generated.script.up()).unwrap();

    let title: String = conn
        .query_row("SELECT title FROM brands", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "O'Reilly Networks");

    let model: String = conn
        .query_row("SELECT title FROM models", [], |row| row.get(0))
        .unwrap();
    assert_eq!(model, "Rack 19'' 2U");
}

// ===== Data quality =====

#[test]
fn test_skipped_rows_never_break_integrity() {
    let generated = run(vec![
        vec!["80", "HTTP", "X1", "Acme"],
        vec!["81", "", "X2", "Acme"],
        vec!["82", "HTTP", "X3", ""],
        vec!["abc", "HTTP", "X4", "Acme"],
        vec!["END"],
        vec!["99", "HTTP", "X9", "Late"],
    ]);

    let report = &generated.report;
    assert_eq!(report.data_rows, 4);
    assert_eq!(report.count(&IssueKind::MissingProtocol), 1);
    assert_eq!(report.count(&IssueKind::MissingBrand), 1);
    assert_eq!(report.count(&IssueKind::InvalidPort), 1);
    assert_eq!(generated.equipments.len(), 2);

    let conn = database();
    conn.execute_batch(generated.script.up()).unwrap();
    assert_eq!(count(&conn, "equipments"), 2);

    let late: i64 = conn
        .query_row("SELECT COUNT(*) FROM brands WHERE title = 'Late'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(late, 0);
}

// ===== Sources =====

#[test]
fn test_xlsx_to_migration_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ggg.xlsx");
    let output = dir.path().join("migration.sql");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    let rows: [(f64, &str, &str, &str); 3] = [
        (80.0, "HTTP", "ModelX", "BrandY"),
        (80.0, "HTTP", "ModelZ", "BrandY"),
        (502.0, "Modbus", "PLC-1", "Siemens"),
    ];
    for (col, title) in ["Port", "Protocol", "Model", "Brand"].iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    for (i, (port, protocol, model, brand)) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_number(r, 0, *port).unwrap();
        sheet.write_string(r, 1, *protocol).unwrap();
        sheet.write_string(r, 2, *model).unwrap();
        sheet.write_string(r, 3, *brand).unwrap();
    }
    sheet.write_string(4, 0, "end of list").unwrap();
    sheet.write_number(5, 0, 8080.0).unwrap();
    sheet.write_string(5, 1, "HTTP").unwrap();
    sheet.write_string(5, 2, "Ignored").unwrap();
    sheet.write_string(5, 3, "Ignored").unwrap();
    workbook.save(&input).unwrap();

    let source = open_source(&input, None).unwrap();
    let generated = generate_from_source(&*source).unwrap();

    assert_eq!(generated.report.data_rows, 3);
    assert_eq!(generated.registry.counts().brands, 2);
    assert_eq!(generated.registry.port("80").unwrap().value, 80);
    assert!(generated.registry.model("Ignored").is_none());
    assert!(generated.report.is_clean());

    write_migration(&output, &generated.script).unwrap();
    let sql = std::fs::read_to_string(&output).unwrap();

    let conn = database();
    conn.execute_batch(&sql).unwrap();
}

#[test]
fn test_csv_source_matches_workbook_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ports.csv");
    std::fs::write(
        &input,
        "Port,Protocol,Model,Brand\n80,HTTP,ModelX,BrandY\n80,HTTP,ModelZ,BrandY\nEND\n443,HTTPS,X,Y\n",
    )
    .unwrap();

    let source = open_source(&input, None).unwrap();
    let generated = generate_from_source(&*source).unwrap();

    assert_eq!(generated.report.data_rows, 2);
    assert_eq!(generated.registry.counts().models, 2);
    assert_eq!(generated.equipments.len(), 2);
    assert!(generated.registry.port("443").is_none());
}

#[test]
fn test_issue_rows_match_workbook_rows_below_blank_lead() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("offset.xlsx");

    // Header on sheet row 2, data on row 3 with an empty brand
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in ["Port", "Protocol", "Model", "Brand"].iter().enumerate() {
        sheet.write_string(1, col as u16, *title).unwrap();
    }
    sheet.write_number(2, 0, 80.0).unwrap();
    sheet.write_string(2, 1, "HTTP").unwrap();
    sheet.write_string(2, 2, "X1").unwrap();
    workbook.save(&input).unwrap();

    let source = open_source(&input, None).unwrap();
    let generated = generate_from_source(&*source).unwrap();

    let empty_brand = IssueKind::EmptyCell {
        entity: EntityKind::Brand,
    };
    let rows: Vec<usize> = generated.report.issues_of(&empty_brand).map(|i| i.row).collect();
    assert_eq!(rows, vec![3]);
    assert!(generated
        .report
        .issues_of(&IssueKind::MissingBrand)
        .all(|i| i.row == 3));
}

#[test]
fn test_issue_rows_match_csv_lines_across_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ports.csv");
    std::fs::write(&input, "Port,Protocol,Model,Brand\n\n80,HTTP,X1,\n").unwrap();

    let source = open_source(&input, None).unwrap();
    let generated = generate_from_source(&*source).unwrap();

    let empty_brand = IssueKind::EmptyCell {
        entity: EntityKind::Brand,
    };
    let rows: Vec<usize> = generated.report.issues_of(&empty_brand).map(|i| i.row).collect();
    assert_eq!(rows, vec![3]);
}
