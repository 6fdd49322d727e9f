// Equipment Migration - Core Library
// Spreadsheet rows → deduplicated entities → goose SQL migration

pub mod error;
pub mod parser;
pub mod entities;
pub mod registry;
pub mod links;
pub mod sql;
pub mod report;

use std::fs;
use std::path::Path;

// Re-export commonly used types
pub use error::{MigrationError, Result};
pub use parser::{
    data_rows, detect_format, open_source, rows_from_cells,
    CsvSource, RowSource, SheetRow, SourceFormat, WorkbookSource,
};
pub use entities::{Brand, Equipment, Model, Port, Protocol};
pub use registry::{EntityRegistry, RegistryCounts};
pub use links::build_equipments;
pub use sql::{render_insert, MigrationScript, SqlRow, SqlValue, TableSchema};
pub use report::{EntityKind, ImportIssue, ImportReport, IssueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default input spreadsheet
pub const DEFAULT_INPUT: &str = "./ggg.xlsx";

/// Default migration output
pub const DEFAULT_OUTPUT: &str = "migration.sql";

// ============================================================================
// PIPELINE
// ============================================================================

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct Generated {
    pub registry: EntityRegistry,
    pub equipments: Vec<Equipment>,
    pub script: MigrationScript,
    pub report: ImportReport,
}

/// Run both passes over `rows` and render the migration.
///
/// Never fails: data problems end up in `Generated::report`.
pub fn generate(rows: &[SheetRow], source: &str) -> Generated {
    let mut report = ImportReport::new(source);
    report.data_rows = data_rows(rows).count();

    let registry = EntityRegistry::build(rows, &mut report);
    let equipments = build_equipments(rows, &registry, &mut report);
    let script = MigrationScript::from_parts(&registry, &equipments);

    let counts = registry.counts();
    report.brands = counts.brands;
    report.models = counts.models;
    report.protocols = counts.protocols;
    report.ports = counts.ports;
    report.equipments = equipments.len();

    Generated {
        registry,
        equipments,
        script,
        report,
    }
}

/// Read every row from `source`, then `generate`
pub fn generate_from_source(source: &dyn RowSource) -> Result<Generated> {
    let rows = source.read_rows()?;
    tracing::info!(source = %source.describe(), rows = rows.len(), "rows loaded");
    Ok(generate(&rows, &source.describe()))
}

/// Write the migration document to `path` (created or truncated)
pub fn write_migration(path: &Path, script: &MigrationScript) -> Result<()> {
    fs::write(path, script.to_string()).map_err(|source| MigrationError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the import report as pretty JSON
pub fn write_report(path: &Path, report: &ImportReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| MigrationError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================
