// 🔗 Link Builder - second pass over the sheet
// Resolves (model title, port text) per row into Equipment records

use crate::entities::Equipment;
use crate::parser::{data_rows, SheetRow};
use crate::registry::EntityRegistry;
use crate::report::{ImportIssue, ImportReport, IssueKind};

/// Build one Equipment per data row whose model and port both resolve.
///
/// Re-reads `rows` from the start with the same window as the registry
/// pass. Unresolvable rows are reported and dropped.
pub fn build_equipments(
    rows: &[SheetRow],
    registry: &EntityRegistry,
    report: &mut ImportReport,
) -> Vec<Equipment> {
    let mut equipments = Vec::new();

    for row in data_rows(rows) {
        let line = row.line_number();

        let Some(model) = registry.model(row.model()) else {
            report.record(ImportIssue::new(line, IssueKind::MissingModel, row.model()));
            continue;
        };

        let Some(port) = registry.port(row.port()) else {
            report.record(ImportIssue::new(line, IssueKind::MissingPort, row.port()));
            continue;
        };

        equipments.push(Equipment::new(model, port));
    }

    tracing::info!(equipments = equipments.len(), "equipment links built");

    equipments
}
