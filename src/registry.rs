// 🗂️ Entity Registry - first pass over the sheet
//
// Four deduplicating maps, key → entity, first sighting wins.
// Insertion order is kept (IndexMap) so the generated SQL is stable.
//
// Each row runs four INDEPENDENT checks (brand, model, protocol, port):
// a missing parent skips only the dependent entity, never the whole row.

use crate::entities::{parse_port_value, Brand, Model, Port, Protocol};
use crate::parser::{data_rows, SheetRow};
use crate::report::{EntityKind, ImportIssue, ImportReport, IssueKind};
use indexmap::IndexMap;
use serde::Serialize;

/// Distinct entity counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryCounts {
    pub brands: usize,
    pub models: usize,
    pub protocols: usize,
    pub ports: usize,
}

// ============================================================================
// ENTITY REGISTRY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    /// brand title → Brand
    brands: IndexMap<String, Brand>,
    /// model title → Model
    models: IndexMap<String, Model>,
    /// protocol title → Protocol
    protocols: IndexMap<String, Protocol>,
    /// raw port text → Port
    ports: IndexMap<String, Port>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every data row once and register what it references
    pub fn build(rows: &[SheetRow], report: &mut ImportReport) -> Self {
        let mut registry = Self::new();

        for row in data_rows(rows) {
            registry.register_row(row, report);
        }

        let counts = registry.counts();
        tracing::info!(
            brands = counts.brands,
            models = counts.models,
            protocols = counts.protocols,
            ports = counts.ports,
            "entity registry built"
        );

        registry
    }

    /// Run the four per-row checks, in dependency order
    pub fn register_row(&mut self, row: &SheetRow, report: &mut ImportReport) {
        let line = row.line_number();

        self.ensure_brand(row.brand(), line, report);
        self.ensure_model(row.model(), row.brand(), line, report);
        self.ensure_protocol(row.protocol(), line, report);
        self.ensure_port(row.port(), row.protocol(), line, report);
    }

    /// Register a brand unless already known
    pub fn ensure_brand(
        &mut self,
        title: &str,
        line: usize,
        report: &mut ImportReport,
    ) -> Option<&Brand> {
        if title.is_empty() {
            report.record(empty_cell(line, EntityKind::Brand));
            return None;
        }

        Some(
            &*self
                .brands
                .entry(title.to_string())
                .or_insert_with(|| Brand::new(title)),
        )
    }

    /// Register a model unless already known; requires its brand
    pub fn ensure_model(
        &mut self,
        title: &str,
        brand_title: &str,
        line: usize,
        report: &mut ImportReport,
    ) -> Option<&Model> {
        if title.is_empty() {
            report.record(empty_cell(line, EntityKind::Model));
            return None;
        }

        if self.models.contains_key(title) {
            return self.models.get(title);
        }

        let Some(brand) = self.brands.get(brand_title) else {
            report.record(ImportIssue::new(line, IssueKind::MissingBrand, title));
            return None;
        };

        let model = Model::new(title, brand);
        Some(&*self.models.entry(title.to_string()).or_insert(model))
    }

    /// Register a protocol unless already known
    pub fn ensure_protocol(
        &mut self,
        title: &str,
        line: usize,
        report: &mut ImportReport,
    ) -> Option<&Protocol> {
        if title.is_empty() {
            report.record(empty_cell(line, EntityKind::Protocol));
            return None;
        }

        Some(
            &*self
                .protocols
                .entry(title.to_string())
                .or_insert_with(|| Protocol::new(title)),
        )
    }

    /// Register a port unless already known; requires its protocol
    ///
    /// A port skipped for its protocol stays unregistered and is checked
    /// again on every row that carries it. The text is only parsed once the
    /// port is registered, so `InvalidPort` is raised at most once per key.
    pub fn ensure_port(
        &mut self,
        key: &str,
        protocol_title: &str,
        line: usize,
        report: &mut ImportReport,
    ) -> Option<&Port> {
        if key.is_empty() {
            report.record(empty_cell(line, EntityKind::Port));
            return None;
        }

        if self.ports.contains_key(key) {
            return self.ports.get(key);
        }

        let Some(protocol) = self.protocols.get(protocol_title) else {
            report.record(ImportIssue::new(line, IssueKind::MissingProtocol, key));
            return None;
        };

        let value = parse_port_value(key).unwrap_or_else(|| {
            report.record(ImportIssue::new(line, IssueKind::InvalidPort, key));
            0
        });

        let port = Port::new(value, protocol);
        Some(&*self.ports.entry(key.to_string()).or_insert(port))
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn brand(&self, title: &str) -> Option<&Brand> {
        self.brands.get(title)
    }

    pub fn model(&self, title: &str) -> Option<&Model> {
        self.models.get(title)
    }

    pub fn protocol(&self, title: &str) -> Option<&Protocol> {
        self.protocols.get(title)
    }

    /// Look up a port by its raw cell text
    pub fn port(&self, key: &str) -> Option<&Port> {
        self.ports.get(key)
    }

    /// Brands in first-seen order
    pub fn brands(&self) -> impl Iterator<Item = &Brand> {
        self.brands.values()
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn protocols(&self) -> impl Iterator<Item = &Protocol> {
        self.protocols.values()
    }

    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    pub fn counts(&self) -> RegistryCounts {
        RegistryCounts {
            brands: self.brands.len(),
            models: self.models.len(),
            protocols: self.protocols.len(),
            ports: self.ports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts() == RegistryCounts::default()
    }
}

fn empty_cell(line: usize, entity: EntityKind) -> ImportIssue {
    ImportIssue::new(line, IssueKind::EmptyCell { entity }, "")
}

// ============================================================================
// TESTS
// ============================================================================
