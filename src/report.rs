// ✅ Import Report - data-quality issues found while importing a sheet
//
// Every recoverable problem (missing parent, empty key, bad port number)
// is recorded here AND logged once at warn level. Nothing in this module
// aborts a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ISSUE TYPES
// ============================================================================

/// Which entity a sheet cell feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Brand,
    Model,
    Protocol,
    Port,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Brand => "brand",
            EntityKind::Model => "model",
            EntityKind::Protocol => "protocol",
            EntityKind::Port => "port",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Key cell is empty, entity not registered
    EmptyCell { entity: EntityKind },

    /// Model skipped: its brand is not registered
    MissingBrand,

    /// Port skipped: its protocol is not registered
    MissingProtocol,

    /// Equipment skipped: model title not registered
    MissingModel,

    /// Equipment skipped: port text not registered
    MissingPort,

    /// Port text is not an integer, value defaulted to 0
    InvalidPort,
}

/// One recoverable problem, tied to the sheet row that raised it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportIssue {
    /// 1-based row number in the sheet
    pub row: usize,
    pub kind: IssueKind,
    /// The offending cell text
    pub value: String,
}

impl ImportIssue {
    pub fn new(row: usize, kind: IssueKind, value: impl Into<String>) -> Self {
        ImportIssue {
            row,
            kind,
            value: value.into(),
        }
    }

    /// Human-readable description
    pub fn message(&self) -> String {
        match &self.kind {
            IssueKind::EmptyCell { entity } => format!("empty {} cell", entity),
            IssueKind::MissingBrand => format!("can't find brand for model {}", self.value),
            IssueKind::MissingProtocol => format!("can't find protocol for port {}", self.value),
            IssueKind::MissingModel => format!("can't find model {}", self.value),
            IssueKind::MissingPort => format!("can't find port {}", self.value),
            IssueKind::InvalidPort => format!("can't convert {} to int, using 0", self.value),
        }
    }
}

// ============================================================================
// IMPORT REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub generated_at: DateTime<Utc>,

    /// Where the rows came from (path, sheet)
    pub source: String,

    /// Rows inside the data window (header, sentinel and blank rows excluded)
    pub data_rows: usize,

    pub brands: usize,
    pub models: usize,
    pub protocols: usize,
    pub ports: usize,
    pub equipments: usize,

    pub issues: Vec<ImportIssue>,
}

impl ImportReport {
    pub fn new(source: impl Into<String>) -> Self {
        ImportReport {
            generated_at: Utc::now(),
            source: source.into(),
            data_rows: 0,
            brands: 0,
            models: 0,
            protocols: 0,
            ports: 0,
            equipments: 0,
            issues: Vec::new(),
        }
    }

    /// Record an issue and log it
    pub fn record(&mut self, issue: ImportIssue) {
        tracing::warn!(row = issue.row, value = %issue.value, "{}", issue.message());
        self.issues.push(issue);
    }

    /// Issues of exactly this kind, in the order they were raised
    pub fn issues_of<'a>(
        &'a self,
        kind: &'a IssueKind,
    ) -> impl Iterator<Item = &'a ImportIssue> + 'a {
        self.issues.iter().filter(move |i| &i.kind == kind)
    }

    /// Number of issues of exactly this kind
    pub fn count(&self, kind: &IssueKind) -> usize {
        self.issues_of(kind).count()
    }

    /// Equipment rows dropped during linking
    pub fn skipped_rows(&self) -> usize {
        self.count(&IssueKind::MissingModel) + self.count(&IssueKind::MissingPort)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Rows: {}, Brands: {}, Models: {}, Protocols: {}, Ports: {}, Equipments: {}, Issues: {} ({} rows skipped)",
            self.data_rows,
            self.brands,
            self.models,
            self.protocols,
            self.ports,
            self.equipments,
            self.issues.len(),
            self.skipped_rows()
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
