// 🧾 SQL Emitter - INSERT statements + goose migration document
//
// Rows are joined, never comma-stripped, so zero rows cannot leave a
// dangling VALUES. An empty table renders a no-op INSERT ... WHERE false.

use crate::entities::{Brand, Equipment, Model, Port, Protocol};
use crate::registry::EntityRegistry;
use std::fmt;

// ============================================================================
// TARGET SCHEMA
// ============================================================================

/// A table of the target schema, columns in insert order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    fn column_list(&self) -> String {
        self.columns.join(", ")
    }
}

pub static BRANDS: TableSchema = TableSchema {
    name: "brands",
    columns: &["id", "title", "created_at"],
};

pub static PROTOCOLS: TableSchema = TableSchema {
    name: "protocols",
    columns: &["id", "title", "created_at"],
};

pub static MODELS: TableSchema = TableSchema {
    name: "models",
    columns: &["id", "title", "brand_id", "created_at"],
};

pub static PORTS: TableSchema = TableSchema {
    name: "ports",
    columns: &["id", "protocol_id", "port", "created_at"],
};

pub static EQUIPMENTS: TableSchema = TableSchema {
    name: "equipments",
    columns: &["id", "model_id", "port_id", "is_published", "created_at"],
};

/// Parents first: the order inserts must run in
pub static INSERT_ORDER: [&TableSchema; 5] = [&BRANDS, &PROTOCOLS, &MODELS, &PORTS, &EQUIPMENTS];

/// Children first: the order deletes must run in
pub static DELETE_ORDER: [&TableSchema; 5] = [&EQUIPMENTS, &MODELS, &PORTS, &BRANDS, &PROTOCOLS];

// ============================================================================
// VALUES
// ============================================================================

/// One SQL literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlValue<'a> {
    /// Single-quoted, embedded quotes doubled
    Text(&'a str),
    Int(i64),
    Bool(bool),
    /// Generation-time timestamp, evaluated by the database
    Now,
    Null,
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            SqlValue::Int(value) => write!(f, "{}", value),
            SqlValue::Bool(value) => write!(f, "{}", value),
            SqlValue::Now => f.write_str("now()"),
            SqlValue::Null => f.write_str("NULL"),
        }
    }
}

/// An entity that maps onto one row of a target table
pub trait SqlRow {
    fn schema() -> &'static TableSchema;

    /// Values in `schema().columns` order
    fn values(&self) -> Vec<SqlValue<'_>>;
}

impl SqlRow for Brand {
    fn schema() -> &'static TableSchema {
        &BRANDS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![SqlValue::Text(&self.id), SqlValue::Text(&self.title), SqlValue::Now]
    }
}

impl SqlRow for Protocol {
    fn schema() -> &'static TableSchema {
        &PROTOCOLS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![SqlValue::Text(&self.id), SqlValue::Text(&self.title), SqlValue::Now]
    }
}

impl SqlRow for Model {
    fn schema() -> &'static TableSchema {
        &MODELS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            SqlValue::Text(&self.id),
            SqlValue::Text(&self.title),
            SqlValue::Text(&self.brand_id),
            SqlValue::Now,
        ]
    }
}

impl SqlRow for Port {
    fn schema() -> &'static TableSchema {
        &PORTS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            SqlValue::Text(&self.id),
            SqlValue::Text(&self.protocol_id),
            SqlValue::Int(self.value),
            SqlValue::Now,
        ]
    }
}

impl SqlRow for Equipment {
    fn schema() -> &'static TableSchema {
        &EQUIPMENTS
    }

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            SqlValue::Text(&self.id),
            SqlValue::Text(&self.model_id),
            SqlValue::Text(&self.port_id),
            SqlValue::Bool(self.is_published),
            SqlValue::Now,
        ]
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// Render one multi-row INSERT for a collection of entities
pub fn render_insert<'a, T, I>(rows: I) -> String
where
    T: SqlRow + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let schema = T::schema();

    let tuples: Vec<String> = rows
        .into_iter()
        .map(|row| render_tuple(&row.values()))
        .collect();

    if tuples.is_empty() {
        return render_empty_insert(schema);
    }

    format!(
        "INSERT INTO {} ({})\nVALUES\n    {};",
        schema.name,
        schema.column_list(),
        tuples.join(",\n    ")
    )
}

/// Valid INSERT that inserts nothing
fn render_empty_insert(schema: &TableSchema) -> String {
    let nulls = vec![SqlValue::Null; schema.columns.len()];
    let select = nulls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) SELECT {} WHERE false;",
        schema.name,
        schema.column_list(),
        select
    )
}

fn render_tuple(values: &[SqlValue<'_>]) -> String {
    let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("({})", rendered.join(", "))
}

pub fn render_delete(schema: &TableSchema) -> String {
    format!("DELETE FROM {};", schema.name)
}

// ============================================================================
// MIGRATION DOCUMENT
// ============================================================================

/// A goose migration: "up" inserts every entity, "down" empties the tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    up: String,
    down: String,
}

impl MigrationScript {
    /// Render the five inserts (brands, protocols, models, ports,
    /// equipments) and the five deletes (reverse dependency order)
    pub fn from_parts(registry: &EntityRegistry, equipments: &[Equipment]) -> Self {
        let up = [
            render_insert(registry.brands()),
            render_insert(registry.protocols()),
            render_insert(registry.models()),
            render_insert(registry.ports()),
            render_insert(equipments),
        ]
        .join("\n");

        let down = DELETE_ORDER
            .iter()
            .map(|schema| render_delete(schema))
            .collect::<Vec<_>>()
            .join("\n");

        MigrationScript { up, down }
    }

    /// Statements applied by `goose up`
    pub fn up(&self) -> &str {
        &self.up
    }

    /// Statements applied by `goose down`
    pub fn down(&self) -> &str {
        &self.down
    }
}

impl fmt::Display for MigrationScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- +goose Up")?;
        writeln!(f, "-- +goose StatementBegin")?;
        writeln!(f, "{}", self.up)?;
        writeln!(f, "-- +goose StatementEnd")?;
        writeln!(f)?;
        writeln!(f, "-- +goose Down")?;
        writeln!(f, "-- +goose StatementBegin")?;
        writeln!(f, "{}", self.down)?;
        writeln!(f, "-- +goose StatementEnd")
    }
}

// ============================================================================
// TESTS
// ============================================================================
