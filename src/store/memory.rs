use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{validate_table, Filter, Query, Row, SortDirection, StoreError, TableStore};

/// In-process table store keyed by table name.
///
/// Mirrors the hosted store closely enough for the HTTP and service layers: rows keep
/// insertion order, `id` is a unique key, and every primitive returns the affected rows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table directly, bypassing key checks
    pub async fn seed(&self, table: &str, rows: Vec<Row>) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    /// Snapshot of every row currently stored in `table`
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        let tables = self.tables.read().await;
        tables.get(table).cloned().unwrap_or_default()
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // nulls sort last ascending
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
        validate_table(table)?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| query.filter.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(&order.column), b.get(&order.column));
                match order.sort {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        validate_table(table)?;
        let mut tables = self.tables.write().await;
        let existing = tables.entry(table.to_string()).or_default();

        for row in &rows {
            if let Some(id) = row.get("id") {
                if existing.iter().any(|r| r.get("id") == Some(id)) {
                    return Err(StoreError::upstream(
                        409,
                        format!("duplicate key value violates unique constraint \"{}_pkey\"", table),
                    ));
                }
            }
        }

        existing.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Row) -> Result<Vec<Row>, StoreError> {
        validate_table(table)?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|r| filter.matches(r)) {
            for (k, v) in &patch {
                row.insert(k.clone(), v.clone());
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Row>, StoreError> {
        validate_table(table)?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<Row>, Vec<Row>) = rows.drain(..).partition(|r| filter.matches(r));
        *rows = kept;
        Ok(removed)
    }
}
