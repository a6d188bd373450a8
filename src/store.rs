// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory collaborator store.
//!
//! Stands in for the workflow layer's form storage and variable store. Rows
//! are upserted by `(table, id)`; variables are last-write-wins.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::workflow::{OutcomeSink, VariableSink, WorkflowError, WorkflowResult, WorkflowRow};

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, BTreeMap<String, WorkflowRow>>>,
    variables: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, table: &str, id: &str) -> Option<WorkflowRow> {
        self.tables
            .read()
            .ok()?
            .get(table)
            .and_then(|rows| rows.get(id))
            .cloned()
    }

    /// Total number of rows across all tables.
    pub fn row_count(&self) -> usize {
        self.tables
            .read()
            .map(|tables| tables.values().map(BTreeMap::len).sum())
            .unwrap_or_default()
    }

    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.read().ok()?.get(name).cloned()
    }

    pub fn variables(&self) -> BTreeMap<String, String> {
        self.variables
            .read()
            .map(|vars| vars.clone())
            .unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> WorkflowError {
    WorkflowError::Sink("store lock poisoned".to_string())
}

impl OutcomeSink for InMemoryStore {
    fn store_row(&self, table: &str, row: WorkflowRow) -> WorkflowResult<()> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        tracing::debug!(table, id = %row.id, fields = row.fields.len(), "Storing row");
        tables
            .entry(table.to_string())
            .or_default()
            .insert(row.id.clone(), row);
        Ok(())
    }
}

impl VariableSink for InMemoryStore {
    fn set_variable(&self, name: &str, value: &str) -> WorkflowResult<()> {
        let mut variables = self.variables.write().map_err(poisoned)?;
        variables.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_upserted_by_id() {
        let store = InMemoryStore::new();
        let first = WorkflowRow::builder("r1").field("balance", "1").build().unwrap();
        let second = WorkflowRow::builder("r1").field("balance", "2").build().unwrap();
        store.store_row("wallets", first).unwrap();
        store.store_row("wallets", second).unwrap();

        assert_eq!(store.row_count(), 1);
        assert_eq!(store.row("wallets", "r1").unwrap().get("balance"), Some("2"));
        assert!(store.row("accounts", "r1").is_none());
    }

    #[test]
    fn variables_are_last_write_wins() {
        let store = InMemoryStore::new();
        store.set_variable("status", "pending").unwrap();
        store.set_variable("status", "validated").unwrap();
        assert_eq!(store.variable("status").as_deref(), Some("validated"));
        assert!(store.variable("missing").is_none());
    }
}
