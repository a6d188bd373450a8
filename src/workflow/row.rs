// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Records handed to an [`OutcomeSink`](super::OutcomeSink).

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::error::{WorkflowError, WorkflowResult};

/// An immutable record: an ID plus named string fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WorkflowRow {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

impl WorkflowRow {
    pub fn builder(id: impl Into<String>) -> RowBuilder {
        RowBuilder {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct RowBuilder {
    id: String,
    fields: BTreeMap<String, String>,
}

impl RowBuilder {
    /// Set `name` to `value`. An empty field name means "not mapped" and
    /// the value is dropped.
    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.fields.insert(name.to_string(), value.into());
        }
        self
    }

    pub fn build(self) -> WorkflowResult<WorkflowRow> {
        if self.id.trim().is_empty() {
            return Err(WorkflowError::IncompleteRecord("id"));
        }
        Ok(WorkflowRow {
            id: self.id,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_fields_are_skipped() {
        let row = WorkflowRow::builder("rAddress")
            .field("balance", "10")
            .field("", "dropped")
            .field("  ", "dropped")
            .build()
            .unwrap();
        assert_eq!(row.fields.len(), 1);
        assert_eq!(row.get("balance"), Some("10"));
    }

    #[test]
    fn id_is_required() {
        assert_eq!(
            WorkflowRow::builder(" ").build().unwrap_err(),
            WorkflowError::IncompleteRecord("id")
        );
    }
}
