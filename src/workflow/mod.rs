// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Workflow-facing tools.
//!
//! Each tool reads its configuration from a properties struct and writes its
//! results through the injected [`OutcomeSink`] and [`VariableSink`]. An empty
//! target name (table, field or variable) means "not configured" and the
//! corresponding write is skipped.
//!
//! ## Tools
//!
//! - [`generate_wallet`] - create, seal and optionally fund a wallet
//! - [`send_payment`] - pay from a sealed-seed wallet and track the outcome
//! - [`load_account`] - project an account into a record

pub mod error;
pub mod generate;
pub mod load;
pub mod row;
pub mod send;

pub use error::{WorkflowError, WorkflowResult};
pub use generate::{generate_wallet, GenerateWalletProps, GeneratedWallet};
pub use load::{load_account, LoadAccountProps};
pub use row::{RowBuilder, WorkflowRow};
pub use send::{send_payment, SendPaymentProps};

use reqwest::Client;

use crate::ledger::EndpointSet;

/// Persists records produced by a tool.
pub trait OutcomeSink: Send + Sync {
    fn store_row(&self, table: &str, row: WorkflowRow) -> WorkflowResult<()>;
}

/// Receives workflow variables produced by a tool.
pub trait VariableSink: Send + Sync {
    fn set_variable(&self, name: &str, value: &str) -> WorkflowResult<()>;
}

/// Ledger access for one tool invocation.
pub struct LedgerAccess<'a, C> {
    pub client: &'a C,
    pub endpoints: &'a EndpointSet,
    /// Shared pool for faucet calls
    pub http: &'a Client,
}

/// Result of a tool that may legitimately have nothing to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput<T> {
    /// Input was empty or an unresolved placeholder
    NoData,
    /// The account does not exist on the ledger
    NotFound,
    Data(T),
}

/// Empty values and unresolved `#...#` form placeholders.
pub(crate) fn is_unresolved(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.starts_with('#')
}

/// Set `name` unless it is unconfigured.
pub(crate) fn set_if_configured(
    sink: &dyn VariableSink,
    name: &str,
    value: &str,
) -> WorkflowResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }
    sink.set_variable(name, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn placeholders_are_unresolved() {
        assert!(is_unresolved(""));
        assert!(is_unresolved("  "));
        assert!(is_unresolved("#variable.origin#"));
        assert!(!is_unresolved("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe"));
    }

    #[test]
    fn unconfigured_variables_are_skipped() {
        let store = InMemoryStore::new();
        set_if_configured(&store, "", "value").unwrap();
        set_if_configured(&store, "status", "success").unwrap();
        assert_eq!(store.variables().len(), 1);
        assert_eq!(store.variable("status").as_deref(), Some("success"));
    }
}
