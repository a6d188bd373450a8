// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::ledger::XrplError;

/// Errors raised by the workflow tools.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Ledger(#[from] XrplError),

    #[error("Record is missing required field `{0}`")]
    IncompleteRecord(&'static str),

    #[error("Sink rejected write: {0}")]
    Sink(String),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
