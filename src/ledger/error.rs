// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy shared by the wallet, ledger client and lifecycle engine.

/// Errors that can occur while deriving wallets or transacting on the ledger.
///
/// `AccountNotFound` is an expected outcome for never-funded addresses and
/// must stay distinguishable from `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XrplError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Vault error: {0}")]
    Vault(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account data for {0} is not from a validated ledger")]
    UnfundedAccount(String),

    #[error("Validated ledger index is not available")]
    LedgerStateUnavailable,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Origin address mismatch: declared {declared}, derived {derived}")]
    AddressMismatch { declared: String, derived: String },

    #[error("Transaction expired: validated ledger {validated} passed last ledger sequence {last_ledger_sequence}")]
    Expired {
        last_ledger_sequence: u32,
        validated: u32,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Payment is missing required field `{0}`")]
    IncompletePayment(&'static str),
}

impl XrplError {
    /// Network-level failure, as opposed to a node-side rejection.
    pub fn is_transport(&self) -> bool {
        matches!(self, XrplError::Transport(_))
    }

    /// Expected "never funded" outcome.
    pub fn is_account_not_found(&self) -> bool {
        matches!(self, XrplError::AccountNotFound(_))
    }
}

/// Result type for ledger and wallet operations.
pub type XrplResult<T> = Result<T, XrplError>;
