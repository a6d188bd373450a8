// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! XRP Ledger integration.
//!
//! This module provides functionality for:
//! - Resolving network selections to RPC, faucet and explorer endpoints
//! - Reading account, fee and ledger state over JSON-RPC
//! - Constructing, signing and submitting XRP payments
//! - Tracking a submission to a validated or expired outcome

pub mod account;
pub mod amount;
pub mod client;
pub mod codec;
pub mod error;
pub mod faucet;
pub mod lifecycle;
pub mod payment;
pub mod signing;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;

pub use account::{AccountLoader, AccountProjection};
pub use amount::XrpAmount;
pub use client::{JsonRpcClient, LedgerClient};
pub use error::{XrplError, XrplResult};
pub use lifecycle::{
    LifecycleConfig, LifecycleState, TerminalReason, TransactionLifecycle, TransactionOutcome,
};
pub use payment::UnsignedPayment;
pub use signing::SignedTransaction;
pub use types::*;
