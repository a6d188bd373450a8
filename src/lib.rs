// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! XRPL Workflow Engine - Wallet custody and payment lifecycle for the XRP Ledger
//!
//! This crate generates and custodies wallets, builds and signs XRP payments,
//! submits them to a `rippled` node and tracks each one to a validated or
//! expired outcome. Workflow tools expose these operations to an external
//! forms layer through injected sinks.
//!
//! ## Modules
//!
//! - `api` - HTTP adapter (Axum)
//! - `ledger` - XRP Ledger client, payment construction, signing and lifecycle
//! - `wallet` - Key derivation, address encoding and seed sealing
//! - `workflow` - Generate / send / load tools writing to injected sinks
//! - `store` - In-memory sink implementation

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod state;
pub mod store;
pub mod wallet;
pub mod workflow;
