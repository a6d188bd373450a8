// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet custody: key derivation, address encoding and seed sealing.

pub mod address;
pub mod keys;
pub mod vault;

pub use keys::{PrivateKey, Wallet};
pub use vault::{AesGcmSeedVault, SeedVault};
