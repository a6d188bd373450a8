// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account loader: a display-ready projection of an account root.

use serde::Serialize;
use utoipa::ToSchema;

use super::client::LedgerClient;
use super::error::{XrplError, XrplResult};
use super::types::AccountSnapshot;

/// Account state as exposed to the workflow layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProjection {
    pub address: String,
    /// Balance in decimal XRP
    pub balance_xrp: String,
    pub validated: bool,
    pub owner_count: u32,
    /// UTF-8 domain, or the raw hex when it does not decode
    pub domain: Option<String>,
    pub email_hash: Option<String>,
    pub previous_txn_id: String,
    pub account_txn_id: Option<String>,
}

impl From<AccountSnapshot> for AccountProjection {
    fn from(snapshot: AccountSnapshot) -> Self {
        Self {
            balance_xrp: snapshot.balance.to_xrp_string(),
            domain: snapshot.domain.as_deref().map(decode_domain),
            address: snapshot.address,
            validated: snapshot.validated,
            owner_count: snapshot.owner_count,
            email_hash: snapshot.email_hash,
            previous_txn_id: snapshot.previous_txn_id,
            account_txn_id: snapshot.account_txn_id,
        }
    }
}

fn decode_domain(raw: &str) -> String {
    hex::decode(raw)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Reads account state on behalf of callers.
pub struct AccountLoader<'a, C> {
    client: &'a C,
}

impl<'a, C: LedgerClient> AccountLoader<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Load `address` from the latest validated ledger.
    ///
    /// Empty addresses and unresolved form placeholders (`#...`) are
    /// rejected without a network call. A never-funded account yields
    /// [`XrplError::AccountNotFound`].
    pub async fn load(&self, address: &str) -> XrplResult<AccountProjection> {
        let address = address.trim();
        if address.is_empty() || address.starts_with('#') {
            return Err(XrplError::InvalidAddress(format!(
                "no account address supplied (`{address}`)"
            )));
        }

        let snapshot = self.client.account_info(address, true).await?;
        if !snapshot.validated {
            tracing::warn!(account = %address, "Account data is not from a validated ledger");
        }
        tracing::debug!(
            account = %address,
            sequence = snapshot.sequence,
            balance_drops = snapshot.balance.drops(),
            "Loaded account"
        );
        Ok(snapshot.into())
    }
}
