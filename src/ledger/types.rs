// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger types, network endpoints and constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::amount::XrpAmount;
use super::error::{XrplError, XrplResult};

/// Index of a ledger version.
pub type LedgerIndex = u32;

pub const TESTNET_URL: &str = "https://s.altnet.rippletest.net:51234/";
pub const DEVNET_URL: &str = "https://s.devnet.rippletest.net:51234/";
pub const GENERAL_MAINNET_URL: &str = "https://s1.ripple.com:51234/";
pub const FULL_HISTORY_MAINNET_URL: &str = "https://s2.ripple.com:51234/";

pub const TESTNET_FAUCET_URL: &str = "https://faucet.altnet.rippletest.net";
pub const DEVNET_FAUCET_URL: &str = "https://faucet.devnet.rippletest.net";

pub const TESTNET_TX_EXPLORER_URL: &str = "https://testnet.xrpl.org/transactions/";
pub const DEVNET_TX_EXPLORER_URL: &str = "https://devnet.xrpl.org/transactions/";
pub const MAINNET_TX_EXPLORER_URL: &str = "https://livenet.xrpl.org/transactions/";

/// Logical network a workflow step targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Network {
    #[default]
    Testnet,
    Devnet,
    GeneralMainnet,
    FullHistoryMainnet,
    Custom,
}

impl Network {
    /// Test networks get `T...` X-addresses and faucet access.
    pub fn is_test(self) -> bool {
        matches!(self, Network::Testnet | Network::Devnet)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::GeneralMainnet => "generalMainnet",
            Network::FullHistoryMainnet => "fullHistoryMainnet",
            Network::Custom => "custom",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = XrplError;

    /// An empty selection falls back to testnet.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "" | "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "generalMainnet" => Ok(Network::GeneralMainnet),
            "fullHistoryMainnet" => Ok(Network::FullHistoryMainnet),
            "custom" => Ok(Network::Custom),
            other => Err(XrplError::Configuration(format!(
                "unknown network selection `{other}`"
            ))),
        }
    }
}

/// Network selection plus the URL used when `network` is `custom`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct NetworkSelector {
    #[serde(default)]
    pub network: Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
}

impl NetworkSelector {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            custom_url: None,
        }
    }

    pub fn custom(url: impl Into<String>) -> Self {
        Self {
            network: Network::Custom,
            custom_url: Some(url.into()),
        }
    }

    pub fn is_test(&self) -> bool {
        self.network.is_test()
    }

    /// Map the selection to concrete endpoints. No network I/O.
    pub fn resolve(&self) -> XrplResult<EndpointSet> {
        let set = match self.network {
            Network::Testnet => EndpointSet {
                rpc_url: TESTNET_URL.to_string(),
                faucet_url: Some(TESTNET_FAUCET_URL.to_string()),
                explorer_base_url: TESTNET_TX_EXPLORER_URL.to_string(),
            },
            Network::Devnet => EndpointSet {
                rpc_url: DEVNET_URL.to_string(),
                faucet_url: Some(DEVNET_FAUCET_URL.to_string()),
                explorer_base_url: DEVNET_TX_EXPLORER_URL.to_string(),
            },
            Network::GeneralMainnet => EndpointSet::mainnet(GENERAL_MAINNET_URL),
            Network::FullHistoryMainnet => EndpointSet::mainnet(FULL_HISTORY_MAINNET_URL),
            Network::Custom => {
                let raw = self
                    .custom_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .ok_or_else(|| {
                        XrplError::Configuration("custom network requires an RPC URL".into())
                    })?;
                let url = url::Url::parse(raw).map_err(|e| {
                    XrplError::Configuration(format!("invalid custom RPC URL `{raw}`: {e}"))
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(XrplError::Configuration(format!(
                        "custom RPC URL must be http(s), got `{}`",
                        url.scheme()
                    )));
                }
                EndpointSet::mainnet(url.as_str())
            }
        };
        Ok(set)
    }
}

/// Concrete endpoints for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    /// JSON-RPC endpoint of the validating node
    pub rpc_url: String,
    /// Faucet base URL (test networks only)
    pub faucet_url: Option<String>,
    /// Transaction explorer prefix; the hash is appended
    pub explorer_base_url: String,
}

impl EndpointSet {
    fn mainnet(rpc_url: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            faucet_url: None,
            explorer_base_url: MAINNET_TX_EXPLORER_URL.to_string(),
        }
    }

    pub fn explorer_url(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_base_url, tx_hash)
    }
}

/// Projection of an account root at one point in time. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub address: String,
    pub sequence: u32,
    pub balance: XrpAmount,
    pub owner_count: u32,
    pub domain: Option<String>,
    pub email_hash: Option<String>,
    pub previous_txn_id: String,
    pub account_txn_id: Option<String>,
    /// Whether the data came from a validated ledger
    pub validated: bool,
}

/// Immediate acknowledgement of a submitted blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAck {
    /// Preliminary engine result, e.g. `tesSUCCESS` or `terQUEUED`
    pub engine_result: String,
    pub engine_result_message: Option<String>,
    pub accepted: Option<bool>,
}

/// Result of looking a transaction up by hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionView {
    /// False when the node does not know the hash yet
    pub found: bool,
    pub validated: bool,
    /// RPC status (`success`) or the lookup error code
    pub status: String,
    /// Final engine result from the metadata, once available
    pub result_code: Option<String>,
}

impl TransactionView {
    pub fn not_found() -> Self {
        Self {
            found: false,
            validated: false,
            status: "txnNotFound".to_string(),
            result_code: None,
        }
    }
}
