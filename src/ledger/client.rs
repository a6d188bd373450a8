// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger client: JSON-RPC access to a validating node.
//!
//! The client performs no retries. Network faults surface as
//! [`XrplError::Transport`], node-side rejections as [`XrplError::Protocol`],
//! so the lifecycle engine can decide what is safe to repeat.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::amount::XrpAmount;
use super::error::{XrplError, XrplResult};
use super::signing::SignedTransaction;
use super::types::{
    AccountSnapshot, EndpointSet, LedgerIndex, NetworkSelector, SubmitAck, TransactionView,
};

/// Per-request timeout for RPC calls.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(15);

/// Read and submit operations against a ledger node.
pub trait LedgerClient: Send + Sync {
    /// Fetch the account root. `AccountNotFound` when the address has never
    /// been funded.
    fn account_info(
        &self,
        address: &str,
        require_validated: bool,
    ) -> impl Future<Output = XrplResult<AccountSnapshot>> + Send;

    /// Open-ledger transaction cost.
    fn current_open_ledger_fee(&self) -> impl Future<Output = XrplResult<XrpAmount>> + Send;

    /// Index of the most recent validated ledger.
    fn latest_validated_ledger_index(
        &self,
    ) -> impl Future<Output = XrplResult<LedgerIndex>> + Send;

    /// Submit a signed blob. The acknowledgement is not validation.
    fn submit(
        &self,
        tx: &SignedTransaction,
    ) -> impl Future<Output = XrplResult<SubmitAck>> + Send;

    /// Look a transaction up by hash.
    fn transaction_by_hash(
        &self,
        hash: &str,
    ) -> impl Future<Output = XrplResult<TransactionView>> + Send;
}

/// Outcome of a single RPC call at the protocol level.
enum RpcReply {
    Result(Value),
    Error { code: String, message: String },
}

/// `rippled` JSON-RPC client.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    endpoints: EndpointSet,
    http: Client,
}

impl JsonRpcClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(endpoints: EndpointSet) -> XrplResult<Self> {
        let http = Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| XrplError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http(http, endpoints))
    }

    /// Create a client sharing an existing HTTP connection pool.
    pub fn with_http(http: Client, endpoints: EndpointSet) -> Self {
        Self { endpoints, http }
    }

    /// Resolve the selector and create a client for it.
    pub fn for_network(http: Client, selector: &NetworkSelector) -> XrplResult<Self> {
        Ok(Self::with_http(http, selector.resolve()?))
    }

    async fn call(&self, method: &str, params: Value) -> XrplResult<RpcReply> {
        let body = json!({ "method": method, "params": [params] });

        let response = self
            .http
            .post(&self.endpoints.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| XrplError::Transport(format!("{method}: {e}")))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(XrplError::Protocol(format!("{method}: HTTP {status}")));
        }
        if !status.is_success() {
            return Err(XrplError::Transport(format!("{method}: HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| XrplError::Transport(format!("{method}: {e}")))?;
        let mut envelope: Value = serde_json::from_str(&text)
            .map_err(|e| XrplError::Protocol(format!("{method}: invalid JSON response: {e}")))?;

        let result = envelope
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| XrplError::Protocol(format!("{method}: response has no result")))?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let code = result
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let message = result
                .get("error_message")
                .or_else(|| result.get("error_exception"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            tracing::debug!(method, code = %code, "Node returned RPC error");
            return Ok(RpcReply::Error { code, message });
        }

        Ok(RpcReply::Result(result))
    }
}

fn parse_result<T: DeserializeOwned>(method: &str, value: Value) -> XrplResult<T> {
    serde_json::from_value(value)
        .map_err(|e| XrplError::Protocol(format!("{method}: unexpected result shape: {e}")))
}

fn rpc_error(method: &str, code: &str, message: &str) -> XrplError {
    if message.is_empty() {
        XrplError::Protocol(format!("{method}: {code}"))
    } else {
        XrplError::Protocol(format!("{method}: {code}: {message}"))
    }
}

#[derive(Deserialize)]
struct AccountInfoResult {
    account_data: AccountRoot,
    #[serde(default)]
    validated: bool,
}

#[derive(Deserialize)]
struct AccountRoot {
    #[serde(rename = "Account")]
    account: String,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Sequence")]
    sequence: u32,
    #[serde(rename = "OwnerCount", default)]
    owner_count: u32,
    #[serde(rename = "PreviousTxnID", default)]
    previous_txn_id: String,
    #[serde(rename = "AccountTxnID")]
    account_txn_id: Option<String>,
    #[serde(rename = "Domain")]
    domain: Option<String>,
    #[serde(rename = "EmailHash")]
    email_hash: Option<String>,
}

#[derive(Deserialize)]
struct FeeResult {
    drops: FeeDrops,
}

#[derive(Deserialize)]
struct FeeDrops {
    open_ledger_fee: String,
}

#[derive(Deserialize)]
struct LedgerResult {
    ledger_index: Option<LedgerIndex>,
    #[serde(default)]
    validated: bool,
}

#[derive(Deserialize)]
struct SubmitResult {
    engine_result: String,
    engine_result_message: Option<String>,
    accepted: Option<bool>,
}

#[derive(Deserialize)]
struct TxResult {
    #[serde(default)]
    validated: bool,
    status: Option<String>,
    meta: Option<TxMeta>,
}

#[derive(Deserialize)]
struct TxMeta {
    #[serde(rename = "TransactionResult")]
    transaction_result: Option<String>,
}

impl LedgerClient for JsonRpcClient {
    async fn account_info(
        &self,
        address: &str,
        require_validated: bool,
    ) -> XrplResult<AccountSnapshot> {
        let ledger_index = if require_validated { "validated" } else { "current" };
        let params = json!({
            "account": address,
            "ledger_index": ledger_index,
            "strict": true,
        });

        let result: AccountInfoResult = match self.call("account_info", params).await? {
            RpcReply::Result(value) => parse_result("account_info", value)?,
            RpcReply::Error { code, .. } if code == "actNotFound" => {
                return Err(XrplError::AccountNotFound(address.to_string()));
            }
            RpcReply::Error { code, message } => {
                return Err(rpc_error("account_info", &code, &message));
            }
        };

        let root = result.account_data;
        let balance = XrpAmount::parse_drops(&root.balance)
            .map_err(|e| XrplError::Protocol(format!("account_info: {e}")))?;

        Ok(AccountSnapshot {
            address: root.account,
            sequence: root.sequence,
            balance,
            owner_count: root.owner_count,
            domain: root.domain,
            email_hash: root.email_hash,
            previous_txn_id: root.previous_txn_id,
            account_txn_id: root.account_txn_id,
            validated: result.validated,
        })
    }

    async fn current_open_ledger_fee(&self) -> XrplResult<XrpAmount> {
        match self.call("fee", json!({})).await? {
            RpcReply::Result(value) => {
                let fee: FeeResult = parse_result("fee", value)?;
                XrpAmount::parse_drops(&fee.drops.open_ledger_fee)
                    .map_err(|e| XrplError::Protocol(format!("fee: {e}")))
            }
            RpcReply::Error { code, message } => Err(rpc_error("fee", &code, &message)),
        }
    }

    async fn latest_validated_ledger_index(&self) -> XrplResult<LedgerIndex> {
        let params = json!({ "ledger_index": "validated" });
        match self.call("ledger", params).await? {
            RpcReply::Result(value) => {
                let ledger: LedgerResult = parse_result("ledger", value)?;
                match ledger.ledger_index {
                    Some(index) if ledger.validated => Ok(index),
                    _ => Err(XrplError::LedgerStateUnavailable),
                }
            }
            RpcReply::Error { code, .. } if code == "lgrNotFound" || code == "noNetwork" => {
                Err(XrplError::LedgerStateUnavailable)
            }
            RpcReply::Error { code, message } => Err(rpc_error("ledger", &code, &message)),
        }
    }

    async fn submit(&self, tx: &SignedTransaction) -> XrplResult<SubmitAck> {
        let params = json!({ "tx_blob": tx.tx_blob() });
        match self.call("submit", params).await? {
            RpcReply::Result(value) => {
                let result: SubmitResult = parse_result("submit", value)?;
                Ok(SubmitAck {
                    engine_result: result.engine_result,
                    engine_result_message: result.engine_result_message,
                    accepted: result.accepted,
                })
            }
            RpcReply::Error { code, message } => Err(rpc_error("submit", &code, &message)),
        }
    }

    async fn transaction_by_hash(&self, hash: &str) -> XrplResult<TransactionView> {
        let params = json!({ "transaction": hash });
        match self.call("tx", params).await? {
            RpcReply::Result(value) => {
                let result: TxResult = parse_result("tx", value)?;
                Ok(TransactionView {
                    found: true,
                    validated: result.validated,
                    status: result.status.unwrap_or_else(|| "success".to_string()),
                    result_code: result.meta.and_then(|m| m.transaction_result),
                })
            }
            RpcReply::Error { code, .. } if code == "txnNotFound" => {
                Ok(TransactionView::not_found())
            }
            RpcReply::Error { code, message } => Err(rpc_error("tx", &code, &message)),
        }
    }
}
