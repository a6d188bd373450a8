// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::ledger::client::RPC_TIMEOUT;
use crate::ledger::{JsonRpcClient, LifecycleConfig, NetworkSelector, XrplError, XrplResult};
use crate::store::InMemoryStore;
use crate::wallet::SeedVault;

#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<dyn SeedVault>,
    pub store: Arc<InMemoryStore>,
    /// Shared connection pool for RPC and faucet calls
    pub http: Client,
    pub lifecycle: LifecycleConfig,
    /// Cancelled on shutdown; in-flight payment polls stop with it
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(vault: Arc<dyn SeedVault>, lifecycle: LifecycleConfig) -> XrplResult<Self> {
        let http = Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| XrplError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            vault,
            store: Arc::new(InMemoryStore::new()),
            http,
            lifecycle,
            shutdown: CancellationToken::new(),
        })
    }

    /// Ledger client for one request's network selection.
    pub fn ledger_client(&self, selector: &NetworkSelector) -> XrplResult<JsonRpcClient> {
        JsonRpcClient::for_network(self.http.clone(), selector)
    }
}
