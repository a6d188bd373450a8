// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet generation tool.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::WorkflowResult;
use super::row::WorkflowRow;
use super::{set_if_configured, LedgerAccess, OutcomeSink, VariableSink};
use crate::ledger::faucet::fund_account;
use crate::ledger::{LedgerClient, NetworkSelector};
use crate::wallet::{SeedVault, Wallet};

/// Status reported for an address the ledger does not know yet.
pub const NOT_INITIALIZED: &str = "Not initialized";

/// Configuration of a wallet generation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateWalletProps {
    pub network: NetworkSelector,
    /// Request faucet funding on test networks
    pub fund_test_wallet: bool,
    /// Target table; empty disables record storage
    pub record_table: String,
    pub wallet_seed_field: String,
    pub wallet_owner_field: String,
    pub wallet_owner_value: String,
    pub is_test_wallet_field: String,
    pub public_key_field: String,
    pub x_address_field: String,
    pub status_variable: String,
    pub is_test_variable: String,
}

/// Public result of a generation. The seed only leaves sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWallet {
    pub classic_address: String,
    pub x_address: String,
    pub public_key: String,
    pub is_test: bool,
    pub sealed_seed: String,
    pub funded: bool,
    /// `success` when the account exists, else `Not initialized`
    pub status: String,
}

/// Generate a wallet for the selected network and publish it.
///
/// Nothing is written to the sinks when derivation or sealing fails.
pub async fn generate_wallet<C: LedgerClient>(
    props: &GenerateWalletProps,
    ledger: &LedgerAccess<'_, C>,
    vault: &dyn SeedVault,
    outcomes: &dyn OutcomeSink,
    variables: &dyn VariableSink,
) -> WorkflowResult<GeneratedWallet> {
    let is_test = props.network.is_test();
    let wallet = Wallet::generate(is_test)?;
    let sealed_seed = vault.seal(wallet.seed())?;
    let address = wallet.classic_address();

    tracing::info!(
        account = %address,
        network = %props.network.network,
        is_test,
        "Generated wallet"
    );

    let mut funded = false;
    if props.fund_test_wallet && is_test {
        match fund_account(ledger.http, ledger.endpoints, address).await {
            Ok(_) => funded = true,
            Err(e) => tracing::warn!(account = %address, error = %e, "Faucet funding failed"),
        }
    }

    // An unfunded account is not on the ledger until it holds the reserve.
    let status = match ledger.client.account_info(address, false).await {
        Ok(_) => "success".to_string(),
        Err(e) => {
            if !e.is_account_not_found() {
                tracing::warn!(account = %address, error = %e, "Account lookup failed");
            }
            NOT_INITIALIZED.to_string()
        }
    };

    if !props.record_table.trim().is_empty() {
        let row = WorkflowRow::builder(address)
            .field(&props.wallet_seed_field, sealed_seed.as_str())
            .field(&props.wallet_owner_field, props.wallet_owner_value.as_str())
            .field(&props.is_test_wallet_field, is_test.to_string())
            .field(&props.public_key_field, wallet.public_key())
            .field(&props.x_address_field, wallet.x_address())
            .build()?;
        outcomes.store_row(props.record_table.trim(), row)?;
    }

    set_if_configured(variables, &props.status_variable, &status)?;
    set_if_configured(variables, &props.is_test_variable, &is_test.to_string())?;

    Ok(GeneratedWallet {
        classic_address: address.to_string(),
        x_address: wallet.x_address().to_string(),
        public_key: wallet.public_key().to_string(),
        is_test,
        sealed_seed,
        funded,
        status,
    })
}
