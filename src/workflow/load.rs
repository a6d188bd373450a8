// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account load tool.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::WorkflowResult;
use super::row::WorkflowRow;
use super::{is_unresolved, ToolOutput};
use crate::ledger::{AccountLoader, LedgerClient, NetworkSelector, XrplError};

/// Configuration of an account load step. Each `*_field` names the record
/// field receiving that value; empty names are not mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadAccountProps {
    pub network: NetworkSelector,
    pub wallet_address: String,
    pub is_validated_field: String,
    pub balance_field: String,
    /// Receives the last transaction that modified the account
    pub last_tx_to_account_field: String,
    /// Receives the last transaction sent by the account
    pub last_tx_of_account_field: String,
    pub domain_field: String,
    pub email_hash_field: String,
    pub owner_count_field: String,
}

/// Load the configured account into a record keyed by its address.
pub async fn load_account<C: LedgerClient>(
    props: &LoadAccountProps,
    client: &C,
) -> WorkflowResult<ToolOutput<WorkflowRow>> {
    if is_unresolved(&props.wallet_address) {
        return Ok(ToolOutput::NoData);
    }
    let address = props.wallet_address.trim();

    let account = match AccountLoader::new(client).load(address).await {
        Ok(account) => account,
        Err(XrplError::AccountNotFound(_)) => {
            tracing::warn!(account = %address, "Account does not exist or is not funded");
            return Ok(ToolOutput::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    let row = WorkflowRow::builder(address)
        .field(&props.is_validated_field, account.validated.to_string())
        .field(&props.balance_field, account.balance_xrp)
        .field(&props.last_tx_to_account_field, account.previous_txn_id)
        .field(
            &props.last_tx_of_account_field,
            account.account_txn_id.unwrap_or_default(),
        )
        .field(&props.domain_field, account.domain.unwrap_or_default())
        .field(&props.email_hash_field, account.email_hash.unwrap_or_default())
        .field(&props.owner_count_field, account.owner_count.to_string())
        .build()?;

    Ok(ToolOutput::Data(row))
}
