// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Workflow tool endpoints.
//!
//! Each request carries the tool's properties, including its network
//! selection. Results go to the shared in-memory store and are also
//! returned in the response.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiError;
use crate::ledger::{JsonRpcClient, TransactionOutcome};
use crate::state::AppState;
use crate::workflow::{
    self, GenerateWalletProps, GeneratedWallet, LedgerAccess, LoadAccountProps, SendPaymentProps,
    ToolOutput, WorkflowRow,
};

#[utoipa::path(
    post,
    path = "/v1/tools/generate-wallet",
    tag = "Tools",
    request_body = GenerateWalletProps,
    responses(
        (status = 201, description = "Wallet generated and sealed", body = GeneratedWallet),
        (status = 400, description = "Invalid network selection"),
        (status = 500, description = "Sealing or storage failed")
    )
)]
pub async fn generate_wallet(
    State(state): State<AppState>,
    Json(props): Json<GenerateWalletProps>,
) -> Result<(StatusCode, Json<GeneratedWallet>), ApiError> {
    let endpoints = props.network.resolve()?;
    let client = JsonRpcClient::with_http(state.http.clone(), endpoints.clone());
    let access = LedgerAccess {
        client: &client,
        endpoints: &endpoints,
        http: &state.http,
    };

    let generated = workflow::generate_wallet(
        &props,
        &access,
        state.vault.as_ref(),
        state.store.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(generated)))
}

#[utoipa::path(
    post,
    path = "/v1/tools/send-payment",
    tag = "Tools",
    request_body = SendPaymentProps,
    responses(
        (status = 200, description = "Terminal outcome (validated, expired or rejected)", body = TransactionOutcome),
        (status = 204, description = "Inputs empty or unresolved; nothing sent"),
        (status = 400, description = "Invalid amount, address, seed or network"),
        (status = 422, description = "Seed does not belong to the origin address, or origin unfunded"),
        (status = 503, description = "Ledger unreachable before submission")
    )
)]
pub async fn send_payment(
    State(state): State<AppState>,
    Json(props): Json<SendPaymentProps>,
) -> Result<Response, ApiError> {
    let endpoints = props.network.resolve()?;
    let client = JsonRpcClient::with_http(state.http.clone(), endpoints.clone());
    let access = LedgerAccess {
        client: &client,
        endpoints: &endpoints,
        http: &state.http,
    };

    let output = workflow::send_payment(
        &props,
        &access,
        &state.lifecycle,
        state.shutdown.child_token(),
        state.vault.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    Ok(match output {
        ToolOutput::Data(outcome) => Json(outcome).into_response(),
        ToolOutput::NoData | ToolOutput::NotFound => StatusCode::NO_CONTENT.into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/v1/tools/load-account",
    tag = "Tools",
    request_body = LoadAccountProps,
    responses(
        (status = 200, description = "Account record", body = WorkflowRow),
        (status = 204, description = "Address empty or unresolved"),
        (status = 404, description = "Account not found on the ledger"),
        (status = 503, description = "Ledger unreachable")
    )
)]
pub async fn load_account(
    State(state): State<AppState>,
    Json(props): Json<LoadAccountProps>,
) -> Result<Response, ApiError> {
    let client = state.ledger_client(&props.network)?;

    Ok(match workflow::load_account(&props, &client).await? {
        ToolOutput::Data(row) => Json(row).into_response(),
        ToolOutput::NoData => StatusCode::NO_CONTENT.into_response(),
        ToolOutput::NotFound => {
            ApiError::not_found(format!("Account {} not found", props.wallet_address.trim()))
                .into_response()
        }
    })
}
