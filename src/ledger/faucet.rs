// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test-network faucet funding.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::error::{XrplError, XrplResult};
use super::types::EndpointSet;

/// Faucet acknowledgement. Funding is not yet validated when it arrives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaucetGrant {
    /// Funded amount in XRP, as reported by the faucet
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub hash: Option<String>,
}

/// Ask the faucet behind `endpoints` to fund `address`.
///
/// Fails with [`XrplError::Configuration`] on networks without a faucet.
pub async fn fund_account(
    http: &Client,
    endpoints: &EndpointSet,
    address: &str,
) -> XrplResult<FaucetGrant> {
    let faucet_url = endpoints.faucet_url.as_deref().ok_or_else(|| {
        XrplError::Configuration("the selected network has no faucet".to_string())
    })?;
    let url = format!("{}/accounts", faucet_url.trim_end_matches('/'));

    let response = http
        .post(&url)
        .json(&json!({ "destination": address }))
        .send()
        .await
        .map_err(|e| XrplError::Transport(format!("faucet: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(if status.is_server_error() {
            XrplError::Transport(format!("faucet: HTTP {status}"))
        } else {
            XrplError::Protocol(format!("faucet: HTTP {status}: {body}"))
        });
    }

    let grant: FaucetGrant = response
        .json()
        .await
        .map_err(|e| XrplError::Protocol(format!("faucet: invalid response: {e}")))?;

    tracing::info!(account = %address, amount = ?grant.amount, "Faucet funded account");
    Ok(grant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;

    const ADDRESS: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    async fn spawn_faucet() -> String {
        let app = Router::new()
            .route(
                "/accounts",
                post(|Json(body): Json<Value>| async move {
                    if body["destination"] == ADDRESS {
                        (
                            StatusCode::OK,
                            Json(json!({
                                "account": { "classicAddress": ADDRESS },
                                "amount": 100,
                                "hash": "ABCD"
                            })),
                        )
                    } else {
                        (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid" })))
                    }
                }),
            )
            .route(
                "/down/accounts",
                post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn endpoints(faucet_url: Option<String>) -> EndpointSet {
        EndpointSet {
            rpc_url: "http://127.0.0.1:1/".into(),
            faucet_url,
            explorer_base_url: "https://testnet.xrpl.org/transactions/".into(),
        }
    }

    #[tokio::test]
    async fn funds_destination() {
        let base = spawn_faucet().await;
        let grant = fund_account(&Client::new(), &endpoints(Some(base)), ADDRESS)
            .await
            .unwrap();
        assert_eq!(grant.amount, Some(100.0));
        assert_eq!(grant.hash.as_deref(), Some("ABCD"));
    }

    #[tokio::test]
    async fn refusal_and_outage_are_distinct() {
        let base = spawn_faucet().await;
        let http = Client::new();

        let err = fund_account(&http, &endpoints(Some(base.clone())), "rUnknown")
            .await
            .unwrap_err();
        assert!(matches!(err, XrplError::Protocol(_)));

        let err = fund_account(&http, &endpoints(Some(format!("{base}/down/"))), ADDRESS)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn mainnet_has_no_faucet() {
        let err = fund_account(&Client::new(), &endpoints(None), ADDRESS)
            .await
            .unwrap_err();
        assert!(matches!(err, XrplError::Configuration(_)));
    }
}
