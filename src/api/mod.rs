// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    ledger::{
        AccountProjection, LifecycleState, Network, NetworkSelector, TerminalReason,
        TransactionOutcome,
    },
    state::AppState,
    workflow::{
        GenerateWalletProps, GeneratedWallet, LoadAccountProps, SendPaymentProps, WorkflowRow,
    },
};

pub mod health;
pub mod records;
pub mod tools;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/tools/generate-wallet", post(tools::generate_wallet))
        .route("/tools/send-payment", post(tools::send_payment))
        .route("/tools/load-account", post(tools::load_account))
        .route("/records/{table}/{id}", get(records::get_record))
        .route("/variables/{name}", get(records::get_variable))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        tools::generate_wallet,
        tools::send_payment,
        tools::load_account,
        records::get_record,
        records::get_variable
    ),
    components(
        schemas(
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse,
            records::VariableResponse,
            Network,
            NetworkSelector,
            GenerateWalletProps,
            GeneratedWallet,
            SendPaymentProps,
            TransactionOutcome,
            LifecycleState,
            TerminalReason,
            LoadAccountProps,
            AccountProjection,
            WorkflowRow
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Tools", description = "Wallet generation, payments and account loading"),
        (name = "Records", description = "Rows and variables written by the tools")
    )
)]
struct ApiDoc;
