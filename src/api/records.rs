// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-back of rows and variables written by the tools.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::workflow::WorkflowRow;

#[derive(Debug, Serialize, ToSchema)]
pub struct VariableResponse {
    pub name: String,
    pub value: String,
}

#[utoipa::path(
    get,
    path = "/v1/records/{table}/{id}",
    tag = "Records",
    params(
        ("table" = String, Path, description = "Record table"),
        ("id" = String, Path, description = "Record ID (classic address)")
    ),
    responses(
        (status = 200, description = "Stored record", body = WorkflowRow),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<Json<WorkflowRow>, ApiError> {
    state
        .store
        .row(&table, &id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Record not found"))
}

#[utoipa::path(
    get,
    path = "/v1/variables/{name}",
    tag = "Records",
    params(("name" = String, Path, description = "Variable name")),
    responses(
        (status = 200, description = "Variable value", body = VariableResponse),
        (status = 404, description = "Variable not set")
    )
)]
pub async fn get_variable(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<VariableResponse>, ApiError> {
    let value = state
        .store
        .variable(&name)
        .ok_or_else(|| ApiError::not_found("Variable not set"))?;
    Ok(Json(VariableResponse { name, value }))
}
