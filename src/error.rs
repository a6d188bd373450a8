// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ledger::XrplError;
use crate::workflow::WorkflowError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<XrplError> for ApiError {
    fn from(err: XrplError) -> Self {
        let message = err.to_string();
        match err {
            XrplError::Configuration(_)
            | XrplError::InvalidSeed(_)
            | XrplError::Vault(_)
            | XrplError::InvalidAmount(_)
            | XrplError::InvalidAddress(_)
            | XrplError::IncompletePayment(_) => Self::bad_request(message),
            XrplError::AddressMismatch { .. } | XrplError::UnfundedAccount(_) => {
                Self::unprocessable(message)
            }
            XrplError::AccountNotFound(_) => Self::not_found(message),
            XrplError::Transport(_) | XrplError::LedgerStateUnavailable => {
                Self::unavailable(message)
            }
            XrplError::Protocol(_)
            | XrplError::Signing(_)
            | XrplError::Expired { .. } => {
                tracing::error!(error = %message, "Request failed");
                Self::internal(message)
            }
        }
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::Ledger(e) => e.into(),
            WorkflowError::IncompleteRecord(_) => Self::bad_request(message),
            WorkflowError::Sink(_) => {
                tracing::error!(error = %message, "Sink write failed");
                Self::internal(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);

        let unp = ApiError::unprocessable("oops");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn ledger_errors_map_to_statuses() {
        let cases = [
            (XrplError::InvalidAmount("x".into()), StatusCode::BAD_REQUEST),
            (XrplError::Configuration("x".into()), StatusCode::BAD_REQUEST),
            (
                XrplError::AddressMismatch {
                    declared: "a".into(),
                    derived: "b".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (XrplError::AccountNotFound("r".into()), StatusCode::NOT_FOUND),
            (XrplError::Transport("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (XrplError::Vault("bad".into()), StatusCode::BAD_REQUEST),
            (XrplError::Protocol("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
        assert_eq!(
            ApiError::from(WorkflowError::Ledger(XrplError::InvalidSeed("s".into()))).status,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
