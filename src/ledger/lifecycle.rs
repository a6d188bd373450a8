// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction lifecycle engine.
//!
//! One [`TransactionLifecycle`] drives one submission attempt:
//!
//! ```text
//! Built → Signed → Submitted → Pending → { Validated | Expired | Rejected }
//! ```
//!
//! ## Submission
//!
//! A submit is never retried: a previous attempt may already be in flight on
//! the node. Any acknowledgement moves the attempt to `Pending`, whatever the
//! preliminary engine result.
//!
//! ## Polling
//!
//! Each round sleeps for the poll interval, then reads the latest validated
//! ledger index and looks the transaction up by hash. A validated lookup is
//! terminal. Otherwise, once the validated index is strictly past
//! `last_ledger_sequence` the attempt has expired. Faults during a round are
//! logged and the next round runs.
//!
//! The sleep races a [`CancellationToken`] and the optional wall-clock
//! ceiling; either ends the attempt as `Rejected` with reason `error`.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;
use uuid::Uuid;

use super::client::LedgerClient;
use super::error::{XrplError, XrplResult};
use super::payment::{self, UnsignedPayment, DEFAULT_LEDGER_MARGIN};
use super::signing::{self, SignedTransaction};
use super::types::EndpointSet;
use crate::wallet::{PrivateKey, Wallet};

/// Default delay between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(4_000);

/// Default wall-clock ceiling for the polling phase.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(120);

/// Tunables for one lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub poll_interval: Duration,
    /// `None` polls until the ledger-sequence expiry
    pub max_wait: Option<Duration>,
    pub ledger_margin: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: Some(DEFAULT_MAX_WAIT),
            ledger_margin: DEFAULT_LEDGER_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleState {
    Built,
    Signed,
    Submitted,
    Pending,
    Validated,
    Expired,
    Rejected,
}

impl LifecycleState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LifecycleState::Validated | LifecycleState::Expired | LifecycleState::Rejected
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Built => "built",
            LifecycleState::Signed => "signed",
            LifecycleState::Submitted => "submitted",
            LifecycleState::Pending => "pending",
            LifecycleState::Validated => "validated",
            LifecycleState::Expired => "expired",
            LifecycleState::Rejected => "rejected",
        }
    }
}

/// Why an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TerminalReason {
    Validated,
    Expired,
    /// Signing failed or the node refused the blob
    Rejected,
    /// Transport failure, cancellation or timeout
    Error,
}

/// Terminal report of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    /// Transaction hash; absent when signing failed
    pub hash: Option<String>,
    pub status: LifecycleState,
    pub validated: bool,
    pub explorer_url: Option<String>,
    pub reason: TerminalReason,
    /// Completed poll rounds
    pub polls: u32,
    pub last_ledger_sequence: u32,
    /// Final engine result, when validated
    pub result_code: Option<String>,
    pub detail: Option<String>,
}

/// Drives a single payment from signing to a terminal outcome.
pub struct TransactionLifecycle<'a, C> {
    client: &'a C,
    endpoints: &'a EndpointSet,
    config: &'a LifecycleConfig,
    cancel: CancellationToken,
    attempt_id: Uuid,
    state: LifecycleState,
}

impl<'a, C: LedgerClient> TransactionLifecycle<'a, C> {
    pub fn new(client: &'a C, endpoints: &'a EndpointSet, config: &'a LifecycleConfig) -> Self {
        Self {
            client,
            endpoints,
            config,
            cancel: CancellationToken::new(),
            attempt_id: Uuid::new_v4(),
            state: LifecycleState::Built,
        }
    }

    /// Stop polling when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// End-to-end payment: origin guard, construction, then [`Self::run`].
    ///
    /// Failures before signing are returned as errors and have no network
    /// effect beyond reads. From signing on exactly one outcome is returned.
    pub async fn send_payment(
        mut self,
        wallet: &Wallet,
        declared_origin: &str,
        destination: &str,
        amount: &str,
    ) -> XrplResult<TransactionOutcome> {
        wallet.ensure_origin(declared_origin)?;
        let payment = payment::build(
            self.client,
            wallet,
            destination,
            amount,
            self.config.ledger_margin,
        )
        .await?;
        Ok(self.run(wallet.private_key(), &payment).await)
    }

    /// Sign, submit and poll `payment` until it is terminal.
    pub async fn run(
        &mut self,
        private_key: &PrivateKey,
        payment: &UnsignedPayment,
    ) -> TransactionOutcome {
        let lls = payment.last_ledger_sequence();

        let signed = match signing::sign(private_key, payment) {
            Ok(signed) => signed,
            Err(e) => return self.reject(None, lls, 0, &e),
        };
        self.transition(LifecycleState::Signed);

        let ack = match self.client.submit(&signed).await {
            Ok(ack) => ack,
            Err(e) => return self.reject(Some(&signed), lls, 0, &e),
        };
        self.transition(LifecycleState::Submitted);
        tracing::info!(
            attempt_id = %self.attempt_id,
            hash = %signed.hash(),
            engine_result = %ack.engine_result,
            last_ledger_sequence = lls,
            "Transaction submitted"
        );
        self.transition(LifecycleState::Pending);

        self.poll(&signed).await
    }

    async fn poll(&mut self, signed: &SignedTransaction) -> TransactionOutcome {
        let lls = signed.payment().last_ledger_sequence();
        let deadline = self.config.max_wait.map(|max| Instant::now() + max);
        let mut polls = 0u32;

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    let err = XrplError::Transport("polling cancelled".into());
                    return self.reject(Some(signed), lls, polls, &err);
                }
                _ = wait_until(deadline) => {
                    let err = XrplError::Transport(format!(
                        "no terminal state after {polls} polls"
                    ));
                    return self.reject(Some(signed), lls, polls, &err);
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
            polls += 1;

            let index = self.client.latest_validated_ledger_index().await;
            let view = self.client.transaction_by_hash(signed.hash()).await;

            match (index, view) {
                (_, Ok(view)) if view.validated => {
                    self.transition(LifecycleState::Validated);
                    tracing::info!(
                        attempt_id = %self.attempt_id,
                        hash = %signed.hash(),
                        polls,
                        result_code = ?view.result_code,
                        "Transaction validated"
                    );
                    return self.outcome(
                        signed,
                        TerminalReason::Validated,
                        polls,
                        view.result_code,
                        None,
                    );
                }
                (Ok(index), Ok(_)) if index > lls => {
                    return self.expire(signed, index, polls);
                }
                (Ok(index), Err(e)) if index > lls && !e.is_transport() => {
                    tracing::warn!(
                        attempt_id = %self.attempt_id,
                        polls,
                        validated_index = index,
                        error = %e,
                        "Lookup refused past last ledger sequence"
                    );
                    return self.expire(signed, index, polls);
                }
                (Ok(index), Ok(view)) => {
                    tracing::debug!(
                        attempt_id = %self.attempt_id,
                        polls,
                        validated_index = index,
                        status = %view.status,
                        "Transaction pending"
                    );
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(
                        attempt_id = %self.attempt_id,
                        polls,
                        error = %e,
                        "Poll failed, retrying"
                    );
                }
            }
        }
    }

    fn expire(
        &mut self,
        signed: &SignedTransaction,
        validated: u32,
        polls: u32,
    ) -> TransactionOutcome {
        self.transition(LifecycleState::Expired);
        let err = XrplError::Expired {
            last_ledger_sequence: signed.payment().last_ledger_sequence(),
            validated,
        };
        tracing::warn!(
            attempt_id = %self.attempt_id,
            hash = %signed.hash(),
            polls,
            "{err}"
        );
        self.outcome(signed, TerminalReason::Expired, polls, None, Some(err.to_string()))
    }

    fn transition(&mut self, next: LifecycleState) {
        debug_assert!(!self.state.is_terminal(), "terminal state re-entered");
        tracing::debug!(
            attempt_id = %self.attempt_id,
            from = self.state.as_str(),
            to = next.as_str(),
            "Lifecycle transition"
        );
        self.state = next;
    }

    fn reject(
        &mut self,
        signed: Option<&SignedTransaction>,
        lls: u32,
        polls: u32,
        error: &XrplError,
    ) -> TransactionOutcome {
        self.transition(LifecycleState::Rejected);
        let reason = match error {
            XrplError::Signing(_) | XrplError::Protocol(_) => TerminalReason::Rejected,
            _ => TerminalReason::Error,
        };
        tracing::warn!(
            attempt_id = %self.attempt_id,
            hash = signed.map(|s| s.hash()),
            polls,
            error = %error,
            "Transaction rejected"
        );
        TransactionOutcome {
            hash: signed.map(|s| s.hash().to_string()),
            status: LifecycleState::Rejected,
            validated: false,
            explorer_url: signed.map(|s| self.endpoints.explorer_url(s.hash())),
            reason,
            polls,
            last_ledger_sequence: lls,
            result_code: None,
            detail: Some(error.to_string()),
        }
    }

    fn outcome(
        &self,
        signed: &SignedTransaction,
        reason: TerminalReason,
        polls: u32,
        result_code: Option<String>,
        detail: Option<String>,
    ) -> TransactionOutcome {
        TransactionOutcome {
            hash: Some(signed.hash().to_string()),
            status: self.state,
            validated: reason == TerminalReason::Validated,
            explorer_url: Some(self.endpoints.explorer_url(signed.hash())),
            reason,
            polls,
            last_ledger_sequence: signed.payment().last_ledger_sequence(),
            result_code,
            detail,
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::testing::{view, MockLedger};
    use crate::ledger::types::{Network, NetworkSelector, SubmitAck, TransactionView};

    const GENESIS_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
    const GENESIS_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const DESTINATION: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    fn fast_config() -> LifecycleConfig {
        LifecycleConfig {
            poll_interval: Duration::from_millis(1),
            max_wait: Some(Duration::from_secs(5)),
            ledger_margin: DEFAULT_LEDGER_MARGIN,
        }
    }

    fn endpoints() -> EndpointSet {
        NetworkSelector::new(Network::Testnet).resolve().unwrap()
    }

    fn wallet() -> Wallet {
        Wallet::from_seed(GENESIS_SEED, true).unwrap()
    }

    #[tokio::test]
    async fn validated_on_third_poll() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_views([view(false), view(false), view(true)]);
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "10.123456")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(outcome.reason, TerminalReason::Validated);
        assert!(outcome.validated);
        assert_eq!(outcome.polls, 3);
        assert_eq!(ledger.lookups(), 3);
        assert_eq!(outcome.last_ledger_sequence, 1004);
        assert_eq!(outcome.result_code.as_deref(), Some("tesSUCCESS"));

        let hash = outcome.hash.unwrap();
        assert_eq!(ledger.submitted(), vec![hash.clone()]);
        assert_eq!(
            outcome.explorer_url.unwrap(),
            format!("https://testnet.xrpl.org/transactions/{hash}")
        );
    }

    #[tokio::test]
    async fn expires_once_index_passes_last_ledger_sequence() {
        // construction reads 1000; the first poll sees 1005
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_indexes([Ok(1000), Ok(1005)])
            .queue_views([view(false), view(true)]);
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Expired);
        assert_eq!(outcome.reason, TerminalReason::Expired);
        assert!(!outcome.validated);
        assert_eq!(outcome.polls, 1);
        assert_eq!(ledger.lookups(), 1);
    }

    #[tokio::test]
    async fn index_equal_to_last_ledger_sequence_keeps_polling() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_indexes([Ok(1000), Ok(1004), Ok(1004)])
            .queue_views([view(false), view(false), view(true)]);
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(outcome.polls, 3);
    }

    #[tokio::test]
    async fn refused_lookups_past_last_ledger_sequence_expire() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_indexes([Ok(1000), Ok(1005), Ok(1005)])
            .queue_views([
                Err(XrplError::Protocol("invalidParams".into())),
                Err(XrplError::Protocol("invalidParams".into())),
            ]);
        let endpoints = endpoints();
        let config = LifecycleConfig {
            poll_interval: Duration::from_millis(1),
            max_wait: None,
            ledger_margin: DEFAULT_LEDGER_MARGIN,
        };

        let outcome = tokio::time::timeout(
            Duration::from_secs(2),
            TransactionLifecycle::new(&ledger, &endpoints, &config).send_payment(
                &wallet(),
                GENESIS_ADDRESS,
                DESTINATION,
                "1",
            ),
        )
        .await
        .expect("polling should terminate")
        .unwrap();

        assert_eq!(outcome.status, LifecycleState::Expired);
        assert_eq!(outcome.reason, TerminalReason::Expired);
        assert_eq!(outcome.polls, 1);
        assert_eq!(ledger.lookups(), 1);
    }

    #[tokio::test]
    async fn transport_lookup_failure_past_last_ledger_sequence_keeps_polling() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_indexes([Ok(1000), Ok(1005), Ok(1005)])
            .queue_views([Err(XrplError::Transport("reset".into())), view(true)]);
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(outcome.polls, 2);
    }

    #[tokio::test]
    async fn address_mismatch_never_touches_the_ledger() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let (endpoints, config) = (endpoints(), fast_config());

        let err = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), DESTINATION, DESTINATION, "1")
            .await
            .unwrap_err();

        assert!(matches!(err, XrplError::AddressMismatch { .. }));
        assert_eq!(ledger.calls(), 0);
        assert!(ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn transport_faults_while_polling_are_transient() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_indexes([Ok(1000), Err(XrplError::Transport("reset".into()))])
            .queue_views([
                Ok(TransactionView::not_found()),
                Err(XrplError::Transport("timeout".into())),
                view(true),
            ]);
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(outcome.polls, 3);
    }

    #[tokio::test]
    async fn submit_transport_failure_is_not_retried() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .submit_result(Err(XrplError::Transport("connection refused".into())));
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Rejected);
        assert_eq!(outcome.reason, TerminalReason::Error);
        assert_eq!(outcome.polls, 0);
        assert!(outcome.hash.is_some());
        assert_eq!(ledger.submitted().len(), 1);
        assert_eq!(ledger.lookups(), 0);
    }

    #[tokio::test]
    async fn node_refusal_is_rejected() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .submit_result(Err(XrplError::Protocol("invalidTransaction".into())));
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.reason, TerminalReason::Rejected);
        assert!(outcome.detail.unwrap().contains("invalidTransaction"));
    }

    #[tokio::test]
    async fn any_acknowledgement_moves_to_pending() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .submit_result(Ok(SubmitAck {
                engine_result: "terQUEUED".to_string(),
                engine_result_message: None,
                accepted: Some(true),
            }))
            .queue_views([view(true)]);
        let (endpoints, config) = (endpoints(), fast_config());

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(outcome.polls, 1);
    }

    #[tokio::test]
    async fn cancellation_ends_polling() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let endpoints = endpoints();
        let config = LifecycleConfig {
            poll_interval: Duration::from_secs(60),
            max_wait: None,
            ledger_margin: DEFAULT_LEDGER_MARGIN,
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .with_cancellation(cancel)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Rejected);
        assert_eq!(outcome.reason, TerminalReason::Error);
        assert_eq!(outcome.polls, 0);
        assert_eq!(ledger.lookups(), 0);
    }

    #[tokio::test]
    async fn wall_clock_ceiling_ends_polling() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let endpoints = endpoints();
        let config = LifecycleConfig {
            poll_interval: Duration::from_millis(5),
            max_wait: Some(Duration::from_millis(50)),
            ledger_margin: DEFAULT_LEDGER_MARGIN,
        };

        let outcome = TransactionLifecycle::new(&ledger, &endpoints, &config)
            .send_payment(&wallet(), GENESIS_ADDRESS, DESTINATION, "1")
            .await
            .unwrap();

        assert_eq!(outcome.status, LifecycleState::Rejected);
        assert_eq!(outcome.reason, TerminalReason::Error);
        assert!(!outcome.validated);
    }

    #[tokio::test]
    async fn foreign_key_is_rejected_without_submission() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let (endpoints, config) = (endpoints(), fast_config());
        let origin = wallet();
        let payment = payment::build(&ledger, &origin, DESTINATION, "1", 4).await.unwrap();
        let other = Wallet::generate(true).unwrap();

        let mut lifecycle = TransactionLifecycle::new(&ledger, &endpoints, &config);
        let outcome = lifecycle.run(other.private_key(), &payment).await;

        assert_eq!(outcome.reason, TerminalReason::Rejected);
        assert!(outcome.hash.is_none());
        assert_eq!(lifecycle.state(), LifecycleState::Rejected);
        assert!(ledger.submitted().is_empty());
    }
}
