// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment tool.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use super::error::WorkflowResult;
use super::{is_unresolved, set_if_configured, LedgerAccess, ToolOutput, VariableSink};
use crate::ledger::{
    LedgerClient, LifecycleConfig, NetworkSelector, TransactionLifecycle, TransactionOutcome,
};
use crate::wallet::{SeedVault, Wallet};

/// Configuration of a payment step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SendPaymentProps {
    pub network: NetworkSelector,
    /// Address the workflow believes owns `wallet_seed`
    pub origin_address: String,
    /// Sealed seed as stored by the generation tool
    pub wallet_seed: String,
    pub destination_address: String,
    /// Decimal XRP, at most 6 fractional digits
    pub amount: String,
    pub status_variable: String,
    pub explorer_url_variable: String,
    pub validated_variable: String,
}

/// Pay `amount` from the sealed-seed wallet and publish the outcome.
///
/// Returns [`ToolOutput::NoData`] without touching the vault or the ledger
/// when any input is empty or an unresolved placeholder. Variables are set
/// for every terminal outcome, including expiry and rejection. Once a
/// payment has been attempted its outcome is returned even if a variable
/// write fails.
pub async fn send_payment<C: LedgerClient>(
    props: &SendPaymentProps,
    ledger: &LedgerAccess<'_, C>,
    config: &LifecycleConfig,
    cancel: CancellationToken,
    vault: &dyn SeedVault,
    variables: &dyn VariableSink,
) -> WorkflowResult<ToolOutput<TransactionOutcome>> {
    let inputs = [
        &props.origin_address,
        &props.wallet_seed,
        &props.destination_address,
        &props.amount,
    ];
    if inputs.iter().any(|v| is_unresolved(v)) {
        tracing::info!("Payment inputs are incomplete, skipping");
        return Ok(ToolOutput::NoData);
    }

    let seed = vault.unseal(props.wallet_seed.trim())?;
    let wallet = Wallet::from_seed(&seed, props.network.is_test())?;
    drop(seed);

    let outcome = TransactionLifecycle::new(ledger.client, ledger.endpoints, config)
        .with_cancellation(cancel)
        .send_payment(
            &wallet,
            props.origin_address.trim(),
            props.destination_address.trim(),
            &props.amount,
        )
        .await?;

    let validated = outcome.validated.to_string();
    let published = [
        (&props.status_variable, Some(outcome.status.as_str())),
        (&props.explorer_url_variable, outcome.explorer_url.as_deref()),
        (&props.validated_variable, Some(validated.as_str())),
    ];
    for (name, value) in published {
        let Some(value) = value else { continue };
        if let Err(e) = set_if_configured(variables, name, value) {
            tracing::warn!(
                variable = %name,
                hash = outcome.hash.as_deref(),
                error = %e,
                "Failed to publish payment outcome variable"
            );
        }
    }

    Ok(ToolOutput::Data(outcome))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ledger::testing::{view, MockLedger};
    use crate::ledger::{LifecycleState, Network, XrplError};
    use crate::store::InMemoryStore;
    use crate::wallet::AesGcmSeedVault;
    use crate::workflow::WorkflowError;

    const SECRET: &str = "test-vault-secret-0123456789";
    const GENESIS_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
    const GENESIS_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const DESTINATION: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    fn config() -> LifecycleConfig {
        LifecycleConfig {
            poll_interval: Duration::from_millis(1),
            max_wait: Some(Duration::from_secs(5)),
            ledger_margin: 4,
        }
    }

    fn props(vault: &AesGcmSeedVault) -> SendPaymentProps {
        SendPaymentProps {
            network: NetworkSelector::new(Network::Testnet),
            origin_address: GENESIS_ADDRESS.into(),
            wallet_seed: vault.seal(GENESIS_SEED).unwrap(),
            destination_address: DESTINATION.into(),
            amount: "10.123456".into(),
            status_variable: "status".into(),
            explorer_url_variable: "explorerUrl".into(),
            validated_variable: "validated".into(),
        }
    }

    #[tokio::test]
    async fn validated_payment_sets_variables() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_views([view(false), view(true)]);
        let endpoints = NetworkSelector::new(Network::Testnet).resolve().unwrap();
        let http = reqwest::Client::new();
        let access = LedgerAccess { client: &ledger, endpoints: &endpoints, http: &http };
        let vault = AesGcmSeedVault::from_secret(SECRET).unwrap();
        let store = InMemoryStore::new();

        let output = send_payment(
            &props(&vault),
            &access,
            &config(),
            CancellationToken::new(),
            &vault,
            &store,
        )
        .await
        .unwrap();

        let ToolOutput::Data(outcome) = output else {
            panic!("expected an outcome, got {output:?}");
        };
        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(store.variable("status").as_deref(), Some("validated"));
        assert_eq!(store.variable("validated").as_deref(), Some("true"));
        assert_eq!(store.variable("explorerUrl"), outcome.explorer_url);
    }

    #[tokio::test]
    async fn expired_payment_still_reports() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000)
            .queue_indexes([Ok(1000), Ok(1005)]);
        let endpoints = NetworkSelector::new(Network::Testnet).resolve().unwrap();
        let http = reqwest::Client::new();
        let access = LedgerAccess { client: &ledger, endpoints: &endpoints, http: &http };
        let vault = AesGcmSeedVault::from_secret(SECRET).unwrap();
        let store = InMemoryStore::new();

        send_payment(&props(&vault), &access, &config(), CancellationToken::new(), &vault, &store)
            .await
            .unwrap();

        assert_eq!(store.variable("status").as_deref(), Some("expired"));
        assert_eq!(store.variable("validated").as_deref(), Some("false"));
    }

    struct UnavailableVariables {
        attempts: std::sync::Mutex<Vec<String>>,
    }

    impl VariableSink for UnavailableVariables {
        fn set_variable(&self, name: &str, _value: &str) -> WorkflowResult<()> {
            self.attempts.lock().unwrap().push(name.to_string());
            Err(WorkflowError::Sink("variable store unavailable".into()))
        }
    }

    #[tokio::test]
    async fn variable_failures_do_not_lose_the_outcome() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000).queue_views([view(true)]);
        let endpoints = NetworkSelector::new(Network::Testnet).resolve().unwrap();
        let http = reqwest::Client::new();
        let access = LedgerAccess { client: &ledger, endpoints: &endpoints, http: &http };
        let vault = AesGcmSeedVault::from_secret(SECRET).unwrap();
        let variables = UnavailableVariables { attempts: Default::default() };

        let output = send_payment(
            &props(&vault),
            &access,
            &config(),
            CancellationToken::new(),
            &vault,
            &variables,
        )
        .await
        .unwrap();

        let ToolOutput::Data(outcome) = output else {
            panic!("expected an outcome, got {output:?}");
        };
        assert_eq!(outcome.status, LifecycleState::Validated);
        assert_eq!(ledger.submitted(), vec![outcome.hash.clone().unwrap()]);
        assert_eq!(
            *variables.attempts.lock().unwrap(),
            vec!["status", "explorerUrl", "validated"]
        );
    }

    #[tokio::test]
    async fn placeholders_skip_without_side_effects() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let endpoints = NetworkSelector::default().resolve().unwrap();
        let http = reqwest::Client::new();
        let access = LedgerAccess { client: &ledger, endpoints: &endpoints, http: &http };
        let vault = AesGcmSeedVault::from_secret(SECRET).unwrap();
        let store = InMemoryStore::new();

        let mut props = props(&vault);
        props.destination_address = "#form.payment.destination#".into();
        let output = send_payment(&props, &access, &config(), CancellationToken::new(), &vault, &store)
            .await
            .unwrap();

        assert_eq!(output, ToolOutput::NoData);
        assert_eq!(ledger.calls(), 0);
        assert!(store.variables().is_empty());
    }

    #[tokio::test]
    async fn seed_for_another_origin_is_a_mismatch() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let endpoints = NetworkSelector::default().resolve().unwrap();
        let http = reqwest::Client::new();
        let access = LedgerAccess { client: &ledger, endpoints: &endpoints, http: &http };
        let vault = AesGcmSeedVault::from_secret(SECRET).unwrap();
        let store = InMemoryStore::new();

        let mut props = props(&vault);
        props.origin_address = DESTINATION.into();
        let err = send_payment(&props, &access, &config(), CancellationToken::new(), &vault, &store)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Ledger(XrplError::AddressMismatch { .. })
        ));
        assert!(ledger.submitted().is_empty());
        assert!(store.variables().is_empty());
    }

    #[tokio::test]
    async fn foreign_sealed_seed_is_a_vault_error() {
        let ledger = MockLedger::funded(GENESIS_ADDRESS, 5, 10, 1000);
        let endpoints = NetworkSelector::default().resolve().unwrap();
        let http = reqwest::Client::new();
        let access = LedgerAccess { client: &ledger, endpoints: &endpoints, http: &http };
        let vault = AesGcmSeedVault::from_secret(SECRET).unwrap();
        let other = AesGcmSeedVault::from_secret("another-vault-secret-987654").unwrap();
        let store = InMemoryStore::new();

        let err = send_payment(&props(&other), &access, &config(), CancellationToken::new(), &vault, &store)
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Ledger(XrplError::Vault(_))));
        assert_eq!(ledger.calls(), 0);
    }
}
