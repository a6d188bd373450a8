// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scripted in-process ledger for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::amount::XrpAmount;
use super::client::LedgerClient;
use super::error::{XrplError, XrplResult};
use super::signing::SignedTransaction;
use super::types::{AccountSnapshot, LedgerIndex, SubmitAck, TransactionView};

#[derive(Default)]
struct Script {
    calls: usize,
    submitted: Vec<String>,
    lookups: usize,
    /// Consumed one per `latest_validated_ledger_index` call; the fallback
    /// index is returned once empty.
    indexes: VecDeque<XrplResult<LedgerIndex>>,
    /// Consumed one per lookup; `not_found` once empty.
    views: VecDeque<XrplResult<TransactionView>>,
}

/// A [`LedgerClient`] answering from fixed state and queued responses.
pub struct MockLedger {
    accounts: HashMap<String, AccountSnapshot>,
    fee: XrpAmount,
    index: LedgerIndex,
    submit_result: XrplResult<SubmitAck>,
    script: Mutex<Script>,
}

impl MockLedger {
    /// A ledger where `address` exists with the given sequence.
    pub fn funded(address: &str, sequence: u32, fee_drops: u64, index: LedgerIndex) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            address.to_string(),
            AccountSnapshot {
                address: address.to_string(),
                sequence,
                balance: XrpAmount::from_drops(1_000 * 1_000_000).unwrap(),
                owner_count: 0,
                domain: None,
                email_hash: None,
                previous_txn_id: "0".repeat(64),
                account_txn_id: None,
                validated: true,
            },
        );
        Self {
            accounts,
            fee: XrpAmount::from_drops(fee_drops).unwrap(),
            index,
            submit_result: Ok(SubmitAck {
                engine_result: "tesSUCCESS".to_string(),
                engine_result_message: None,
                accepted: Some(true),
            }),
            script: Mutex::new(Script::default()),
        }
    }

    /// A ledger with no accounts.
    pub fn empty(index: LedgerIndex) -> Self {
        let mut ledger = Self::funded("", 0, 10, index);
        ledger.accounts.clear();
        ledger
    }

    pub fn with_account(mut self, snapshot: AccountSnapshot) -> Self {
        self.accounts.insert(snapshot.address.clone(), snapshot);
        self
    }

    /// Mark every account as read from a non-validated ledger.
    pub fn unvalidated(mut self) -> Self {
        for snapshot in self.accounts.values_mut() {
            snapshot.validated = false;
        }
        self
    }

    pub fn submit_result(mut self, result: XrplResult<SubmitAck>) -> Self {
        self.submit_result = result;
        self
    }

    pub fn queue_indexes(self, indexes: impl IntoIterator<Item = XrplResult<LedgerIndex>>) -> Self {
        self.script.lock().unwrap().indexes.extend(indexes);
        self
    }

    pub fn queue_views(
        self,
        views: impl IntoIterator<Item = XrplResult<TransactionView>>,
    ) -> Self {
        self.script.lock().unwrap().views.extend(views);
        self
    }

    /// Total number of client calls.
    pub fn calls(&self) -> usize {
        self.script.lock().unwrap().calls
    }

    /// Number of `transaction_by_hash` calls.
    pub fn lookups(&self) -> usize {
        self.script.lock().unwrap().lookups
    }

    /// Hashes of submitted transactions.
    pub fn submitted(&self) -> Vec<String> {
        self.script.lock().unwrap().submitted.clone()
    }

    fn record(&self) {
        self.script.lock().unwrap().calls += 1;
    }
}

/// A lookup result for a known transaction.
pub fn view(validated: bool) -> XrplResult<TransactionView> {
    Ok(TransactionView {
        found: true,
        validated,
        status: "success".to_string(),
        result_code: validated.then(|| "tesSUCCESS".to_string()),
    })
}

impl LedgerClient for MockLedger {
    async fn account_info(
        &self,
        address: &str,
        _require_validated: bool,
    ) -> XrplResult<AccountSnapshot> {
        self.record();
        self.accounts
            .get(address)
            .cloned()
            .ok_or_else(|| XrplError::AccountNotFound(address.to_string()))
    }

    async fn current_open_ledger_fee(&self) -> XrplResult<XrpAmount> {
        self.record();
        Ok(self.fee)
    }

    async fn latest_validated_ledger_index(&self) -> XrplResult<LedgerIndex> {
        self.record();
        let mut script = self.script.lock().unwrap();
        script.indexes.pop_front().unwrap_or(Ok(self.index))
    }

    async fn submit(&self, tx: &SignedTransaction) -> XrplResult<SubmitAck> {
        self.record();
        self.script
            .lock()
            .unwrap()
            .submitted
            .push(tx.hash().to_string());
        self.submit_result.clone()
    }

    async fn transaction_by_hash(&self, _hash: &str) -> XrplResult<TransactionView> {
        self.record();
        let mut script = self.script.lock().unwrap();
        script.lookups += 1;
        script
            .views
            .pop_front()
            .unwrap_or_else(|| Ok(TransactionView::not_found()))
    }
}
