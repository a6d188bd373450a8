// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment construction.
//!
//! A payment is assembled once per attempt from the origin's validated
//! account state, the open-ledger fee and the latest validated ledger index.
//! Its `last_ledger_sequence` is fixed here and never recomputed.

use super::amount::XrpAmount;
use super::client::LedgerClient;
use super::error::{XrplError, XrplResult};
use crate::wallet::address::decode_classic_address;
use crate::wallet::Wallet;

/// Ledgers added to the validated index to obtain `last_ledger_sequence`.
pub const DEFAULT_LEDGER_MARGIN: u32 = 4;

/// `tfFullyCanonicalSig`.
pub const TF_FULLY_CANONICAL_SIG: u32 = 0x8000_0000;

/// A fully specified, unsigned XRP payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedPayment {
    account: String,
    destination: String,
    amount: XrpAmount,
    fee: XrpAmount,
    sequence: u32,
    last_ledger_sequence: u32,
    signing_pub_key: String,
    flags: u32,
}

impl UnsignedPayment {
    pub fn builder() -> PaymentBuilder {
        PaymentBuilder::default()
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn amount(&self) -> XrpAmount {
        self.amount
    }

    pub fn fee(&self) -> XrpAmount {
        self.fee
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn last_ledger_sequence(&self) -> u32 {
        self.last_ledger_sequence
    }

    /// Upper-hex compressed public key of the origin.
    pub fn signing_pub_key(&self) -> &str {
        &self.signing_pub_key
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }
}

/// Builder that yields an [`UnsignedPayment`] only when every required
/// field is present and valid.
#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    account: Option<String>,
    destination: Option<String>,
    amount: Option<XrpAmount>,
    fee: Option<XrpAmount>,
    sequence: Option<u32>,
    last_ledger_sequence: Option<u32>,
    signing_pub_key: Option<String>,
    flags: Option<u32>,
}

impl PaymentBuilder {
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn amount(mut self, amount: XrpAmount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn fee(mut self, fee: XrpAmount) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn last_ledger_sequence(mut self, last_ledger_sequence: u32) -> Self {
        self.last_ledger_sequence = Some(last_ledger_sequence);
        self
    }

    pub fn signing_pub_key(mut self, signing_pub_key: impl Into<String>) -> Self {
        self.signing_pub_key = Some(signing_pub_key.into());
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn build(self) -> XrplResult<UnsignedPayment> {
        let account = self.account.ok_or(XrplError::IncompletePayment("account"))?;
        let destination = self
            .destination
            .ok_or(XrplError::IncompletePayment("destination"))?;
        let amount = self.amount.ok_or(XrplError::IncompletePayment("amount"))?;
        let fee = self.fee.ok_or(XrplError::IncompletePayment("fee"))?;
        let sequence = self.sequence.ok_or(XrplError::IncompletePayment("sequence"))?;
        let last_ledger_sequence = self
            .last_ledger_sequence
            .ok_or(XrplError::IncompletePayment("last_ledger_sequence"))?;
        let signing_pub_key = self
            .signing_pub_key
            .ok_or(XrplError::IncompletePayment("signing_pub_key"))?;

        decode_classic_address(&account)?;
        decode_classic_address(&destination)?;
        if amount.is_zero() {
            return Err(XrplError::InvalidAmount("amount must be positive".into()));
        }
        if hex::decode(&signing_pub_key).map(|k| k.len()) != Ok(33) {
            return Err(XrplError::Signing(
                "signing public key must be 33 bytes of hex".into(),
            ));
        }

        Ok(UnsignedPayment {
            account,
            destination,
            amount,
            fee,
            sequence,
            last_ledger_sequence,
            signing_pub_key: signing_pub_key.to_ascii_uppercase(),
            flags: self.flags.unwrap_or(TF_FULLY_CANONICAL_SIG),
        })
    }
}

/// Assemble a payment from `origin` to `destination`.
///
/// The amount and destination are validated before any network call.
pub async fn build<C: LedgerClient>(
    client: &C,
    origin: &Wallet,
    destination: &str,
    amount: &str,
    margin_ledgers: u32,
) -> XrplResult<UnsignedPayment> {
    let amount = XrpAmount::parse_xrp(amount)?;
    if amount.is_zero() {
        return Err(XrplError::InvalidAmount("amount must be positive".into()));
    }
    decode_classic_address(destination)?;

    let snapshot = client.account_info(origin.classic_address(), true).await?;
    if !snapshot.validated {
        tracing::warn!(
            account = %origin.classic_address(),
            "Origin account data is not from a validated ledger"
        );
        return Err(XrplError::UnfundedAccount(origin.classic_address().to_string()));
    }

    let fee = client.current_open_ledger_fee().await?;
    let validated_index = client.latest_validated_ledger_index().await?;
    let last_ledger_sequence = validated_index.checked_add(margin_ledgers).ok_or_else(|| {
        XrplError::Protocol(format!("ledger index {validated_index} is out of range"))
    })?;

    tracing::debug!(
        account = %origin.classic_address(),
        sequence = snapshot.sequence,
        fee_drops = fee.drops(),
        last_ledger_sequence,
        "Constructed payment"
    );

    UnsignedPayment::builder()
        .account(origin.classic_address())
        .destination(destination.trim())
        .amount(amount)
        .fee(fee)
        .sequence(snapshot.sequence)
        .last_ledger_sequence(last_ledger_sequence)
        .signing_pub_key(origin.public_key())
        .build()
}
