// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction signing.
//!
//! Signing is stateless and deterministic (RFC 6979 ECDSA with low-S
//! normalisation). The private key is borrowed for the duration of the call
//! and never logged.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::Signature;

use super::codec::{encode_payment, SIGNING_PREFIX, TRANSACTION_ID_PREFIX};
use super::error::{XrplError, XrplResult};
use super::payment::UnsignedPayment;
use crate::wallet::keys::{sha512_half, PrivateKey};

/// A signed payment ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    payment: UnsignedPayment,
    signature: String,
    tx_blob: String,
    hash: String,
}

impl SignedTransaction {
    pub fn payment(&self) -> &UnsignedPayment {
        &self.payment
    }

    /// DER signature, upper-hex.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Serialized signed transaction, upper-hex.
    pub fn tx_blob(&self) -> &str {
        &self.tx_blob
    }

    /// Transaction ID used for lookups.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Sign `payment` with `private_key`.
///
/// Fails with [`XrplError::Signing`] when the key does not belong to the
/// payment's signing public key.
pub fn sign(private_key: &PrivateKey, payment: &UnsignedPayment) -> XrplResult<SignedTransaction> {
    let public_key = hex::encode_upper(private_key.public_key_bytes());
    if !public_key.eq_ignore_ascii_case(payment.signing_pub_key()) {
        return Err(XrplError::Signing(
            "private key does not match the payment's signing public key".into(),
        ));
    }

    let unsigned = encode_payment(payment, None)?;
    let mut signing_data = Vec::with_capacity(SIGNING_PREFIX.len() + unsigned.len());
    signing_data.extend_from_slice(&SIGNING_PREFIX);
    signing_data.extend_from_slice(&unsigned);
    let digest = sha512_half(&signing_data);

    let signature: Signature = private_key
        .signing_key()
        .sign_prehash(&digest)
        .map_err(|e| XrplError::Signing(format!("ECDSA signing failed: {e}")))?;
    let signature = signature.normalize_s().unwrap_or(signature);
    let der = signature.to_der();

    let signed = encode_payment(payment, Some(der.as_bytes()))?;
    let mut id_data = Vec::with_capacity(TRANSACTION_ID_PREFIX.len() + signed.len());
    id_data.extend_from_slice(&TRANSACTION_ID_PREFIX);
    id_data.extend_from_slice(&signed);

    Ok(SignedTransaction {
        payment: payment.clone(),
        signature: hex::encode_upper(der.as_bytes()),
        tx_blob: hex::encode_upper(&signed),
        hash: hex::encode_upper(sha512_half(&id_data)),
    })
}
