// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Canonical binary encoding of a Payment.
//!
//! Only the fields an XRP-to-XRP Payment carries are supported. Fields are
//! written in canonical order, sorted by (type code, field code):
//!
//! | Field | Type | Code | Header |
//! |-------|------|------|--------|
//! | TransactionType | UInt16 | 1/2 | `12` |
//! | Flags | UInt32 | 2/2 | `22` |
//! | Sequence | UInt32 | 2/4 | `24` |
//! | LastLedgerSequence | UInt32 | 2/27 | `20 1B` |
//! | Amount | Amount | 6/1 | `61` |
//! | Fee | Amount | 6/8 | `68` |
//! | SigningPubKey | Blob | 7/3 | `73` |
//! | TxnSignature | Blob | 7/4 | `74` |
//! | Account | AccountID | 8/1 | `81` |
//! | Destination | AccountID | 8/3 | `83` |

use super::amount::XrpAmount;
use super::error::{XrplError, XrplResult};
use super::payment::UnsignedPayment;
use crate::wallet::address::decode_classic_address;

/// Prefix hashed in front of a transaction when signing (`STX\0`).
pub const SIGNING_PREFIX: [u8; 4] = [0x53, 0x54, 0x58, 0x00];

/// Prefix hashed in front of a signed blob to obtain its ID (`TXN\0`).
pub const TRANSACTION_ID_PREFIX: [u8; 4] = [0x54, 0x58, 0x4E, 0x00];

const TRANSACTION_TYPE_PAYMENT: u16 = 0;

// Type codes
const ST_UINT16: u8 = 1;
const ST_UINT32: u8 = 2;
const ST_AMOUNT: u8 = 6;
const ST_BLOB: u8 = 7;
const ST_ACCOUNT: u8 = 8;

fn field_header(out: &mut Vec<u8>, type_code: u8, field_code: u8) {
    match (type_code < 16, field_code < 16) {
        (true, true) => out.push((type_code << 4) | field_code),
        (true, false) => {
            out.push(type_code << 4);
            out.push(field_code);
        }
        (false, true) => {
            out.push(field_code);
            out.push(type_code);
        }
        (false, false) => {
            out.push(0);
            out.push(type_code);
            out.push(field_code);
        }
    }
}

fn variable_length(out: &mut Vec<u8>, len: usize) -> XrplResult<()> {
    if len <= 192 {
        out.push(len as u8);
    } else if len <= 12_480 {
        let len = len - 193;
        out.push(193 + (len >> 8) as u8);
        out.push((len & 0xFF) as u8);
    } else {
        return Err(XrplError::Signing(format!("blob of {len} bytes is too long")));
    }
    Ok(())
}

fn xrp_amount(out: &mut Vec<u8>, amount: XrpAmount) {
    // bit 63 clear: native XRP; bit 62 set: positive
    out.extend_from_slice(&(amount.drops() | 0x4000_0000_0000_0000).to_be_bytes());
}

fn blob(out: &mut Vec<u8>, field_code: u8, bytes: &[u8]) -> XrplResult<()> {
    field_header(out, ST_BLOB, field_code);
    variable_length(out, bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(())
}

fn account(out: &mut Vec<u8>, field_code: u8, address: &str) -> XrplResult<()> {
    let id = decode_classic_address(address)?;
    field_header(out, ST_ACCOUNT, field_code);
    variable_length(out, id.len())?;
    out.extend_from_slice(&id);
    Ok(())
}

/// Serialize a payment, with `signature` when present.
pub fn encode_payment(payment: &UnsignedPayment, signature: Option<&[u8]>) -> XrplResult<Vec<u8>> {
    let signing_pub_key = hex::decode(payment.signing_pub_key())
        .map_err(|e| XrplError::Signing(format!("signing public key is not hex: {e}")))?;

    let mut out = Vec::with_capacity(200);

    field_header(&mut out, ST_UINT16, 2);
    out.extend_from_slice(&TRANSACTION_TYPE_PAYMENT.to_be_bytes());

    field_header(&mut out, ST_UINT32, 2);
    out.extend_from_slice(&payment.flags().to_be_bytes());

    field_header(&mut out, ST_UINT32, 4);
    out.extend_from_slice(&payment.sequence().to_be_bytes());

    field_header(&mut out, ST_UINT32, 27);
    out.extend_from_slice(&payment.last_ledger_sequence().to_be_bytes());

    field_header(&mut out, ST_AMOUNT, 1);
    xrp_amount(&mut out, payment.amount());

    field_header(&mut out, ST_AMOUNT, 8);
    xrp_amount(&mut out, payment.fee());

    blob(&mut out, 3, &signing_pub_key)?;
    if let Some(signature) = signature {
        blob(&mut out, 4, signature)?;
    }

    account(&mut out, 1, payment.account())?;
    account(&mut out, 3, payment.destination())?;

    Ok(out)
}
