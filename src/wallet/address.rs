// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Base58Check encoding with the XRP Ledger alphabet.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::ledger::error::{XrplError, XrplResult};

/// Version byte of a classic account address (`r...`).
pub const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Version byte of a secp256k1 family seed (`s...`).
pub const FAMILY_SEED_VERSION: u8 = 0x21;

/// Version prefix of an Ed25519 seed (`sEd...`).
pub const ED25519_SEED_PREFIX: [u8; 3] = [0x01, 0xE1, 0x4B];

const X_ADDRESS_MAIN_PREFIX: [u8; 2] = [0x05, 0x44];
const X_ADDRESS_TEST_PREFIX: [u8; 2] = [0x04, 0x93];

const CHECKSUM_LEN: usize = 4;

/// 20-byte account identifier.
pub type AccountId = [u8; 20];

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encode `payload` followed by its double-SHA-256 checksum.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

/// Decode a Base58Check string and verify its checksum.
///
/// Returns the payload (version bytes included, checksum stripped).
pub fn decode_check(encoded: &str) -> Option<Vec<u8>> {
    let mut data = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .ok()?;
    if data.len() <= CHECKSUM_LEN {
        return None;
    }
    let split = data.len() - CHECKSUM_LEN;
    if checksum(&data[..split]) != data[split..] {
        return None;
    }
    data.truncate(split);
    Some(data)
}

/// RIPEMD-160(SHA-256(public key)).
pub fn account_id(public_key: &[u8]) -> AccountId {
    let digest = Ripemd160::digest(Sha256::digest(public_key));
    let mut id = [0u8; 20];
    id.copy_from_slice(&digest);
    id
}

pub fn encode_classic_address(id: &AccountId) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(ACCOUNT_ID_VERSION);
    payload.extend_from_slice(id);
    encode_check(&payload)
}

/// Decode an `r...` address into its account ID.
pub fn decode_classic_address(address: &str) -> XrplResult<AccountId> {
    let payload = decode_check(address.trim())
        .ok_or_else(|| XrplError::InvalidAddress(format!("`{address}` is not a valid address")))?;
    if payload.len() != 21 || payload[0] != ACCOUNT_ID_VERSION {
        return Err(XrplError::InvalidAddress(format!(
            "`{address}` is not a classic account address"
        )));
    }
    let mut id = [0u8; 20];
    id.copy_from_slice(&payload[1..]);
    Ok(id)
}

/// X-address without a destination tag.
pub fn encode_x_address(id: &AccountId, is_test: bool) -> String {
    let mut payload = Vec::with_capacity(31);
    payload.extend_from_slice(if is_test {
        &X_ADDRESS_TEST_PREFIX
    } else {
        &X_ADDRESS_MAIN_PREFIX
    });
    payload.extend_from_slice(id);
    // flags byte (no tag) followed by a zeroed 64-bit tag
    payload.push(0x00);
    payload.extend_from_slice(&[0u8; 8]);
    encode_check(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn classic_address_round_trip() {
        let id = decode_classic_address(GENESIS_ADDRESS).unwrap();
        assert_eq!(encode_classic_address(&id), GENESIS_ADDRESS);
    }

    #[test]
    fn corrupted_address_is_rejected() {
        let mut corrupted = GENESIS_ADDRESS.to_string();
        corrupted.replace_range(5..6, "z");
        assert!(decode_classic_address(&corrupted).is_err());
        assert!(decode_classic_address("").is_err());
        assert!(decode_classic_address("0xdeadbeef").is_err());
    }

    #[test]
    fn x_address_encodes_network_class() {
        let id = decode_classic_address(GENESIS_ADDRESS).unwrap();
        let main = encode_x_address(&id, false);
        let test = encode_x_address(&id, true);
        assert!(main.starts_with('X'), "{main}");
        assert!(test.starts_with('T'), "{test}");
        assert_ne!(main, test);

        let payload = decode_check(&test).unwrap();
        assert_eq!(payload.len(), 31);
        assert_eq!(&payload[2..22], &id);
    }
}
