// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet generation and deterministic key derivation.
//!
//! Wallets use secp256k1 keys derived from a 16-byte family seed:
//!
//! ```text
//! root         = first valid SHA-512-half(seed || u32be(i))
//! root_pub     = compressed(root * G)
//! intermediate = first valid SHA-512-half(root_pub || u32be(0) || u32be(j))
//! private      = root + intermediate (mod n)
//! ```
//!
//! The seed is held in zeroizing memory and is never logged or returned by
//! `Debug`.

use std::fmt;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::rand_core::{OsRng, RngCore};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, SecretKey};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use super::address::{
    account_id, decode_check, encode_check, encode_classic_address, encode_x_address,
    ED25519_SEED_PREFIX, FAMILY_SEED_VERSION,
};
use crate::ledger::error::{XrplError, XrplResult};

/// Length of the seed entropy in bytes.
pub const SEED_ENTROPY_LEN: usize = 16;

/// First 32 bytes of a SHA-512 digest.
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let digest = Sha512::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..32]);
    out
}

/// A secp256k1 private key scoped to signing.
///
/// The inner key zeroizes on drop.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Parse a raw 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> XrplResult<Self> {
        SigningKey::from_slice(bytes)
            .map(Self)
            .map_err(|e| XrplError::Signing(format!("malformed private key: {e}")))
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.0
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.0
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A derived wallet.
#[derive(Clone)]
pub struct Wallet {
    seed: Zeroizing<String>,
    private_key: PrivateKey,
    public_key: String,
    classic_address: String,
    x_address: String,
    is_test: bool,
}

impl Wallet {
    /// Generate a wallet from fresh OS entropy.
    pub fn generate(is_test: bool) -> XrplResult<Self> {
        let mut entropy = Zeroizing::new([0u8; SEED_ENTROPY_LEN]);
        OsRng.fill_bytes(&mut entropy[..]);
        Self::from_entropy(&entropy, is_test)
    }

    /// Derive a wallet from an encoded family seed (`s...`).
    pub fn from_seed(seed: &str, is_test: bool) -> XrplResult<Self> {
        let entropy = decode_seed(seed)?;
        Self::from_entropy(&entropy, is_test)
    }

    fn from_entropy(entropy: &[u8; SEED_ENTROPY_LEN], is_test: bool) -> XrplResult<Self> {
        let seed = encode_seed(entropy);
        let private_key = derive_private_key(entropy)?;
        let public_key_bytes = private_key.public_key_bytes();
        let id = account_id(&public_key_bytes);

        Ok(Self {
            seed,
            public_key: hex::encode_upper(&public_key_bytes),
            classic_address: encode_classic_address(&id),
            x_address: encode_x_address(&id, is_test),
            private_key,
            is_test,
        })
    }

    /// The encoded seed. Must be sealed before it is persisted.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Upper-hex compressed public key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn classic_address(&self) -> &str {
        &self.classic_address
    }

    pub fn x_address(&self) -> &str {
        &self.x_address
    }

    pub fn is_test(&self) -> bool {
        self.is_test
    }

    /// Check that the caller-declared origin matches the derived address.
    pub fn ensure_origin(&self, declared: &str) -> XrplResult<()> {
        if declared.trim() == self.classic_address {
            Ok(())
        } else {
            Err(XrplError::AddressMismatch {
                declared: declared.to_string(),
                derived: self.classic_address.clone(),
            })
        }
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("classic_address", &self.classic_address)
            .field("x_address", &self.x_address)
            .field("public_key", &self.public_key)
            .field("is_test", &self.is_test)
            .finish_non_exhaustive()
    }
}

fn encode_seed(entropy: &[u8; SEED_ENTROPY_LEN]) -> Zeroizing<String> {
    let mut payload = Zeroizing::new(Vec::with_capacity(1 + SEED_ENTROPY_LEN));
    payload.push(FAMILY_SEED_VERSION);
    payload.extend_from_slice(entropy);
    Zeroizing::new(encode_check(&payload))
}

fn decode_seed(seed: &str) -> XrplResult<Zeroizing<[u8; SEED_ENTROPY_LEN]>> {
    let payload = Zeroizing::new(
        decode_check(seed.trim())
            .ok_or_else(|| XrplError::InvalidSeed("not a valid base58check seed".into()))?,
    );

    if payload.len() == ED25519_SEED_PREFIX.len() + SEED_ENTROPY_LEN
        && payload[..ED25519_SEED_PREFIX.len()] == ED25519_SEED_PREFIX
    {
        return Err(XrplError::InvalidSeed(
            "ed25519 seeds are not supported".into(),
        ));
    }
    if payload.len() != 1 + SEED_ENTROPY_LEN || payload[0] != FAMILY_SEED_VERSION {
        return Err(XrplError::InvalidSeed("unexpected seed version or length".into()));
    }

    let mut entropy = Zeroizing::new([0u8; SEED_ENTROPY_LEN]);
    entropy.copy_from_slice(&payload[1..]);
    Ok(entropy)
}

/// Hash `prefix || u32be(counter)` until the digest is a valid scalar.
fn first_valid_scalar(prefix: &[u8]) -> XrplResult<NonZeroScalar> {
    let mut buf = Zeroizing::new(Vec::with_capacity(prefix.len() + 4));
    for counter in 0u32..=u32::MAX {
        buf.clear();
        buf.extend_from_slice(prefix);
        buf.extend_from_slice(&counter.to_be_bytes());
        let candidate = Zeroizing::new(sha512_half(&buf));
        if let Ok(secret) = SecretKey::from_slice(&candidate[..]) {
            return Ok(secret.to_nonzero_scalar());
        }
    }
    Err(XrplError::InvalidSeed("no valid scalar for seed".into()))
}

fn derive_private_key(entropy: &[u8; SEED_ENTROPY_LEN]) -> XrplResult<PrivateKey> {
    let root = first_valid_scalar(entropy)?;
    let root_public = SecretKey::from(root)
        .public_key()
        .to_encoded_point(true);

    let mut prefix = Vec::with_capacity(33 + 4);
    prefix.extend_from_slice(root_public.as_bytes());
    // account index, always 0 for family seeds
    prefix.extend_from_slice(&0u32.to_be_bytes());
    let intermediate = first_valid_scalar(&prefix)?;

    let sum = *root + *intermediate;
    let scalar: Option<NonZeroScalar> = NonZeroScalar::new(sum).into();
    let scalar = scalar.ok_or_else(|| XrplError::InvalidSeed("derived key is zero".into()))?;

    Ok(PrivateKey(SigningKey::from(scalar)))
}
