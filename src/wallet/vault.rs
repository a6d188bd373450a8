// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Seed sealing for at-rest storage.
//!
//! Callers only depend on the [`SeedVault`] trait, so the reference AES-GCM
//! implementation can be replaced by an envelope/KMS-backed one without
//! touching them.
//!
//! ## Sealed format
//!
//! ```text
//! v1:<base64(nonce[12] || ciphertext || tag[16])>
//! ```

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm,
};
use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::ledger::error::{XrplError, XrplResult};

const SEALED_PREFIX: &str = "v1:";
const NONCE_LEN: usize = 12;
const KEY_DERIVATION_LABEL: &[u8] = b"xrpl-workflow-engine/seed-vault/v1";

/// Reversible protection of wallet seeds.
pub trait SeedVault: Send + Sync {
    /// Seal a plaintext seed for storage.
    fn seal(&self, seed: &str) -> XrplResult<String>;

    /// Recover a seed sealed by [`SeedVault::seal`].
    ///
    /// Corrupted or foreign input fails with [`XrplError::Vault`].
    fn unseal(&self, sealed: &str) -> XrplResult<Zeroizing<String>>;
}

/// AES-256-GCM vault with a key derived from a configured secret.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AesGcmSeedVault {
    key: [u8; 32],
}

impl AesGcmSeedVault {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Derive the vault key as HMAC-SHA256(secret, label).
    pub fn from_secret(secret: &str) -> XrplResult<Self> {
        if secret.len() < 16 {
            return Err(XrplError::Configuration(
                "seed vault secret must be at least 16 bytes".into(),
            ));
        }
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(secret.as_bytes())
            .map_err(|e| XrplError::Configuration(format!("invalid vault secret: {e}")))?;
        mac.update(KEY_DERIVATION_LABEL);
        let mut key = [0u8; 32];
        key.copy_from_slice(&mac.finalize().into_bytes());
        Ok(Self::new(key))
    }

    fn cipher(&self) -> XrplResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| XrplError::Vault(format!("invalid vault key: {e}")))
    }
}

impl std::fmt::Debug for AesGcmSeedVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AesGcmSeedVault(<redacted>)")
    }
}

impl SeedVault for AesGcmSeedVault {
    fn seal(&self, seed: &str) -> XrplResult<String> {
        let cipher = self.cipher()?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, seed.as_bytes())
            .map_err(|e| XrplError::Vault(format!("seal failed: {e}")))?;

        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(format!("{SEALED_PREFIX}{}", Base64::encode_string(&sealed)))
    }

    fn unseal(&self, sealed: &str) -> XrplResult<Zeroizing<String>> {
        let encoded = sealed
            .trim()
            .strip_prefix(SEALED_PREFIX)
            .ok_or_else(|| XrplError::Vault("unrecognised sealed seed format".into()))?;
        let raw = Base64::decode_vec(encoded)
            .map_err(|e| XrplError::Vault(format!("sealed seed is not base64: {e}")))?;
        if raw.len() <= NONCE_LEN {
            return Err(XrplError::Vault("sealed seed is truncated".into()));
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|_| XrplError::Vault("sealed seed is truncated".into()))?;
        let plaintext = Zeroizing::new(
            self.cipher()?
                .decrypt(&nonce.into(), ciphertext)
                .map_err(|_| XrplError::Vault("sealed seed failed authentication".into()))?,
        );

        let seed = std::str::from_utf8(&plaintext)
            .map_err(|_| XrplError::Vault("unsealed seed is not UTF-8".into()))?;
        Ok(Zeroizing::new(seed.to_string()))
    }
}
