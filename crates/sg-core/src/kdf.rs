//! Key derivation.
//!
//! A query is hashed with SHA-256, then stretched once with PBKDF2 into a
//! 32-byte [`MasterKey`]. Every individual decision (an index, a bit, a
//! token) comes from a [`SubKey`]: one HMAC-SHA256 of the master key over a
//! text label. The expensive step runs once per reading; the per-draw step
//! is cheap.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::config::{KdfConfig, KdfMode};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of master keys and sub-keys.
pub const KEY_LEN: usize = 32;

/// Length of the hex display token.
pub const TOKEN_LEN: usize = 8;

/// Slow-derived per-query key from which every decision is derived.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Derive the sub-key for `label`.
    pub fn subkey(&self, label: &str) -> SubKey {
        derive_subkey(self, label.as_bytes())
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MasterKey({}..)", &hex::encode(self.0)[..TOKEN_LEN])
    }
}

/// Keyed-hash derivative of a [`MasterKey`], used for exactly one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubKey([u8; KEY_LEN]);

impl SubKey {
    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lower-case hex of all 32 bytes.
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The first eight hex characters, used as a display token.
    pub fn token(&self) -> String {
        let mut hex = self.hex();
        hex.truncate(TOKEN_LEN);
        hex
    }

    /// Byte at `offset`, wrapping around the key length.
    pub fn byte(&self, offset: usize) -> u8 {
        self.0[offset % KEY_LEN]
    }

    /// Whether the lowest bit of the first byte is set.
    pub fn first_bit(&self) -> bool {
        self.0[0] & 1 == 1
    }

    /// Whether the lowest bit of the last byte is set.
    pub fn last_bit(&self) -> bool {
        self.0[KEY_LEN - 1] & 1 == 1
    }

    /// The bytes read as a big-endian unsigned integer, reduced modulo `n`.
    ///
    /// `n` must be non-zero.
    pub fn reduce(&self, n: usize) -> usize {
        debug_assert!(n > 0, "reduce by zero");
        let n = n as u128;
        let rem = self
            .0
            .iter()
            .fold(0u128, |acc, &b| ((acc << 8) | u128::from(b)) % n);
        rem as usize
    }
}

/// SHA-256 of the UTF-8 bytes of `text`.
pub fn seed_digest(text: &str) -> [u8; KEY_LEN] {
    Sha256::digest(text.as_bytes()).into()
}

/// Derive a master key with the default configuration.
pub fn derive_master_key(query: &str, domain_salt: &[u8]) -> MasterKey {
    derive_master_key_with(query, domain_salt, &KdfConfig::default())
}

/// Derive a master key from `query` and `domain_salt`.
///
/// Falls back to iterated SHA-256 when PBKDF2 is unavailable or disabled in
/// `config`. Both paths are deterministic and yield 32 bytes, but they do
/// not agree with each other.
pub fn derive_master_key_with(query: &str, domain_salt: &[u8], config: &KdfConfig) -> MasterKey {
    let material = seed_digest(query);
    let _span = tracing::debug_span!("derive_master_key", iterations = config.iterations).entered();

    let key = match config.mode {
        KdfMode::Pbkdf2 => match stretch_pbkdf2(&material, domain_salt, config.iterations) {
            Some(key) => key,
            None => {
                tracing::warn!("PBKDF2 unavailable, using iterated SHA-256");
                stretch_iterated(&material, domain_salt, config.iterations)
            }
        },
        KdfMode::IteratedSha256 => stretch_iterated(&material, domain_salt, config.iterations),
    };

    tracing::debug!("master key derived");
    MasterKey(key)
}

fn stretch_pbkdf2(material: &[u8], salt: &[u8], rounds: u32) -> Option<[u8; KEY_LEN]> {
    let mut out = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<HmacSha256>(material, salt, rounds, &mut out).ok()?;
    Some(out)
}

fn stretch_iterated(material: &[u8; KEY_LEN], salt: &[u8], rounds: u32) -> [u8; KEY_LEN] {
    let mut out = *material;
    for _ in 0..rounds {
        let mut hasher = Sha256::new();
        hasher.update(out);
        hasher.update(salt);
        out = hasher.finalize().into();
    }
    out
}

/// One HMAC-SHA256 of `label` keyed by `master`.
pub fn derive_subkey(master: &MasterKey, label: &[u8]) -> SubKey {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(&master.0).expect("HMAC can take key of any size");
    mac.update(label);
    SubKey(mac.finalize().into_bytes().into())
}
