//! Shared pieces of every reading: capture time, key seeding, and the
//! authentication code.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::{OracleConfig, SeedPolicy};
use crate::error::{SortResult, validate_query};
use crate::kdf::{MasterKey, TOKEN_LEN, derive_master_key_with};
use crate::progress::Progress;

/// Format a capture time as `YYYY-MM-DDTHH:MM:SS+00:00`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Key material for `query` under `policy`.
pub fn seed_material(query: &str, timestamp: &str, policy: SeedPolicy) -> String {
    match policy {
        SeedPolicy::QueryOnly => query.to_string(),
        SeedPolicy::WithTimestamp => format!("{query}|{timestamp}"),
    }
}

/// Upper-case first eight hex characters of the sub-key for `label`.
pub fn auth_code(key: &MasterKey, label: &str) -> String {
    let mut code = key.subkey(label).hex();
    code.truncate(TOKEN_LEN);
    code.to_uppercase()
}

/// A validated query with its master key, ready for drawing.
#[derive(Debug, Clone)]
pub struct Casting {
    /// The query text as given.
    pub query: String,
    /// Capture time.
    pub timestamp: String,
    /// Whether the capture time was mixed into the key.
    pub timestamp_seeded: bool,
    key: MasterKey,
}

impl Casting {
    /// Validate `query` and derive its master key under `domain_salt`.
    ///
    /// `at` overrides the capture time; otherwise the current time is used.
    /// Validation happens before any hashing.
    pub fn begin(
        query: &str,
        domain_salt: &[u8],
        config: &OracleConfig,
        at: Option<DateTime<Utc>>,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<Self> {
        let query = validate_query(query)?.to_string();
        config.kdf.validate()?;

        let timestamp = format_timestamp(at.unwrap_or_else(Utc::now));
        let material = seed_material(&query, &timestamp, config.seed);

        progress(Progress::Deriving {
            iterations: config.kdf.iterations,
        });
        let key = derive_master_key_with(&material, domain_salt, &config.kdf);

        Ok(Self {
            query,
            timestamp,
            timestamp_seeded: config.seed == SeedPolicy::WithTimestamp,
            key,
        })
    }

    /// The master key.
    pub fn key(&self) -> &MasterKey {
        &self.key
    }

    /// Authentication code for `label`.
    pub fn auth(&self, label: &str) -> String {
        auth_code(&self.key, label)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::KdfConfig;
    use crate::error::SortError;
    use crate::progress::silent;

    fn config() -> OracleConfig {
        OracleConfig::default().with_kdf(KdfConfig::default().with_iterations(32))
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn timestamp_format() {
        assert_eq!(format_timestamp(noon()), "2026-10-17T12:00:00+00:00");
    }

    #[test]
    fn seed_material_policies() {
        assert_eq!(seed_material("q", "t", SeedPolicy::QueryOnly), "q");
        assert_eq!(seed_material("q", "t", SeedPolicy::WithTimestamp), "q|t");
    }

    #[test]
    fn auth_code_shape() {
        let key = MasterKey::from_bytes([5u8; 32]);
        let code = auth_code(&key, "rune-auth");
        assert_eq!(code.len(), 8);
        assert_eq!(code, key.subkey("rune-auth").hex()[..8].to_uppercase());
    }

    #[test]
    fn empty_query_fails_before_hashing() {
        let mut calls = 0;
        let err = Casting::begin(" ", b"salt", &config(), None, &mut |_: Progress| calls += 1).unwrap_err();
        assert!(matches!(err, SortError::EmptyQuery));
        assert_eq!(calls, 0);
    }

    #[test]
    fn query_only_ignores_time() {
        let later = noon() + chrono::Duration::hours(3);
        let a = Casting::begin("q", b"salt", &config(), Some(noon()), &mut silent).unwrap();
        let b = Casting::begin("q", b"salt", &config(), Some(later), &mut silent).unwrap();
        assert_eq!(a.key(), b.key());
        assert!(!a.timestamp_seeded);
    }

    #[test]
    fn timestamp_seeding_varies_with_time() {
        let cfg = config().with_seed(SeedPolicy::WithTimestamp);
        let later = noon() + chrono::Duration::seconds(1);
        let a = Casting::begin("q", b"salt", &cfg, Some(noon()), &mut silent).unwrap();
        let b = Casting::begin("q", b"salt", &cfg, Some(noon()), &mut silent).unwrap();
        let c = Casting::begin("q", b"salt", &cfg, Some(later), &mut silent).unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert!(a.timestamp_seeded);
    }

    #[test]
    fn raw_query_is_hashed() {
        let padded = Casting::begin(" q ", b"salt", &config(), Some(noon()), &mut silent).unwrap();
        let bare = Casting::begin("q", b"salt", &config(), Some(noon()), &mut silent).unwrap();
        assert_eq!(padded.query, " q ");
        assert_ne!(padded.key(), bare.key());
    }

    #[test]
    fn reports_derivation() {
        let mut seen = Vec::new();
        Casting::begin("q", b"salt", &config(), None, &mut |p: Progress| seen.push(p)).unwrap();
        assert_eq!(seen, vec![Progress::Deriving { iterations: 32 }]);
    }
}
