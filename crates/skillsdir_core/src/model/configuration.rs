//! Singleton application configuration record.
//!
//! # Invariants
//! - Exactly one record may exist, stored under [`CONFIGURATION_ID`].
//! - The session-encryption key is generated once, at creation.
//! - `Debug` output never contains the key.

use chrono::{DateTime, SubsecRound, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Fixed primary key of the configuration record.
pub const CONFIGURATION_ID: &str = "configuration";

/// Raw key length before hex encoding.
pub const SESSION_KEY_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Hex-encoded random key used to encrypt caller sessions.
    pub session_encryption_key: String,
    /// Creation time, whole seconds.
    pub created_at: DateTime<Utc>,
}

impl Configuration {
    /// Builds a fresh configuration with a newly generated session key.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            session_encryption_key: generate_session_key(),
            created_at: now.trunc_subsecs(0),
        }
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("session_encryption_key", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

fn generate_session_key() -> String {
    let mut bytes = [0_u8; SESSION_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::{Configuration, SESSION_KEY_BYTES};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generate_produces_hex_key_of_expected_length() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let configuration = Configuration::generate(now);

        assert_eq!(
            configuration.session_encryption_key.len(),
            SESSION_KEY_BYTES * 2
        );
        assert!(hex::decode(&configuration.session_encryption_key).is_ok());
        assert_eq!(configuration.created_at, now);
    }

    #[test]
    fn generated_keys_differ() {
        let now = Utc::now();
        assert_ne!(
            Configuration::generate(now).session_encryption_key,
            Configuration::generate(now).session_encryption_key
        );
    }

    #[test]
    fn debug_redacts_key() {
        let configuration = Configuration::generate(Utc::now());
        let rendered = format!("{configuration:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&configuration.session_encryption_key));
    }
}
