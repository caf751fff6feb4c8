//! API-key gate for mutating operations.
//!
//! The key set is fixed at startup. Reads never pass through here.

use crate::constants::API_KEY_DELIMITER;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Could not validate API key: no key supplied")]
    Missing,

    #[error("Could not validate API key")]
    Invalid,
}

/// Proof that a request presented an allow-listed key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Clone, Default)]
pub struct ApiKeyGate {
    keys: HashSet<String>,
}

impl ApiKeyGate {
    /// Builds a gate from individual keys. Blank entries are ignored so an
    /// empty header can never match.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.is_empty())
            .collect();
        Self { keys }
    }

    /// Builds a gate from a `||`-separated list, as found in `API_KEYS`.
    #[must_use]
    pub fn from_delimited(raw: &str) -> Self {
        Self::new(split_keys(raw))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn authorize(&self, credential: Option<&str>) -> Result<ApiKey, AuthError> {
        let credential = credential.ok_or(AuthError::Missing)?;

        if self.keys.contains(credential) {
            Ok(ApiKey(credential.to_string()))
        } else {
            Err(AuthError::Invalid)
        }
    }
}

impl fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("keys", &self.keys.len())
            .finish()
    }
}

/// Splits a `||`-separated key list, dropping blank entries.
#[must_use]
pub fn split_keys(raw: &str) -> Vec<String> {
    raw.split(API_KEY_DELIMITER)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keys() {
        assert_eq!(split_keys("alpha||beta"), vec!["alpha", "beta"]);
        assert_eq!(split_keys(" alpha || beta ||"), vec!["alpha", "beta"]);
        assert!(split_keys("").is_empty());
    }

    #[test]
    fn test_authorize_member() {
        let gate = ApiKeyGate::from_delimited("alpha||beta");
        assert_eq!(gate.len(), 2);

        let key = gate.authorize(Some("beta")).unwrap();
        assert_eq!(key.0, "beta");
    }

    #[test]
    fn test_authorize_rejects_non_member() {
        let gate = ApiKeyGate::from_delimited("alpha||beta");
        assert_eq!(gate.authorize(Some("gamma")), Err(AuthError::Invalid));
        assert_eq!(gate.authorize(Some("alpha||beta")), Err(AuthError::Invalid));
        assert_eq!(gate.authorize(None), Err(AuthError::Missing));
    }

    #[test]
    fn test_empty_gate_rejects_everything() {
        let gate = ApiKeyGate::from_delimited("");
        assert!(gate.is_empty());
        assert_eq!(gate.authorize(Some("")), Err(AuthError::Invalid));
        assert_eq!(gate.authorize(None), Err(AuthError::Missing));
    }

    #[test]
    fn test_debug_hides_keys() {
        let gate = ApiKeyGate::new(["secret"]);
        let rendered = format!("{gate:?} {:?}", gate.authorize(Some("secret")).unwrap());
        assert!(!rendered.contains("secret"));
    }
}
