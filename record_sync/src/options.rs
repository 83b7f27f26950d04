//! Per-call configuration shared by both engines.

use serde::{Deserialize, Serialize};

/// Alias key consulted when no other is configured.
pub const DEFAULT_NAMING_KEY: &str = "json";

/// Nesting limit applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options threaded through [`crate::propagate_with`] and
/// [`crate::diff_fields_with`].
///
/// The struct deserializes from partial input, so applications can embed it
/// in their own configuration files:
///
/// ```
/// use record_sync::SyncOptions;
///
/// let options: SyncOptions = serde_json::from_str(r#"{ "naming_key": "db" }"#)?;
/// assert_eq!(options.naming_key(), "db");
/// assert_eq!(options.max_depth(), 64);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncOptions {
    naming_key: String,
    max_depth: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            naming_key: DEFAULT_NAMING_KEY.to_owned(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SyncOptions {
    /// Options with the default alias key and depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `key` when reporting external field names.
    #[must_use]
    pub fn with_naming_key(mut self, key: impl Into<String>) -> Self {
        self.naming_key = key.into();
        self
    }

    /// Fail conversions nested deeper than `limit` levels.
    #[must_use]
    pub const fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Alias key used for external field names.
    #[must_use]
    pub fn naming_key(&self) -> &str {
        &self.naming_key
    }

    /// Maximum nesting depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for option defaults and deserialization.

    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;

    #[rstest]
    fn defaults_use_json_key() {
        let options = SyncOptions::default();
        assert_eq!(options.naming_key(), DEFAULT_NAMING_KEY);
        assert_eq!(options.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[rstest]
    fn builders_override_fields() {
        let options = SyncOptions::new().with_naming_key("yaml").with_max_depth(3);
        assert_eq!(options.naming_key(), "yaml");
        assert_eq!(options.max_depth(), 3);
    }

    #[rstest]
    #[case("{}", SyncOptions::default())]
    #[case(r#"{"max_depth": 8}"#, SyncOptions::default().with_max_depth(8))]
    #[case(
        r#"{"naming_key": "db", "max_depth": 2}"#,
        SyncOptions::default().with_naming_key("db").with_max_depth(2)
    )]
    fn deserializes_partial_input(#[case] input: &str, #[case] expected: SyncOptions) -> Result<()> {
        let parsed: SyncOptions = serde_json::from_str(input)?;
        ensure!(parsed == expected, "parsed {parsed:?}, expected {expected:?}");
        Ok(())
    }

    #[rstest]
    fn rejects_unknown_keys() {
        let parsed = serde_json::from_str::<SyncOptions>(r#"{"naming": "db"}"#);
        assert!(parsed.is_err());
    }

    #[rstest]
    fn round_trips_through_json() -> Result<()> {
        let options = SyncOptions::default().with_naming_key("db");
        let text = serde_json::to_string(&options)?;
        ensure!(text == r#"{"naming_key":"db","max_depth":64}"#, "unexpected {text}");
        Ok(())
    }
}
