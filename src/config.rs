//! # Hub configuration.
//!
//! Provides [`Config`], the settings shared by every event a [`Hub`](crate::Hub) creates.
//!
//! ## Sentinel values
//! - `max_encoded_len = 0` → unlimited inbound payload size

/// Configuration for a [`Hub`](crate::Hub).
///
/// ## Field semantics
/// - `catch_panics`: convert listener panics into `ListenerError::Panicked`
///   instead of unwinding into the dispatch caller
/// - `max_encoded_len`: byte limit for encoded inbound arguments (`0` = unlimited)
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Catch panics raised by listeners during dispatch.
    ///
    /// When `false`, a panicking listener unwinds through `dispatch` and the
    /// remaining listeners of that dispatch are skipped.
    pub catch_panics: bool,

    /// Maximum accepted length of an encoded argument payload, in bytes.
    ///
    /// - `0` = unlimited
    /// - `n > 0` = longer payloads fail with `DecodeError::TooLarge` before parsing
    pub max_encoded_len: usize,
}

impl Config {
    /// Returns the payload size limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` bytes
    #[inline]
    pub fn encoded_limit(&self) -> Option<usize> {
        if self.max_encoded_len == 0 {
            None
        } else {
            Some(self.max_encoded_len)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `catch_panics = true`
    /// - `max_encoded_len = 0` (unlimited)
    fn default() -> Self {
        Self {
            catch_panics: true,
            max_encoded_len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        let cfg = Config::default();
        assert!(cfg.catch_panics);
        assert_eq!(cfg.encoded_limit(), None);
    }

    #[test]
    fn test_encoded_limit() {
        let cfg = Config {
            max_encoded_len: 64,
            ..Config::default()
        };
        assert_eq!(cfg.encoded_limit(), Some(64));
    }
}
