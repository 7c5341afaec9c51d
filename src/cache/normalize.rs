//! Timeout & Size Normalization
//!
//! Turns caller-supplied, possibly absent timeouts and sizes into concrete
//! values. Absent and zero values are "falsy" and fall back to defaults.

use chrono::Utc;

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default lifetime of an entry, in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 300.0;

/// Default maximum number of entries in a store.
pub const DEFAULT_SIZE: usize = 300;

// == Clock ==
/// Returns the current wall clock as seconds since the Unix epoch.
pub fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

// == Timeout ==
/// Returns the absolute expiry for a timeout given from now, using
/// [`DEFAULT_TIMEOUT_SECS`] when the timeout is absent or zero.
pub fn normalize_timeout(timeout: Option<f64>) -> f64 {
    normalize_timeout_with(timeout, DEFAULT_TIMEOUT_SECS, now_secs())
}

/// Same as [`normalize_timeout`] with an explicit default and clock reading.
///
/// Negative timeouts produce an expiry in the past.
pub fn normalize_timeout_with(timeout: Option<f64>, default: f64, now: f64) -> f64 {
    let secs = match timeout {
        Some(t) if t != 0.0 => t,
        _ => default,
    };
    now + secs
}

// == Size ==
/// Returns the maximum entry count, using [`DEFAULT_SIZE`] when the size
/// is absent or zero.
pub fn normalize_size(size: Option<usize>) -> usize {
    normalize_size_with(size, DEFAULT_SIZE)
}

/// Same as [`normalize_size`] with an explicit default.
pub fn normalize_size_with(size: Option<usize>, default: usize) -> usize {
    match size {
        Some(s) if s != 0 => s,
        _ => default,
    }
}

// == Parsing ==
/// Converts text into a timeout in seconds.
///
/// Blank text and zero are falsy and map to `None`. Anything that is not a
/// finite number fails with [`CacheError::InvalidTimeout`].
pub fn parse_timeout(text: &str) -> Result<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let secs: f64 = trimmed
        .parse()
        .map_err(|_| CacheError::InvalidTimeout(text.to_string()))?;
    if !secs.is_finite() {
        return Err(CacheError::InvalidTimeout(text.to_string()));
    }

    Ok(if secs == 0.0 { None } else { Some(secs) })
}

/// Converts text into an entry count.
///
/// Blank text and zero map to `None`. Negative or fractional counts fail
/// with [`CacheError::InvalidSize`].
pub fn parse_size(text: &str) -> Result<Option<usize>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let size: usize = trimmed
        .parse()
        .map_err(|_| CacheError::InvalidSize(text.to_string()))?;

    Ok(if size == 0 { None } else { Some(size) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_defaults_when_absent_or_zero() {
        assert_eq!(normalize_timeout_with(None, 300.0, 1000.0), 1300.0);
        assert_eq!(normalize_timeout_with(Some(0.0), 300.0, 1000.0), 1300.0);
    }

    #[test]
    fn test_timeout_explicit() {
        assert_eq!(normalize_timeout_with(Some(2.5), 300.0, 1000.0), 1002.5);
        assert_eq!(normalize_timeout_with(Some(-1.0), 300.0, 1000.0), 999.0);
    }

    #[test]
    fn test_normalize_timeout_uses_clock() {
        let before = now_secs();
        let expiry = normalize_timeout(None);
        let after = now_secs();

        assert!(expiry >= before + DEFAULT_TIMEOUT_SECS);
        assert!(expiry <= after + DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_size_defaults() {
        assert_eq!(normalize_size(None), DEFAULT_SIZE);
        assert_eq!(normalize_size(Some(0)), DEFAULT_SIZE);
        assert_eq!(normalize_size(Some(7)), 7);
        assert_eq!(normalize_size_with(None, 12), 12);
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("").unwrap(), None);
        assert_eq!(parse_timeout("  ").unwrap(), None);
        assert_eq!(parse_timeout("0").unwrap(), None);
        assert_eq!(parse_timeout("1.5").unwrap(), Some(1.5));
        assert_eq!(parse_timeout(" 60 ").unwrap(), Some(60.0));
        assert_eq!(parse_timeout("-1").unwrap(), Some(-1.0));
    }

    #[test]
    fn test_parse_timeout_rejects_garbage() {
        assert_eq!(
            parse_timeout("soon"),
            Err(CacheError::InvalidTimeout("soon".to_string()))
        );
        assert!(parse_timeout("NaN").is_err());
        assert!(parse_timeout("inf").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("").unwrap(), None);
        assert_eq!(parse_size("0").unwrap(), None);
        assert_eq!(parse_size("42").unwrap(), Some(42));
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert_eq!(parse_size("-3"), Err(CacheError::InvalidSize("-3".to_string())));
        assert!(parse_size("2.5").is_err());
        assert!(parse_size("many").is_err());
    }
}
