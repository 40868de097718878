//! Cache sizing read from the session

use cmis_core::{Error, Result, SessionContext};
use std::num::NonZeroUsize;
use std::time::Duration;

/// A positive entry count stored under `key`, or `default` when unset
pub(crate) fn size_setting(
    session: &SessionContext,
    key: &str,
    default: usize,
) -> Result<NonZeroUsize> {
    let raw = session.get_int(key, i64::try_from(default).unwrap_or(i64::MAX));
    usize::try_from(raw)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            Error::configuration(format!("{key} must be a positive integer, got {raw}"))
        })
}

/// A time-to-live in milliseconds stored under `key`; zero disables expiry
pub(crate) fn ttl_setting(
    session: &SessionContext,
    key: &str,
    default_ms: u64,
) -> Result<Duration> {
    let raw = session.get_int(key, i64::try_from(default_ms).unwrap_or(i64::MAX));
    u64::try_from(raw).map(Duration::from_millis).map_err(|_| {
        Error::configuration(format!("{key} must not be negative, got {raw}"))
    })
}
