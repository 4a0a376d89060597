//! Share lifetime arithmetic.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// The instant `hours` after `now`.
///
/// `hours` must be finite and strictly positive; fractional hours are kept
/// to millisecond precision.
pub fn expiry_after(now: DateTime<Utc>, hours: f64) -> AppResult<DateTime<Utc>> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::invalid_expiration(format!(
            "Share duration must be a positive number of hours, got {hours}"
        )));
    }

    let millis = (hours * MILLIS_PER_HOUR).ceil();
    if millis >= i64::MAX as f64 {
        return Err(AppError::invalid_expiration(format!(
            "Share duration of {hours} hours is too large"
        )));
    }

    TimeDelta::try_milliseconds(millis as i64)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| {
            AppError::invalid_expiration(format!("Share duration of {hours} hours is too large"))
        })
}

/// Presign lifetime for a share that ends at `expires_at`, capped at `max`.
///
/// Returns `None` once the share has ended.
pub fn presign_ttl(now: DateTime<Utc>, expires_at: DateTime<Utc>, max: Duration) -> Option<Duration> {
    let remaining = (expires_at - now).to_std().ok()?;
    if remaining.is_zero() {
        return None;
    }
    Some(remaining.min(max).max(Duration::from_secs(1)))
}
