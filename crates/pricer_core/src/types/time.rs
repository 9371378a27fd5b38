//! Time arithmetic for contract expirations.
//!
//! Year fractions use ACT/365 Fixed measured on the actual elapsed time
//! between two instants, so intraday expirations resolve to fractional days.

use chrono::{DateTime, TimeDelta, Utc};

/// Days per year under ACT/365 Fixed.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Milliseconds per ACT/365 Fixed year.
const MILLIS_PER_YEAR: f64 = DAYS_PER_YEAR * 86_400_000.0;

/// Default degenerate-input threshold: one calendar day in years.
///
/// Below this time to expiration the closed form is singular and engines
/// switch to intrinsic value and boundary Greeks.
pub const DEFAULT_MIN_TIME_TO_EXPIRY: f64 = 1.0 / DAYS_PER_YEAR;

/// Signed year fraction from `start` to `end` (ACT/365 Fixed).
///
/// Returns a negative value when `end` precedes `start`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pricer_core::types::time::year_fraction;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
///
/// assert!((year_fraction(start, end) - 182.0 / 365.0).abs() < 1e-12);
/// assert!(year_fraction(end, start) < 0.0);
/// ```
pub fn year_fraction(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_YEAR
}

/// Instant `years` after `start` (ACT/365 Fixed), rounded to the millisecond.
///
/// Returns `None` if `years` is not finite or the result is outside the
/// representable range.
pub fn add_years(start: DateTime<Utc>, years: f64) -> Option<DateTime<Utc>> {
    if !years.is_finite() {
        return None;
    }
    let millis = (years * MILLIS_PER_YEAR).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    start.checked_add_signed(delta)
}
