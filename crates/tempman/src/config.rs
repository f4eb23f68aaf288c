//! Configuration for managed roots
//!
//! A root has exactly one tunable: the reclamation timeout. It may be given
//! as plain seconds (integer or float), as a `std::time::Duration`, or as a
//! [`Span`] of days/seconds/microseconds. All of them go through
//! [`TotalSeconds`] and end up as a `Duration`.

use std::time::Duration;

use crate::error::{TempError, TempResult};

const SECONDS_PER_DAY: f64 = 86_400.0;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Anything that can be read as a number of seconds, including the
/// sub-second part.
pub trait TotalSeconds {
    fn total_seconds(&self) -> f64;

    /// The value as a reclamation age.
    ///
    /// Negative and NaN values are rejected; finite values beyond
    /// `Duration::MAX` saturate to it.
    fn to_duration(&self) -> TempResult<Duration> {
        duration_from_secs_f64(self.total_seconds())
    }
}

fn duration_from_secs_f64(seconds: f64) -> TempResult<Duration> {
    if seconds.is_nan() || seconds.is_infinite() || seconds < 0.0 {
        return Err(TempError::InvalidTimeout { seconds });
    }
    if seconds == 0.0 {
        return Ok(Duration::ZERO);
    }
    Ok(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
}

macro_rules! total_seconds_unsigned {
    ($($t:ty),*) => {
        $(
            impl TotalSeconds for $t {
                fn total_seconds(&self) -> f64 {
                    *self as f64
                }

                fn to_duration(&self) -> TempResult<Duration> {
                    Ok(Duration::from_secs(*self as u64))
                }
            }
        )*
    };
}

macro_rules! total_seconds_signed {
    ($($t:ty),*) => {
        $(
            impl TotalSeconds for $t {
                fn total_seconds(&self) -> f64 {
                    *self as f64
                }

                fn to_duration(&self) -> TempResult<Duration> {
                    u64::try_from(*self)
                        .map(Duration::from_secs)
                        .map_err(|_| TempError::InvalidTimeout { seconds: *self as f64 })
                }
            }
        )*
    };
}

macro_rules! total_seconds_float {
    ($($t:ty),*) => {
        $(
            impl TotalSeconds for $t {
                fn total_seconds(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

total_seconds_unsigned!(u8, u16, u32, u64, usize);
total_seconds_signed!(i8, i16, i32, i64, isize);
total_seconds_float!(f32, f64);

impl TotalSeconds for Duration {
    fn total_seconds(&self) -> f64 {
        self.as_secs_f64()
    }

    fn to_duration(&self) -> TempResult<Duration> {
        Ok(*self)
    }
}

impl<T: TotalSeconds + ?Sized> TotalSeconds for &T {
    fn total_seconds(&self) -> f64 {
        (**self).total_seconds()
    }

    fn to_duration(&self) -> TempResult<Duration> {
        (**self).to_duration()
    }
}

/// A duration split into days, seconds and microseconds.
///
/// Fields are not normalized and may be negative; the total is computed by
/// summing them as floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub days: i64,
    pub seconds: i64,
    pub microseconds: i64,
}

impl Span {
    pub fn new(days: i64, seconds: i64, microseconds: i64) -> Self {
        Self { days, seconds, microseconds }
    }

    pub fn minutes(minutes: i64) -> Self {
        Self::new(0, minutes.saturating_mul(60), 0)
    }

    pub fn hours(hours: i64) -> Self {
        Self::new(0, hours.saturating_mul(3600), 0)
    }

    pub fn days(days: i64) -> Self {
        Self::new(days, 0, 0)
    }
}

impl TotalSeconds for Span {
    fn total_seconds(&self) -> f64 {
        let whole = self.seconds as f64 + self.days as f64 * SECONDS_PER_DAY;
        (self.microseconds as f64 + whole * MICROS_PER_SECOND) / MICROS_PER_SECOND
    }
}

/// Convert a seconds-like value into a reclamation age.
pub fn timeout_from<T: TotalSeconds>(value: T) -> TempResult<Duration> {
    value.to_duration()
}

/// Root configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Reclamation age; `None` never reclaims
    pub timeout: Option<Duration>,
}

impl Config {
    /// Never reclaim anything under the root
    pub fn never() -> Self {
        Self { timeout: None }
    }

    /// Reclaim top-level entries older than `timeout`
    pub fn with_timeout<T: TotalSeconds>(timeout: T) -> TempResult<Self> {
        Ok(Self { timeout: Some(timeout_from(timeout)?) })
    }
}
