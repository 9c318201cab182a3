use std::fmt;
use std::thread;
use std::time::Duration;

use crate::civil::CivilTime;
use crate::error::{ClockError, ConversionError, Result};
use crate::platform;

/// Signed microseconds since 1970-01-01T00:00:00Z.
pub type Micros = i64;
/// Signed milliseconds since 1970-01-01T00:00:00Z.
pub type Millis = i64;

/// The host capabilities the timers and the formatter rely on.
///
/// [`SystemClock`] is the production implementation; tests substitute
/// their own to pin the current instant or to make conversions fail.
pub trait Clock {
    /// Wall-clock read. Not monotonic.
    fn now_micros(&self) -> Result<Micros, ClockError>;

    /// Blocks for at least `millis`; non-positive durations return at once.
    fn sleep_millis(&self, millis: Millis) {
        if let Ok(millis) = u64::try_from(millis) {
            thread::sleep(Duration::from_millis(millis));
        }
    }

    /// Civil time of `secs` in the host's local zone.
    fn local_civil_time(&self, secs: i64) -> Result<CivilTime, ConversionError>;

    /// Civil time of `secs` in UTC.
    fn utc_civil_time(&self, secs: i64) -> Result<CivilTime, ConversionError> {
        CivilTime::from_epoch_secs(secs)
    }

    /// Local-minus-UTC offset at the current instant, in microseconds.
    fn time_zone_offset_micros(&self) -> Result<i64> {
        let secs = self.now_micros()?.div_euclid(1_000_000);
        let local = self.local_civil_time(secs)?;
        let utc = self.utc_civil_time(secs)?;
        Ok((local.to_epoch_secs() - utc.to_epoch_secs()) * 1_000_000)
    }
}

/// The host wall clock and time-zone rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> Result<Micros, ClockError> {
        Ok(platform::now_micros()?)
    }

    fn local_civil_time(&self, secs: i64) -> Result<CivilTime, ConversionError> {
        platform::local_civil_time(secs)
    }
}

/// Reads the wall clock, reporting a platform failure instead of panicking.
pub fn try_now_micros() -> Result<Micros, ClockError> {
    SystemClock.now_micros()
}

/// Current wall-clock time in microseconds.
///
/// # Panics
///
/// Panics if the platform clock cannot be read; see [`try_now_micros`].
pub fn now_micros() -> Micros {
    match try_now_micros() {
        Ok(micros) => micros,
        Err(err) => {
            tracing::error!(%err, "wall clock read failed");
            panic!("{err}");
        }
    }
}

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> Millis {
    now_micros() / 1000
}

/// Blocks the calling thread for at least `millis` milliseconds.
pub fn sleep_millis(millis: Millis) {
    SystemClock.sleep_millis(millis);
}

/// Local-minus-UTC offset in microseconds, following the current DST state.
///
/// Reports 0 when the host cannot convert the current instant to local time.
pub fn time_zone_offset_micros() -> i64 {
    match SystemClock.time_zone_offset_micros() {
        Ok(offset) => offset,
        Err(err) => {
            tracing::warn!(%err, "local time unavailable, assuming UTC");
            0
        }
    }
}

/// Captures the current instant as a start-of-measurement point.
pub fn start_timer() -> Timer {
    Timer::start()
}

pub fn elapsed_micros(timer: Timer) -> i64 {
    timer.elapsed_micros()
}

pub fn elapsed_millis(timer: Timer) -> i64 {
    timer.elapsed_millis()
}

/// A captured wall-clock instant. Querying it never resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timer {
    start: Micros,
}

impl Timer {
    /// Captures the current instant.
    pub fn start() -> Self {
        Self {
            start: now_micros(),
        }
    }

    /// Wraps an instant captured earlier, e.g. one stored as a raw `i64`.
    pub fn from_micros(start: Micros) -> Self {
        Self { start }
    }

    pub fn started_at(&self) -> Micros {
        self.start
    }

    /// Microseconds since [`Timer::start`]. Negative if the wall clock was
    /// set backwards in the meantime; saturates at the `i64` bounds for
    /// handles built from extreme raw values.
    pub fn elapsed_micros(&self) -> i64 {
        now_micros().saturating_sub(self.start)
    }

    pub fn elapsed_millis(&self) -> i64 {
        self.elapsed_micros() / 1000
    }
}

impl From<Timer> for Micros {
    fn from(timer: Timer) -> Self {
        timer.start
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let micros = self.elapsed_micros();
        if micros < 1_000_000 {
            write!(f, "{}ms", micros / 1000)
        } else {
            write!(f, "{:.2}s", micros as f64 / 1e6)
        }
    }
}
