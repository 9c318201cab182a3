//! Simple timing utility: microsecond wall-clock reads, elapsed-time timers
//! and timestamp formatting into caller-owned buffers.
//!
//! ```
//! use sti::{format_micros, now_micros, FormatOptions};
//!
//! let opts = FormatOptions::default();
//! let mut buf = [0u8; 64];
//! let end = format_micros(&mut buf, now_micros(), Some(&opts)).unwrap();
//! assert_eq!(end, opts.min_size());
//! ```

mod civil;
mod clock;
mod error;
mod format;
mod options;
mod platform;

pub use civil::CivilTime;
pub use clock::{
    elapsed_micros, elapsed_millis, now_micros, now_millis, sleep_millis, start_timer,
    time_zone_offset_micros, try_now_micros, Clock, Micros, Millis, SystemClock, Timer,
};
pub use error::{ClockError, ConversionError, Error, FormatError, Result};
pub use format::{format_micros, format_micros_str, format_micros_with, format_millis};
pub use options::{
    default_config, DateOptions, FormatOptions, GeneralOptions, HoursMinutesOptions,
    NegativePolicy, SecondsOptions, SignOptions, DEFAULT_DATE_POSTFIX, DEFAULT_DATE_SEPARATOR,
    DEFAULT_HOURS_MINUTES_POSTFIX, DEFAULT_HOURS_MINUTES_SEPARATOR, DEFAULT_SECONDS_POSTFIX,
    DEFAULT_SIGN_POSTFIX,
};
