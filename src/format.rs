//! Timestamp rendering into caller-owned buffers.
//!
//! Output grammar, each group optional and in this order:
//!
//! ```text
//! <+|-><sign postfix>
//! YYYY<sep>MM<sep>DD<date postfix>
//! HH<sep>MM<hours-minutes postfix>
//! SS[.mmm|.uuuuuu]<seconds postfix>
//! ```
//!
//! Every numeric field has a fixed width, so the output length is exactly
//! [`FormatOptions::min_size`].

use std::fmt::{self, Write as _};

use crate::civil::CivilTime;
use crate::clock::{Clock, Micros, Millis, SystemClock};
use crate::error::{ConversionError, FormatError};
use crate::options::{FormatOptions, NegativePolicy};

const MICROS_PER_SEC: i64 = 1_000_000;
const MICROS_PER_MIN: i64 = 60 * MICROS_PER_SEC;

/// Writes `micros` into `dest` in the given layout (defaults when `None`),
/// converting with the host clock. Returns the number of bytes written.
///
/// # Errors
///
/// [`FormatError::InsufficientBuffer`] when `dest` is shorter than
/// `options.min_size()`. Nothing is written in that case.
///
/// # Examples
///
/// ```
/// use sti::{format_micros, FormatOptions, NegativePolicy};
///
/// let opts = FormatOptions::utc().with_policy(NegativePolicy::SignedOffset);
/// let mut buf = [0u8; 64];
/// let end = format_micros(&mut buf, 1_234_567_890_123_456, Some(&opts)).unwrap();
/// assert_eq!(&buf[..end], b"+ 2009/02/13 - 23:31:30.123456");
/// ```
pub fn format_micros(
    dest: &mut [u8],
    micros: Micros,
    options: Option<&FormatOptions>,
) -> Result<usize, FormatError> {
    format_micros_with(&SystemClock, dest, micros, options)
}

/// [`format_micros`] of `millis * 1000`.
pub fn format_millis(
    dest: &mut [u8],
    millis: Millis,
    options: Option<&FormatOptions>,
) -> Result<usize, FormatError> {
    format_micros(dest, millis.saturating_mul(1000), options)
}

/// Like [`format_micros`], returning the written prefix of `dest` as text.
pub fn format_micros_str<'a>(
    dest: &'a mut [u8],
    micros: Micros,
    options: Option<&FormatOptions>,
) -> Result<&'a str, FormatError> {
    let end = format_micros(dest, micros, options)?;
    // Every byte written came from a `&str`.
    Ok(std::str::from_utf8(&dest[..end]).unwrap_or_default())
}

/// [`format_micros`] against an arbitrary [`Clock`].
pub fn format_micros_with<C: Clock + ?Sized>(
    clock: &C,
    dest: &mut [u8],
    micros: Micros,
    options: Option<&FormatOptions>,
) -> Result<usize, FormatError> {
    let defaults;
    let options = match options {
        Some(options) => options,
        None => {
            defaults = FormatOptions::default();
            &defaults
        }
    };

    let needed = options.min_size();
    let capacity = dest.len();
    if capacity < needed {
        return Err(FormatError::InsufficientBuffer { needed, capacity });
    }
    if options.is_empty() {
        return Ok(0);
    }

    let mut out = SliceWriter::new(dest);
    render(&mut out, clock, micros, options)
        .map_err(|_| FormatError::InsufficientBuffer { needed, capacity })?;
    tracing::trace!(
        micros,
        policy = ?options.general.negative,
        written = out.pos,
        "formatted timestamp"
    );
    Ok(out.pos)
}

/// Sign, conversion input and sub-minute remainder of an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    negative: bool,
    base_secs: i64,
    seconds: u8,
    micros: u32,
}

impl Split {
    fn new(micros: Micros, policy: NegativePolicy) -> Self {
        let (negative, base_secs, remainder) = match policy {
            NegativePolicy::PreEpoch => {
                // Truncated seconds for the calendar, floored remainder for
                // the seconds field.
                let mut remainder = micros % MICROS_PER_MIN;
                if remainder < 0 {
                    remainder += MICROS_PER_MIN;
                }
                (false, micros / MICROS_PER_SEC, remainder as u64)
            }
            NegativePolicy::SignedOffset => {
                let magnitude = micros.unsigned_abs();
                (
                    micros < 0,
                    (magnitude / MICROS_PER_SEC as u64) as i64,
                    magnitude % MICROS_PER_MIN as u64,
                )
            }
        };
        Self {
            negative,
            base_secs,
            seconds: (remainder / MICROS_PER_SEC as u64) as u8,
            micros: (remainder % MICROS_PER_SEC as u64) as u32,
        }
    }
}

fn four_digit_year(civil: CivilTime) -> Result<CivilTime, ConversionError> {
    if (0..=9999).contains(&civil.year()) {
        Ok(civil)
    } else {
        Err(ConversionError::YearOutOfRange { year: civil.year() })
    }
}

/// Local conversion falls back to UTC; `None` means neither worked.
fn civil_time<C: Clock + ?Sized>(clock: &C, secs: i64, local: bool) -> Option<CivilTime> {
    let utc = || clock.utc_civil_time(secs).and_then(four_digit_year);
    let converted = if local {
        clock
            .local_civil_time(secs)
            .and_then(four_digit_year)
            .or_else(|err| {
                tracing::debug!(%err, secs, "local conversion failed, using UTC");
                utc()
            })
    } else {
        utc()
    };
    match converted {
        Ok(civil) => Some(civil),
        Err(err) => {
            tracing::debug!(%err, secs, "calendar conversion failed, rendering placeholders");
            None
        }
    }
}

fn render<C: Clock + ?Sized>(
    out: &mut SliceWriter<'_>,
    clock: &C,
    micros: Micros,
    options: &FormatOptions,
) -> fmt::Result {
    let split = Split::new(micros, options.general.negative);

    if options.sign.show {
        out.write_char(if split.negative { '-' } else { '+' })?;
        out.write_str(options.sign.postfix())?;
    }

    if options.date.show || options.hours_minutes.show {
        let civil = civil_time(clock, split.base_secs, options.general.use_local_time_zone);

        if options.date.show {
            let separator = options.date.separator();
            out.field(civil.and_then(|c| u32::try_from(c.year()).ok()), 4)?;
            out.write_str(separator)?;
            out.field(civil.map(|c| c.month().into()), 2)?;
            out.write_str(separator)?;
            out.field(civil.map(|c| c.day().into()), 2)?;
            out.write_str(options.date.postfix())?;
        }

        if options.hours_minutes.show {
            out.field(civil.map(|c| c.hour().into()), 2)?;
            out.write_str(options.hours_minutes.separator())?;
            out.field(civil.map(|c| c.minute().into()), 2)?;
            out.write_str(options.hours_minutes.postfix())?;
        }
    }

    if options.seconds.show {
        write!(out, "{:02}", split.seconds)?;
        if options.seconds.show_micros {
            write!(out, ".{:06}", split.micros)?;
        } else if options.seconds.show_millis {
            write!(out, ".{:03}", split.micros / 1000)?;
        }
        out.write_str(options.seconds.postfix())?;
    }

    Ok(())
}

/// `fmt::Write` over a borrowed byte slice; fails instead of growing.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Zero-padded number, or `width` question marks.
    fn field(&mut self, value: Option<u32>, width: usize) -> fmt::Result {
        match value {
            Some(value) => write!(self, "{:0width$}", value, width = width),
            None => (0..width).try_for_each(|_| self.write_char('?')),
        }
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos.checked_add(s.len()).ok_or(fmt::Error)?;
        let dst = self.buf.get_mut(self.pos..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}
