//! Host primitives behind [`SystemClock`](crate::SystemClock): the wall-clock
//! read and local civil-time conversion. One implementation per target
//! family, selected at build time.

#[cfg(unix)]
mod imp {
    use std::io;

    use crate::civil::CivilTime;
    use crate::error::ConversionError;

    pub fn now_micros() -> io::Result<i64> {
        // SAFETY: `timespec` is plain old data; all-zero is a valid value.
        let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
        // SAFETY: `ts` is a valid, exclusively borrowed out-pointer.
        if unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(ts.tv_sec as i64 * 1_000_000 + ts.tv_nsec as i64 / 1_000)
    }

    fn field(value: libc::c_int) -> Result<u8, ConversionError> {
        u8::try_from(value).map_err(|_| ConversionError::InvalidFields)
    }

    pub fn local_civil_time(secs: i64) -> Result<CivilTime, ConversionError> {
        let time: libc::time_t = secs
            .try_into()
            .map_err(|_| ConversionError::Unrepresentable { secs })?;
        // SAFETY: `tm` is plain old data; all-zero is a valid value.
        let mut tm: libc::tm = unsafe { std::mem::zeroed() };
        // SAFETY: both pointers are valid for the duration of the call and
        // `localtime_r` does not retain them.
        let result = unsafe { libc::localtime_r(&time, &mut tm) };
        if result.is_null() {
            return Err(ConversionError::Unrepresentable { secs });
        }
        let year = tm
            .tm_year
            .checked_add(1900)
            .ok_or(ConversionError::InvalidFields)?;
        CivilTime::new(
            year,
            field(tm.tm_mon + 1)?,
            field(tm.tm_mday)?,
            field(tm.tm_hour)?,
            field(tm.tm_min)?,
            field(tm.tm_sec)?,
        )
        .ok_or(ConversionError::InvalidFields)
    }
}

#[cfg(windows)]
mod imp {
    use std::io;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::civil::CivilTime;
    use crate::error::ConversionError;

    /// Seconds between 1601-01-01 (FILETIME epoch) and 1970-01-01.
    const FILETIME_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

    #[repr(C)]
    struct FILETIME {
        dw_low_date_time: u32,
        dw_high_date_time: u32,
    }

    #[repr(C)]
    struct SYSTEMTIME {
        w_year: u16,
        w_month: u16,
        w_day_of_week: u16,
        w_day: u16,
        w_hour: u16,
        w_minute: u16,
        w_second: u16,
        w_milliseconds: u16,
    }

    extern "system" {
        fn FileTimeToSystemTime(file_time: *const FILETIME, system_time: *mut SYSTEMTIME) -> i32;
        fn SystemTimeToTzSpecificLocalTime(
            time_zone: *const std::ffi::c_void,
            universal_time: *const SYSTEMTIME,
            local_time: *mut SYSTEMTIME,
        ) -> i32;
    }

    pub fn now_micros() -> io::Result<i64> {
        // SystemTime is backed by GetSystemTimePreciseAsFileTime.
        let micros = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_micros()),
            Err(before) => i64::try_from(before.duration().as_micros()).map(|m| -m),
        };
        micros.map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn field(value: u16) -> Result<u8, ConversionError> {
        u8::try_from(value).map_err(|_| ConversionError::InvalidFields)
    }

    pub fn local_civil_time(secs: i64) -> Result<CivilTime, ConversionError> {
        let ticks = secs
            .checked_add(FILETIME_EPOCH_OFFSET_SECS)
            .and_then(|s| u64::try_from(s).ok())
            .and_then(|s| s.checked_mul(10_000_000))
            .ok_or(ConversionError::Unrepresentable { secs })?;
        let ft = FILETIME {
            dw_low_date_time: ticks as u32,
            dw_high_date_time: (ticks >> 32) as u32,
        };
        // SAFETY: all structs are plain old data; pointers are valid for the calls.
        let local = unsafe {
            let mut utc = std::mem::zeroed::<SYSTEMTIME>();
            if FileTimeToSystemTime(&ft, &mut utc) == 0 {
                return Err(ConversionError::Unrepresentable { secs });
            }
            let mut local = std::mem::zeroed::<SYSTEMTIME>();
            if SystemTimeToTzSpecificLocalTime(std::ptr::null(), &utc, &mut local) == 0 {
                return Err(ConversionError::Unrepresentable { secs });
            }
            local
        };
        CivilTime::new(
            local.w_year as i32,
            field(local.w_month)?,
            field(local.w_day)?,
            field(local.w_hour)?,
            field(local.w_minute)?,
            field(local.w_second)?,
        )
        .ok_or(ConversionError::InvalidFields)
    }
}

#[cfg(not(any(unix, windows)))]
mod imp {
    use std::io;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::civil::CivilTime;
    use crate::error::ConversionError;

    pub fn now_micros() -> io::Result<i64> {
        let micros = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_micros()),
            Err(before) => i64::try_from(before.duration().as_micros()).map(|m| -m),
        };
        micros.map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    /// No zone information on this target: local time is UTC.
    pub fn local_civil_time(secs: i64) -> Result<CivilTime, ConversionError> {
        CivilTime::from_epoch_secs(secs)
    }
}

pub(crate) use imp::{local_civil_time, now_micros};
