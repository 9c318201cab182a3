use std::io;

/// Errors returned by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The destination slice is shorter than `FormatOptions::min_size`.
    #[error("destination holds {capacity} bytes but the layout needs {needed}")]
    InsufficientBuffer { needed: usize, capacity: usize },
}

/// A civil-time conversion that could not produce printable fields.
///
/// The formatter never returns this: it falls back to UTC, then to `?`
/// placeholders. It is public so that [`Clock`](crate::Clock) implementors
/// can report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("{secs}s since the epoch is not representable on this host")]
    Unrepresentable { secs: i64 },
    #[error("host conversion returned out-of-range civil fields")]
    InvalidFields,
    #[error("year {year} does not fit a four digit field")]
    YearOutOfRange { year: i32 },
}

/// The platform wall clock could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    #[error("wall clock unavailable: {source}")]
    Unavailable {
        #[from]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Clock(#[from] ClockError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_buffer_message() {
        let err = FormatError::InsufficientBuffer {
            needed: 30,
            capacity: 29,
        };
        assert_eq!(
            err.to_string(),
            "destination holds 29 bytes but the layout needs 30"
        );
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let err: Error = ConversionError::YearOutOfRange { year: 10_000 }.into();
        assert_eq!(err.to_string(), "year 10000 does not fit a four digit field");
    }
}
