//! Layout options for [`format_micros`](crate::format_micros).
//!
//! Every group is toggled independently. Separators and postfixes left as
//! `None` resolve to the documented defaults when a timestamp is formatted;
//! the options themselves are never touched by the formatter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIGN_POSTFIX: &str = " ";
pub const DEFAULT_DATE_SEPARATOR: &str = "/";
pub const DEFAULT_DATE_POSTFIX: &str = " - ";
pub const DEFAULT_HOURS_MINUTES_SEPARATOR: &str = ":";
pub const DEFAULT_HOURS_MINUTES_POSTFIX: &str = ":";
pub const DEFAULT_SECONDS_POSTFIX: &str = "";

/// How a negative instant is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NegativePolicy {
    /// A point in civil time before 1970. The sign glyph is always `+` and
    /// the seconds field is the floored remainder within the minute.
    #[default]
    PreEpoch,
    /// A signed duration. The sign glyph follows the arithmetic sign and the
    /// fields are computed from the magnitude.
    SignedOffset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneralOptions {
    pub use_local_time_zone: bool,
    pub negative: NegativePolicy,
}

impl Default for GeneralOptions {
    fn default() -> Self {
        Self {
            use_local_time_zone: true,
            negative: NegativePolicy::PreEpoch,
        }
    }
}

/// Leading `+`/`-`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignOptions {
    pub show: bool,
    pub postfix: Option<String>,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            show: true,
            postfix: None,
        }
    }
}

impl SignOptions {
    pub fn postfix(&self) -> &str {
        self.postfix.as_deref().unwrap_or(DEFAULT_SIGN_POSTFIX)
    }
}

/// `YYYY<sep>MM<sep>DD<postfix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DateOptions {
    pub show: bool,
    pub separator: Option<String>,
    pub postfix: Option<String>,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            show: true,
            separator: None,
            postfix: None,
        }
    }
}

impl DateOptions {
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_DATE_SEPARATOR)
    }

    pub fn postfix(&self) -> &str {
        self.postfix.as_deref().unwrap_or(DEFAULT_DATE_POSTFIX)
    }
}

/// `HH<sep>MM<postfix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoursMinutesOptions {
    pub show: bool,
    pub separator: Option<String>,
    pub postfix: Option<String>,
}

impl Default for HoursMinutesOptions {
    fn default() -> Self {
        Self {
            show: true,
            separator: None,
            postfix: None,
        }
    }
}

impl HoursMinutesOptions {
    pub fn separator(&self) -> &str {
        self.separator
            .as_deref()
            .unwrap_or(DEFAULT_HOURS_MINUTES_SEPARATOR)
    }

    pub fn postfix(&self) -> &str {
        self.postfix
            .as_deref()
            .unwrap_or(DEFAULT_HOURS_MINUTES_POSTFIX)
    }
}

/// `SS`, `SS.mmm` or `SS.uuuuuu`, then the postfix. Micros win over millis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SecondsOptions {
    pub show: bool,
    pub show_millis: bool,
    pub show_micros: bool,
    pub postfix: Option<String>,
}

impl Default for SecondsOptions {
    fn default() -> Self {
        Self {
            show: true,
            show_millis: true,
            show_micros: true,
            postfix: None,
        }
    }
}

impl SecondsOptions {
    pub fn postfix(&self) -> &str {
        self.postfix.as_deref().unwrap_or(DEFAULT_SECONDS_POSTFIX)
    }

    /// Digits after the decimal point: 6, 3 or none.
    pub(crate) fn fraction_digits(&self) -> usize {
        if self.show_micros {
            6
        } else if self.show_millis {
            3
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    pub general: GeneralOptions,
    pub sign: SignOptions,
    pub date: DateOptions,
    pub hours_minutes: HoursMinutesOptions,
    pub seconds: SecondsOptions,
}

/// The layout used when no options are passed.
pub fn default_config() -> FormatOptions {
    FormatOptions::default()
}

impl FormatOptions {
    /// Defaults, but converted in UTC instead of the local zone.
    pub fn utc() -> Self {
        Self::default().with_local_time_zone(false)
    }

    pub fn with_local_time_zone(mut self, local: bool) -> Self {
        self.general.use_local_time_zone = local;
        self
    }

    pub fn with_policy(mut self, negative: NegativePolicy) -> Self {
        self.general.negative = negative;
        self
    }

    /// Exact number of bytes a timestamp takes under this layout.
    ///
    /// Every field has a fixed width, so this is both the minimum capacity
    /// accepted by the formatter and the length of its output.
    pub fn min_size(&self) -> usize {
        let mut size = 0;
        if self.sign.show {
            size += 1 + self.sign.postfix().len();
        }
        if self.date.show {
            size += 8 + 2 * self.date.separator().len() + self.date.postfix().len();
        }
        if self.hours_minutes.show {
            size += 4 + self.hours_minutes.separator().len() + self.hours_minutes.postfix().len();
        }
        if self.seconds.show {
            let fraction = match self.seconds.fraction_digits() {
                0 => 0,
                digits => 1 + digits,
            };
            size += 2 + fraction + self.seconds.postfix().len();
        }
        size
    }

    /// True when every group is hidden; such a layout formats to nothing.
    pub fn is_empty(&self) -> bool {
        !(self.sign.show || self.date.show || self.hours_minutes.show || self.seconds.show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = default_config();
        assert!(opts.general.use_local_time_zone);
        assert_eq!(opts.general.negative, NegativePolicy::PreEpoch);
        assert!(opts.sign.show && opts.date.show && opts.hours_minutes.show && opts.seconds.show);
        assert!(opts.seconds.show_millis && opts.seconds.show_micros);
        assert_eq!(opts.sign.postfix(), " ");
        assert_eq!(opts.date.separator(), "/");
        assert_eq!(opts.date.postfix(), " - ");
        assert_eq!(opts.hours_minutes.separator(), ":");
        assert_eq!(opts.hours_minutes.postfix(), ":");
        assert_eq!(opts.seconds.postfix(), "");
    }

    #[test]
    fn test_default_min_size() {
        // "+ 2009/02/13 - 23:31:30.123456"
        assert_eq!(default_config().min_size(), 30);
    }

    #[test]
    fn test_min_size_per_group() {
        let mut opts = FormatOptions::default();
        opts.date.show = false;
        opts.hours_minutes.show = false;
        opts.seconds.show = false;
        assert_eq!(opts.min_size(), 2);

        opts.sign.show = false;
        opts.seconds.show = true;
        assert_eq!(opts.min_size(), 9);
        opts.seconds.show_micros = false;
        assert_eq!(opts.min_size(), 6);
        opts.seconds.show_millis = false;
        assert_eq!(opts.min_size(), 2);
        opts.seconds.postfix = Some("s".into());
        assert_eq!(opts.min_size(), 3);
    }

    #[test]
    fn test_min_size_counts_separators_twice_for_date() {
        let mut opts = FormatOptions::default();
        opts.sign.show = false;
        opts.hours_minutes.show = false;
        opts.seconds.show = false;
        opts.date.separator = Some("__".into());
        opts.date.postfix = Some(String::new());
        assert_eq!(opts.min_size(), 12);
    }

    #[test]
    fn test_empty_layout() {
        let mut opts = FormatOptions::default();
        assert!(!opts.is_empty());
        opts.sign.show = false;
        opts.date.show = false;
        opts.hours_minutes.show = false;
        opts.seconds.show = false;
        assert!(opts.is_empty());
        assert_eq!(opts.min_size(), 0);
    }

    #[test]
    fn test_builders() {
        let opts = FormatOptions::utc().with_policy(NegativePolicy::SignedOffset);
        assert!(!opts.general.use_local_time_zone);
        assert_eq!(opts.general.negative, NegativePolicy::SignedOffset);
        assert_eq!(opts.date, DateOptions::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_document_deserializes_onto_defaults() {
        let opts: FormatOptions = serde_json::from_str(
            r#"{"general": {"negative": "signed_offset"}, "date": {"separator": "-"}}"#,
        )
        .unwrap();
        assert_eq!(opts.general.negative, NegativePolicy::SignedOffset);
        assert!(opts.general.use_local_time_zone);
        assert_eq!(opts.date.separator(), "-");
        assert_eq!(opts.date.postfix(), DEFAULT_DATE_POSTFIX);
        assert!(opts.seconds.show_micros);
    }
}
