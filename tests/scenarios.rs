use sti::{
    elapsed_micros, elapsed_millis, format_micros, format_micros_with, format_millis, now_micros,
    now_millis, sleep_millis, start_timer, CivilTime, Clock, ClockError, ConversionError,
    FormatOptions, Micros, NegativePolicy,
};

const REFERENCE_MICROS: i64 = 1_234_567_890_123_456;

fn utc_signed() -> FormatOptions {
    FormatOptions::utc().with_policy(NegativePolicy::SignedOffset)
}

fn micros_text(micros: i64, opts: &FormatOptions) -> String {
    let mut buf = [0u8; 200];
    let end = format_micros(&mut buf, micros, Some(opts)).unwrap();
    String::from_utf8(buf[..end].to_vec()).unwrap()
}

fn millis_text(millis: i64, opts: &FormatOptions) -> String {
    let mut buf = [0u8; 200];
    let end = format_millis(&mut buf, millis, Some(opts)).unwrap();
    String::from_utf8(buf[..end].to_vec()).unwrap()
}

#[test]
fn test_utc_signed_offset_micros() {
    assert_eq!(
        micros_text(REFERENCE_MICROS, &utc_signed()),
        "+ 2009/02/13 - 23:31:30.123456"
    );
}

#[test]
fn test_utc_signed_offset_millis() {
    assert_eq!(
        millis_text(1_234_567_890_123, &utc_signed()),
        "+ 2009/02/13 - 23:31:30.123000"
    );
}

#[test]
fn test_field_suppression_chain() {
    let mut opts = utc_signed();

    opts.sign.show = false;
    assert_eq!(micros_text(REFERENCE_MICROS, &opts), "2009/02/13 - 23:31:30.123456");

    opts.date.separator = Some("__".into());
    assert_eq!(micros_text(REFERENCE_MICROS, &opts), "2009__02__13 - 23:31:30.123456");

    opts.date.show = false;
    assert_eq!(micros_text(REFERENCE_MICROS, &opts), "23:31:30.123456");

    opts.hours_minutes.show = false;
    assert_eq!(micros_text(REFERENCE_MICROS, &opts), "30.123456");

    opts.seconds.show = false;
    assert_eq!(micros_text(REFERENCE_MICROS, &opts), "");
}

#[test]
fn test_pre_epoch_negative_instant() {
    let opts = FormatOptions::utc().with_policy(NegativePolicy::PreEpoch);
    assert_eq!(
        micros_text(-123_456_789_123_456, &opts),
        "+ 1966/02/02 - 02:26:50.876544"
    );
}

struct NoCalendar;

impl Clock for NoCalendar {
    fn now_micros(&self) -> Result<Micros, ClockError> {
        Ok(0)
    }

    fn local_civil_time(&self, secs: i64) -> Result<CivilTime, ConversionError> {
        Err(ConversionError::Unrepresentable { secs })
    }

    fn utc_civil_time(&self, secs: i64) -> Result<CivilTime, ConversionError> {
        Err(ConversionError::Unrepresentable { secs })
    }
}

#[test]
fn test_pre_epoch_negative_instant_without_calendar() {
    let mut buf = [0u8; 64];
    let end = format_micros_with(&NoCalendar, &mut buf, -123_456_789_123_456, None).unwrap();
    assert_eq!(&buf[..end], b"+ ????/??/?? - ??:??:50.876544");
}

#[test]
fn test_signed_offset_negative_instant() {
    assert_eq!(
        micros_text(-123_456_789_123_456, &utc_signed()),
        "- 1973/11/29 - 21:33:09.123456"
    );
}

#[test]
fn test_repeated_formatting_is_identical() {
    let opts = FormatOptions::default();
    let first = micros_text(REFERENCE_MICROS, &opts);
    for _ in 0..10 {
        assert_eq!(micros_text(REFERENCE_MICROS, &opts), first);
    }
}

#[test]
fn test_absolute_timers_agree() {
    let reference = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_micros() as i64;
    let micros = now_micros();
    let millis = now_millis();
    assert!((micros - reference).abs() <= 1_000_000);
    assert!((millis - reference / 1000).abs() <= 1000);
}

#[test]
fn test_relative_timers_track_sleep() {
    const MARGIN_MILLIS: i64 = 400;
    const SLEEP_MILLIS: i64 = 1000;

    let timer = start_timer();
    let micros = elapsed_micros(timer);
    let millis = elapsed_millis(timer);
    assert!((0..=MARGIN_MILLIS * 1000).contains(&micros), "elapsed {}us", micros);
    assert!((0..=MARGIN_MILLIS).contains(&millis), "elapsed {}ms", millis);

    sleep_millis(SLEEP_MILLIS);

    let micros = elapsed_micros(timer);
    let millis = elapsed_millis(timer);
    assert!(
        (SLEEP_MILLIS * 1000..=(SLEEP_MILLIS + MARGIN_MILLIS) * 1000).contains(&micros),
        "elapsed {}us",
        micros
    );
    assert!(
        (SLEEP_MILLIS..=SLEEP_MILLIS + MARGIN_MILLIS).contains(&millis),
        "elapsed {}ms",
        millis
    );
}
