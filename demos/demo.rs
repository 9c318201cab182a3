use sti::{
    format_micros_str, format_millis, now_micros, now_millis, sleep_millis, start_timer,
    time_zone_offset_micros, FormatOptions, NegativePolicy,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut buf = [0u8; 64];

    // Current time, default layout (local zone)
    let now = now_micros();
    match format_micros_str(&mut buf, now, None) {
        Ok(text) => println!("Local now: {}", text),
        Err(err) => println!("Local now: {}", err),
    }

    let utc = FormatOptions::utc();
    if let Ok(text) = format_micros_str(&mut buf, now, Some(&utc)) {
        println!("UTC now:   {}", text);
    }
    println!("Millis since epoch: {}", now_millis());
    println!("Zone offset: {}s", time_zone_offset_micros() / 1_000_000);

    // Custom layout
    let mut iso = FormatOptions::utc();
    iso.sign.show = false;
    iso.date.separator = Some("-".into());
    iso.date.postfix = Some("T".into());
    iso.seconds.show_micros = false;
    iso.seconds.postfix = Some("Z".into());
    if let Ok(end) = format_millis(&mut buf, 1_234_567_890_123, Some(&iso)) {
        println!("ISO-ish: {}", String::from_utf8_lossy(&buf[..end]));
    }

    // Negative instants under both policies
    let before = -123_456_789_123_456;
    for policy in [NegativePolicy::PreEpoch, NegativePolicy::SignedOffset] {
        let opts = FormatOptions::utc().with_policy(policy);
        if let Ok(text) = format_micros_str(&mut buf, before, Some(&opts)) {
            println!("{:?}: {}", policy, text);
        }
    }

    // A buffer that is too small
    let mut small = [0u8; 8];
    if let Err(err) = format_micros_str(&mut small, now, None) {
        println!("Small buffer: {}", err);
    }

    // Elapsed timer
    let timer = start_timer();
    sleep_millis(25);
    println!("Slept for {} ({}us)", timer, timer.elapsed_micros());
}
