//! Human-readable rendering of durations given in seconds.
//!
//! * [`format_time_with_labels`] – `"1d 2h 3m 4s"`, or `"12.34s"` under a minute.
//! * [`format_time_with_colons`] – `"HH:MM:SS"` with unbounded hours.
//!
//! Both return `"Infinite"` for infinite durations (the period of an open orbit)
//! and prefix negative durations with `-`.
use crate::constants::{Second, SECONDS_PER_DAY, SECONDS_PER_HOUR};

const INFINITE: &str = "Infinite";
const UNDEFINED: &str = "Undefined";

fn sign_prefix(seconds: Second) -> &'static str {
    if seconds < 0.0 {
        "-"
    } else {
        ""
    }
}

/// Format a duration as `"1d 2h 3m 4s"`.
///
/// Leading zero units are omitted; below one minute the seconds keep two decimals.
pub fn format_time_with_labels(seconds: Second) -> String {
    if seconds.is_infinite() {
        return INFINITE.to_string();
    }
    if seconds.is_nan() {
        return UNDEFINED.to_string();
    }

    let total = seconds.abs();
    let mut rest = total;
    let mut out = String::from(sign_prefix(seconds));

    if total >= SECONDS_PER_DAY {
        let days = (rest / SECONDS_PER_DAY).floor();
        out.push_str(&format!("{days:.0}d "));
        rest -= days * SECONDS_PER_DAY;
    }
    if total >= SECONDS_PER_HOUR {
        let hours = (rest / SECONDS_PER_HOUR).floor();
        out.push_str(&format!("{hours:.0}h "));
        rest -= hours * SECONDS_PER_HOUR;
    }
    if total >= 60.0 {
        let minutes = (rest / 60.0).floor();
        out.push_str(&format!("{minutes:.0}m {:.0}s", (rest - minutes * 60.0).floor()));
    } else {
        out.push_str(&format!("{rest:.2}s"));
    }
    out
}

/// Format a duration as `"HH:MM:SS"`; hours are not wrapped at 24.
pub fn format_time_with_colons(seconds: Second) -> String {
    if seconds.is_infinite() {
        return INFINITE.to_string();
    }
    if seconds.is_nan() {
        return UNDEFINED.to_string();
    }

    let mut rest = seconds.abs();
    let hours = (rest / SECONDS_PER_HOUR).floor();
    rest -= hours * SECONDS_PER_HOUR;
    let minutes = (rest / 60.0).floor();
    rest -= minutes * 60.0;

    format!(
        "{}{hours:02.0}:{minutes:02.0}:{:02.0}",
        sign_prefix(seconds),
        rest.floor()
    )
}

#[cfg(test)]
mod time_format_test {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(format_time_with_labels(12.3456), "12.35s");
        assert_eq!(format_time_with_labels(65.0), "1m 5s");
        assert_eq!(format_time_with_labels(5_578.04), "1h 32m 58s");
        assert_eq!(format_time_with_labels(93_784.0), "1d 2h 3m 4s");
        assert_eq!(format_time_with_labels(86_400.0 + 59.0), "1d 0h 0m 59s");
        assert_eq!(format_time_with_labels(-65.0), "-1m 5s");
        assert_eq!(format_time_with_labels(f64::INFINITY), "Infinite");
        assert_eq!(format_time_with_labels(f64::NAN), "Undefined");
    }

    #[test]
    fn colons() {
        assert_eq!(format_time_with_colons(0.0), "00:00:00");
        assert_eq!(format_time_with_colons(5_578.04), "01:32:58");
        assert_eq!(format_time_with_colons(100.0 * 3_600.0 + 61.0), "100:01:01");
        assert_eq!(format_time_with_colons(-61.0), "-00:01:01");
        assert_eq!(format_time_with_colons(f64::NEG_INFINITY), "Infinite");
    }
}
