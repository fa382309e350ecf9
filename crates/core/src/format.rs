//! Display formatting for catalog fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::calendar::parse_iso_date;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';
const MAX_STARS: usize = 5;

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("failed to compile clock time regex")
});

/// Whether `value` is a 24-hour `HH:MM` time.
pub fn is_valid_clock_time(value: &str) -> bool {
    CLOCK_TIME.is_match(value)
}

/// Convert `HH:MM` to a 12-hour label such as `8:30 PM`.
///
/// Anything that is not a valid clock time is returned unchanged.
pub fn twelve_hour_time(value: &str) -> String {
    let Some(captures) = CLOCK_TIME.captures(value) else {
        return value.to_string();
    };
    let hour: u32 = captures[1].parse().unwrap_or(0);
    let minutes = &captures[2];
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{display_hour}:{minutes} {suffix}")
}

/// Compact date label, e.g. `Sat, Oct 24`.
pub fn short_date(value: &str) -> String {
    parse_iso_date(value)
        .map(|date| date.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Full date label, e.g. `Saturday, October 24, 2026`.
pub fn long_date(value: &str) -> String {
    parse_iso_date(value)
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Five-star strip with `filled` stars lit.
pub fn star_strip(filled: usize) -> String {
    let filled = filled.min(MAX_STARS);
    let mut strip = String::with_capacity(MAX_STARS * FILLED_STAR.len_utf8());
    strip.extend(std::iter::repeat(FILLED_STAR).take(filled));
    strip.extend(std::iter::repeat(EMPTY_STAR).take(MAX_STARS - filled));
    strip
}

/// Truncate to `width` characters, marking the cut with an ellipsis.
pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_twelve_hour_clock() {
        assert_eq!(twelve_hour_time("20:30"), "8:30 PM");
        assert_eq!(twelve_hour_time("00:15"), "12:15 AM");
        assert_eq!(twelve_hour_time("12:00"), "12:00 PM");
        assert_eq!(twelve_hour_time("09:05"), "9:05 AM");
        assert_eq!(twelve_hour_time("23:59"), "11:59 PM");
    }

    #[test]
    fn leaves_malformed_times_alone() {
        assert_eq!(twelve_hour_time("24:00"), "24:00");
        assert_eq!(twelve_hour_time("8:00"), "8:00");
        assert_eq!(twelve_hour_time("late"), "late");
        assert!(!is_valid_clock_time("12:60"));
        assert!(is_valid_clock_time("00:00"));
    }

    #[test]
    fn formats_dates_without_timezone_shift() {
        assert_eq!(short_date("2026-10-24"), "Sat, Oct 24");
        assert_eq!(long_date("2026-10-24"), "Saturday, October 24, 2026");
        assert_eq!(short_date("2024-01-01"), "Mon, Jan 1");
        assert_eq!(long_date("soon"), "soon");
    }

    #[test]
    fn star_strip_is_always_five_wide() {
        assert_eq!(star_strip(4), "★★★★☆");
        assert_eq!(star_strip(0), "☆☆☆☆☆");
        assert_eq!(star_strip(9), "★★★★★");
    }

    #[test]
    fn truncates_on_character_boundaries() {
        assert_eq!(truncate("Rosewood Cafe", 20), "Rosewood Cafe");
        assert_eq!(truncate("Rosewood Cafe", 5), "Rose…");
        assert_eq!(truncate("Café Olé", 4), "Caf…");
        assert_eq!(truncate("abc", 0), "");
    }
}
