//! Human-readable rendering of sizes, counts and dates.

use chrono::{DateTime, Utc};

use crate::labels::Locale;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Render a byte count with base-1024 units.
///
/// The largest unit with a scaled value of at least 1 is chosen and shown with
/// one decimal place. Plain bytes are shown without decimals. There is no unit
/// above GB; larger values are still expressed in GB.
pub fn format_byte_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Render a count with the locale's digit grouping.
pub fn format_count(count: u64, locale: Locale) -> String {
    let separator = match locale {
        Locale::En => ',',
        Locale::Es | Locale::Pt => '.',
    };

    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Render a publish date the way the locale writes short dates.
pub fn format_release_date(date: &DateTime<Utc>, locale: Locale) -> String {
    let pattern = match locale {
        Locale::En => "%-m/%-d/%Y",
        Locale::Es => "%-d/%-m/%Y",
        Locale::Pt => "%d/%m/%Y",
    };
    date.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_byte_size_zero() {
        assert_eq!(format_byte_size(0), "0 B");
    }

    #[test]
    fn test_format_byte_size_bytes() {
        assert_eq!(format_byte_size(1), "1 B");
        assert_eq!(format_byte_size(1023), "1023 B");
    }

    #[test]
    fn test_format_byte_size_scaled() {
        assert_eq!(format_byte_size(1024), "1.0 KB");
        assert_eq!(format_byte_size(1536), "1.5 KB");
        assert_eq!(format_byte_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_byte_size(52_428_800), "50.0 MB");
        assert_eq!(format_byte_size(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn test_format_byte_size_rounds_to_one_decimal() {
        // 1.2345 MB
        assert_eq!(format_byte_size(1_294_467), "1.2 MB");
        // just under 1 MB stays in KB
        assert_eq!(format_byte_size(1024 * 1024 - 1), "1024.0 KB");
    }

    #[test]
    fn test_format_byte_size_above_gb_stays_in_gb() {
        assert_eq!(format_byte_size(2 * 1024 * 1_073_741_824), "2048.0 GB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0, Locale::En), "0");
        assert_eq!(format_count(35, Locale::En), "35");
        assert_eq!(format_count(999, Locale::En), "999");
        assert_eq!(format_count(1000, Locale::En), "1,000");
        assert_eq!(format_count(1_234_567, Locale::En), "1,234,567");
        assert_eq!(format_count(1_234_567, Locale::Es), "1.234.567");
        assert_eq!(format_count(12_345, Locale::Pt), "12.345");
    }

    #[test]
    fn test_format_release_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(format_release_date(&date, Locale::En), "3/5/2024");
        assert_eq!(format_release_date(&date, Locale::Es), "5/3/2024");
        assert_eq!(format_release_date(&date, Locale::Pt), "05/03/2024");
    }
}
