/// Keeps the digits of a phone number and hyphenates them 3-4-rest, the
/// way Korean mobile numbers are written: `01012345678` → `010-1234-5678`.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        0..=3 => digits,
        4..=7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
    }
}

/// Human readable file size with up to two decimals: `1536` → `1.5 KB`.
pub fn format_file_size(bytes: f64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes <= 0.0 {
        return "0 Bytes".to_string();
    }
    let exponent = (bytes.ln() / 1024f64.ln()).floor().clamp(0.0, (UNITS.len() - 1) as f64);
    let scaled = bytes / 1024f64.powi(exponent as i32);
    let rounded = format!("{:.2}", scaled);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone_progressive() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("010"), "010");
        assert_eq!(format_phone("0101"), "010-1");
        assert_eq!(format_phone("0101234"), "010-1234");
        assert_eq!(format_phone("01012345"), "010-1234-5");
        assert_eq!(format_phone("01012345678"), "010-1234-5678");
    }

    #[test]
    fn test_format_phone_strips_non_digits() {
        assert_eq!(format_phone("010-1234-5678"), "010-1234-5678");
        assert_eq!(format_phone("(010) 1234 5678"), "010-1234-5678");
        assert_eq!(format_phone("abc"), "");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0.0), "0 Bytes");
        assert_eq!(format_file_size(512.0), "512 Bytes");
        assert_eq!(format_file_size(1024.0), "1 KB");
        assert_eq!(format_file_size(1536.0), "1.5 KB");
        assert_eq!(format_file_size(5.0 * 1024.0 * 1024.0), "5 MB");
        assert_eq!(format_file_size(2.0 * 1024f64.powi(4)), "2048 GB");
    }
}
