//! Display formatting helpers for templates.

/// Formats a click count with `,` as the thousands separator.
///
/// ```ignore
/// assert_eq!(format_clicks(2120), "2,120");
/// ```
pub fn format_clicks(clicks: i64) -> String {
    let digits = clicks.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if clicks < 0 {
        out.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_unchanged() {
        assert_eq!(format_clicks(0), "0");
        assert_eq!(format_clicks(7), "7");
        assert_eq!(format_clicks(999), "999");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_clicks(1_000), "1,000");
        assert_eq!(format_clicks(2_120), "2,120");
        assert_eq!(format_clicks(123_456), "123,456");
    }

    #[test]
    fn test_millions() {
        assert_eq!(format_clicks(1_234_567), "1,234,567");
        assert_eq!(format_clicks(i64::MAX), "9,223,372,036,854,775,807");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_clicks(-1_500), "-1,500");
    }
}
