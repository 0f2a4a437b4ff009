//! Fixed-width amount strings: `1.50KiB`, ` 512 B/s`, `13.0GiB`.

use std::fmt::Write;

use super::si::{si_scale, Ratio};
use crate::text::BoundedText;

/// Largest scaled value printed; keeps the numeric part to a few columns.
const DISPLAY_CEILING: f64 = 100_000.0;

/// Write `amount` scaled to an SI prefix, followed by `unit`, wrapped in
/// `open` and `close` (used for the `[...]` around rates).
///
/// Values above 99.9 print as a 4-column integer; smaller values keep three
/// significant digits including trailing zeros, so `13` reads `13.0`.
pub fn write_size(
    out: &mut BoundedText,
    amount: f64,
    unit: &str,
    ratio: Ratio,
    open: &str,
    close: &str,
) {
    let scaled = si_scale(amount, ratio);
    let value = scaled.value.min(DISPLAY_CEILING);

    out.clear();
    out.push_str(open);
    if value > 99.9 {
        let _ = write!(out, "{:>4}", value as i64);
    } else {
        let _ = write!(out, "{:>4}", three_significant(value));
    }
    let _ = write!(out, "{}{}", scaled.prefix, unit);
    out.push_str(close);
}

/// Convenience wrapper returning an owned string.
pub fn size_string(amount: f64, unit: &str, ratio: Ratio) -> String {
    let mut out = BoundedText::with_max(crate::text::limits::TRANSFERRED);
    write_size(&mut out, amount, unit, ratio, "", "");
    out.as_str().to_owned()
}

/// Three significant digits, trailing zeros kept.
fn three_significant(v: f64) -> String {
    if v == 0.0 {
        return "0.00".to_owned();
    }
    let exp = v.abs().log10().floor() as i32;
    if exp < -4 {
        return format!("{v:.2e}");
    }
    let mut decimals = (2 - exp).max(0) as usize;
    let mut s = format!("{v:.decimals$}");
    // Rounding may carry into a new leading digit (9.996 -> "10.00").
    let carried = s
        .parse::<f64>()
        .map(|r| r.abs() >= 10f64.powi(exp + 1))
        .unwrap_or(false);
    if carried && decimals > 0 {
        decimals -= 1;
        s = format!("{v:.decimals$}");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kibibytes_show_three_digits() {
        assert_eq!(size_string(1536.0, "B", Ratio::Binary), "1.50KiB");
    }

    #[test]
    fn unprefixed_bytes_keep_two_blank_columns() {
        assert_eq!(size_string(0.0, "B", Ratio::Binary), "0.00  B");
        assert_eq!(size_string(512.0, "B", Ratio::Binary), " 512  B");
        assert_eq!(size_string(12.0, "B", Ratio::Binary), "12.0  B");
    }

    #[test]
    fn decimal_lines() {
        assert_eq!(size_string(500.0, "", Ratio::Decimal), " 500 ");
        assert_eq!(size_string(2500.0, "/s", Ratio::Decimal), "2.50k/s");
    }

    #[test]
    fn large_values_print_as_integers() {
        // 100 KiB exactly and 13 GiB.
        assert_eq!(size_string(102_400.0, "B", Ratio::Binary), " 100KiB");
        assert_eq!(
            size_string(13.0 * 1024.0 * 1024.0 * 1024.0, "B", Ratio::Binary),
            "13.0GiB"
        );
    }

    #[test]
    fn rounding_carry_drops_a_decimal() {
        assert_eq!(three_significant(9.996), "10.0");
        assert_eq!(three_significant(0.9996), "1.00");
        assert_eq!(three_significant(1.5), "1.50");
        assert_eq!(three_significant(99.9), "99.9");
    }

    #[test]
    fn wrapped_rate() {
        let mut out = BoundedText::with_max(crate::text::limits::RATE);
        write_size(&mut out, 2048.0, "B/s", Ratio::Binary, "[", "]");
        assert_eq!(out.as_str(), "[2.00KiB/s]");
    }

    #[test]
    fn ceiling_bounds_top_prefix() {
        let s = size_string(1.0e40, "B", Ratio::Binary);
        assert!(s.starts_with("100000"), "{s}");
    }
}
