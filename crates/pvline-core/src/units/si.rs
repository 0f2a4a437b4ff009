//! SI prefix scaling.

use std::fmt;

/// Decimal prefixes, smallest to largest. The empty entry is "no prefix".
const DECIMAL: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "μ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Binary prefixes; only kilo differs in case.
const BINARY: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "μ", "m", "", "K", "M", "G", "T", "P", "E", "Z", "Y",
];

const UNPREFIXED: usize = 8;

/// Divisor between adjacent prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    /// 1000, for lines and other generic units.
    Decimal,
    /// 1024, for byte units (`KiB`, `MiB`, ...).
    Binary,
}

impl Ratio {
    pub fn divisor(self) -> f64 {
        match self {
            Ratio::Decimal => 1000.0,
            Ratio::Binary => 1024.0,
        }
    }

    fn table(self) -> &'static [&'static str; 17] {
        match self {
            Ratio::Decimal => &DECIMAL,
            Ratio::Binary => &BINARY,
        }
    }
}

/// A magnitude reduced by whole prefix steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled {
    pub value: f64,
    pub prefix: Prefix,
}

/// Unit prefix with a constant column width per ratio: one column for
/// decimal, two for binary (`Ki`, or two blanks when unprefixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    index: usize,
    ratio: Ratio,
}

impl Prefix {
    pub fn symbol(&self) -> &'static str {
        self.ratio.table()[self.index]
    }

    pub fn is_blank(&self) -> bool {
        self.index == UNPREFIXED
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ratio, self.is_blank()) {
            (Ratio::Decimal, true) => f.write_str(" "),
            (Ratio::Decimal, false) => f.write_str(self.symbol()),
            (Ratio::Binary, true) => f.write_str("  "),
            (Ratio::Binary, false) => write!(f, "{}i", self.symbol()),
        }
    }
}

/// Scale `value` until it sits below `ratio * 0.97` and at or above 1.0,
/// stopping at either end of the prefix table.
///
/// Zero, negative and non-finite values come back as zero with a blank
/// prefix, so a stalled rate never reads as `0yB`.
pub fn si_scale(value: f64, ratio: Ratio) -> Scaled {
    let table = ratio.table();
    let mut index = UNPREFIXED;

    if !value.is_finite() || value <= 0.0 {
        return Scaled {
            value: 0.0,
            prefix: Prefix { index, ratio },
        };
    }

    let divisor = ratio.divisor();
    let cutoff = divisor * 0.97;
    let mut v = value;

    while v > cutoff && index + 1 < table.len() {
        v /= divisor;
        index += 1;
    }
    while v < 1.0 && index > 0 {
        v *= divisor;
        index -= 1;
    }

    Scaled {
        value: v,
        prefix: Prefix { index, ratio },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_blank() {
        for ratio in [Ratio::Decimal, Ratio::Binary] {
            let s = si_scale(0.0, ratio);
            assert_eq!(s.value, 0.0);
            assert!(s.prefix.is_blank());
        }
        assert_eq!(si_scale(0.0, Ratio::Binary).prefix.to_string(), "  ");
        assert_eq!(si_scale(0.0, Ratio::Decimal).prefix.to_string(), " ");
    }

    #[test]
    fn scaled_value_stays_in_range() {
        let samples = [
            1.0, 3.5, 512.0, 1536.0, 65_536.0, 1.0e6, 7.25e9, 3.0e14, 1.0e20, 0.5, 0.003, 2.5e-9,
        ];
        for ratio in [Ratio::Decimal, Ratio::Binary] {
            let r = ratio.divisor();
            for v in samples {
                let s = si_scale(v, ratio);
                assert!(s.value >= 1.0, "{v} -> {}", s.value);
                assert!(s.value < r, "{v} -> {}", s.value);
            }
        }
    }

    #[test]
    fn values_just_below_ratio_stay_unprefixed() {
        // Dividing leaves them below 1.0, so they are scaled straight back.
        let s = si_scale(975.0, Ratio::Decimal);
        assert_eq!(s.value, 975.0);
        assert!(s.prefix.is_blank());

        let s = si_scale(1000.0, Ratio::Binary);
        assert_eq!(s.value, 1000.0);
        assert!(s.prefix.is_blank());

        let s = si_scale(1000.0, Ratio::Decimal);
        assert_eq!(s.value, 1.0);
        assert_eq!(s.prefix.symbol(), "k");
    }

    #[test]
    fn binary_prefixes_carry_i() {
        let s = si_scale(1536.0, Ratio::Binary);
        assert!((s.value - 1.5).abs() < 1e-12);
        assert_eq!(s.prefix.to_string(), "Ki");

        let s = si_scale(3.0 * 1024.0 * 1024.0, Ratio::Binary);
        assert_eq!(s.prefix.to_string(), "Mi");
    }

    #[test]
    fn decimal_uses_lowercase_kilo() {
        let s = si_scale(2500.0, Ratio::Decimal);
        assert!((s.value - 2.5).abs() < 1e-12);
        assert_eq!(s.prefix.to_string(), "k");
    }

    #[test]
    fn small_values_scale_down() {
        let s = si_scale(0.5, Ratio::Decimal);
        assert!((s.value - 500.0).abs() < 1e-9);
        assert_eq!(s.prefix.symbol(), "m");
    }

    #[test]
    fn table_ends_bound_scaling() {
        let huge = si_scale(1.0e40, Ratio::Decimal);
        assert_eq!(huge.prefix.symbol(), "Y");
        assert!(huge.value > 1000.0);

        let tiny = si_scale(1.0e-40, Ratio::Decimal);
        assert_eq!(tiny.prefix.symbol(), "y");
        assert!(tiny.value < 1.0);
    }

    #[test]
    fn degenerate_inputs_are_zero() {
        assert_eq!(si_scale(f64::NAN, Ratio::Decimal).value, 0.0);
        assert_eq!(si_scale(f64::INFINITY, Ratio::Binary).value, 0.0);
        assert_eq!(si_scale(-4.0, Ratio::Binary).value, 0.0);
    }
}
