use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::errors::UnitParseError;

static UNIT_VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?[0-9]*\.?[0-9]+)(px|rem)$").expect("unit value pattern is valid")
});

/// CSS length units understood by the sizing math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Px,
    Rem,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Rem => "rem",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finite magnitude tagged with a `px` or `rem` unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitValue {
    pub value: f64,
    pub unit: Unit,
}

impl UnitValue {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub fn rem(value: f64) -> Self {
        Self::new(value, Unit::Rem)
    }

    /// Parse a string of the exact form `[+-]?digits[.digits](px|rem)`.
    ///
    /// Whitespace, exponents and any other unit are rejected.
    pub fn parse(input: &str) -> Result<Self, UnitParseError> {
        let captures = UNIT_VALUE_PATTERN.captures(input).ok_or(UnitParseError)?;

        let value: f64 = captures[1].parse().map_err(|_| UnitParseError)?;
        if !value.is_finite() {
            return Err(UnitParseError);
        }

        let unit = match &captures[2] {
            "px" => Unit::Px,
            "rem" => Unit::Rem,
            other => unreachable!("unit pattern only captures px or rem, got {other}"),
        };

        Ok(Self { value, unit })
    }

    /// Magnitude in pixels, scaling `rem` by the root font size
    pub fn to_pixels(&self, root_font_size_pixel: f64) -> f64 {
        match self.unit {
            Unit::Px => self.value,
            Unit::Rem => self.value * root_font_size_pixel,
        }
    }
}

impl FromStr for UnitValue {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// Render a number the way a browser-side script would print it:
/// shortest round-trip digits, no trailing `.0`, and `-0` as `0`.
///
/// Magnitudes below `1e-6` or from `1e21` up use exponent form
/// (`1e-7`, `1e+21`), everything else plain decimals.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e-6 || magnitude >= 1e21 {
        let exponential = format!("{value:e}");
        return match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exponential,
        };
    }

    format!("{value}")
}

/// Round to `digits` decimal places, ties away from zero.
///
/// The exact binary value is rounded, so `1.005` at two digits (stored
/// slightly below the tie) becomes `1`, while `0.0625` (an exact tie at
/// three digits) becomes `0.063`.
pub fn round_decimal(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // A tie at `digits` decimals is exactly an odd multiple of 2^-(digits + 1);
    // scaling by a power of two is exact, so the check is too.
    let scaled = value * 2f64.powi(digits as i32 + 1);
    let is_tie = scaled.fract() == 0.0 && scaled % 2.0 != 0.0;

    let fixed = if is_tie {
        let factor = 10f64.powi(digits as i32);
        let away = (value.abs() * factor).trunc() + 1.0;
        format!("{:.*}", digits as usize, value.signum() * away / factor)
    } else {
        format!("{:.*}", digits as usize, value)
    };

    // `fixed` came out of float formatting, so it always parses back.
    fixed.parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(UnitValue::px(1.0).to_string(), "1px");
        assert_eq!(UnitValue::rem(0.1).to_string(), "0.1rem");
        assert_eq!(UnitValue::px(-768.0).to_string(), "-768px");
        assert_eq!(UnitValue::px(-0.0).to_string(), "0px");
    }

    #[test]
    fn test_parse_accepted_forms() {
        let cases = [
            ("1px", 1.0, Unit::Px),
            ("1rem", 1.0, Unit::Rem),
            ("01px", 1.0, Unit::Px),
            ("0.1px", 0.1, Unit::Px),
            (".1px", 0.1, Unit::Px),
            ("-1px", -1.0, Unit::Px),
            ("-0.1px", -0.1, Unit::Px),
            ("-.1px", -0.1, Unit::Px),
            ("+2.5rem", 2.5, Unit::Rem),
        ];

        for (input, value, unit) in cases {
            let parsed = UnitValue::parse(input)
                .unwrap_or_else(|_| panic!("'{}' should parse", input));
            assert_eq!(parsed, UnitValue::new(value, unit), "parsing '{}'", input);
        }
    }

    #[test]
    fn test_parse_rejected_forms() {
        let rejected = [
            "0.0.1px", "1PX", "1", "1em", "md", "", "1.px", " 1px", "1px ", "1e3px", "1,000px",
        ];
        for input in rejected {
            assert_eq!(UnitValue::parse(input), Err(UnitParseError), "'{}' should fail", input);
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_numeral() {
        let huge = format!("{}px", "9".repeat(400));
        assert!(UnitValue::parse(&huge).is_err());
    }

    #[test]
    fn test_display_parse_round_trip() {
        for value in [UnitValue::px(768.0), UnitValue::rem(2.125), UnitValue::px(-0.5)] {
            assert_eq!(value.to_string().parse::<UnitValue>(), Ok(value));
        }
    }

    #[test]
    fn test_to_pixels() {
        assert_eq!(UnitValue::px(24.0).to_pixels(16.0), 24.0);
        assert_eq!(UnitValue::rem(2.0).to_pixels(16.0), 32.0);
        assert_eq!(UnitValue::rem(2.0).to_pixels(10.0), 20.0);
    }

    #[test]
    fn test_round_decimal_keeps_short_values() {
        assert_eq!(round_decimal(6.25, 3), 6.25);
        assert_eq!(round_decimal(3.125, 3), 3.125);
        assert_eq!(round_decimal(64.0, 3), 64.0);
    }

    #[test]
    fn test_round_decimal_rounds_to_nearest() {
        assert_eq!(round_decimal(3.90625, 3), 3.906);
        assert_eq!(round_decimal(1.0 / 3.0, 3), 0.333);
        assert_eq!(round_decimal(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_decimal(-2.0 / 3.0, 3), -0.667);
        assert_eq!(round_decimal(3.90625, 5), 3.90625);
    }

    #[test]
    fn test_round_decimal_ties_go_away_from_zero() {
        assert_eq!(round_decimal(0.0625, 3), 0.063);
        assert_eq!(round_decimal(2.5625, 3), 2.563);
        assert_eq!(round_decimal(-0.0625, 3), -0.063);
        assert_eq!(round_decimal(0.5, 0), 1.0);
        assert_eq!(round_decimal(2.5, 0), 3.0);
    }

    #[test]
    fn test_round_decimal_uses_the_stored_value() {
        // 1.005 is stored just below its decimal tie
        assert_eq!(round_decimal(1.005, 2), 1.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(6.25), "6.25");
        assert_eq!(format_number(-16.0), "-16");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(round_decimal(-0.0001, 3)), "0");
    }

    #[test]
    fn test_format_number_exponent_ranges() {
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-1.5e-7), "-1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(2.5e22), "2.5e+22");
        assert_eq!(UnitValue::px(1e-7).to_string(), "1e-7px");
    }
}
