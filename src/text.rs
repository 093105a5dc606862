use half::f16;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Half, OutputConfig, Result};

/// Largest finite half, as the `f32` the text is parsed into.
const HALF_MAX: f32 = 65504.0;

/// Digits that always identify a half uniquely.
const MAX_SHORTEST_DIGITS: usize = 5;

/// Decimal exponent at which shortest output switches to exponent notation.
const SHORTEST_FIXED_LIMIT: i32 = 6;

#[inline]
fn is_space(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Finite { nonzero: bool },
    Infinite,
    NaN,
}

/// The numeric prefix of a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Number {
    pub(crate) len: usize,
    pub(crate) kind: NumberKind,
}

/// Finds the longest prefix of `s` that reads as a float, the way `strtof`
/// does for decimal input. Returns `None` when no number starts at `s`.
pub(crate) fn scan_number(s: &[u8]) -> Option<Number> {
    let mut pos = 0;
    if matches!(s.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let rest = &s[pos..];
    for (word, kind) in [
        ("infinity", NumberKind::Infinite),
        ("inf", NumberKind::Infinite),
        ("nan", NumberKind::NaN),
    ] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            return Some(Number {
                len: pos + word.len(),
                kind,
            });
        }
    }

    let mut digits = 0;
    let mut nonzero = false;
    while pos < s.len() && s[pos].is_ascii_digit() {
        nonzero |= s[pos] != b'0';
        digits += 1;
        pos += 1;
    }
    if pos < s.len() && s[pos] == b'.' {
        pos += 1;
        while pos < s.len() && s[pos].is_ascii_digit() {
            nonzero |= s[pos] != b'0';
            digits += 1;
            pos += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // an exponent only counts when digits follow it
    if pos < s.len() && s[pos].eq_ignore_ascii_case(&b'e') {
        let mut end = pos + 1;
        if matches!(s.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        if s.get(end).map_or(false, u8::is_ascii_digit) {
            while end < s.len() && s[end].is_ascii_digit() {
                end += 1;
            }
            pos = end;
        }
    }

    Some(Number {
        len: pos,
        kind: NumberKind::Finite { nonzero },
    })
}

impl Half {
    /// Parses text into a half.
    ///
    /// Surrounding whitespace is ignored. The number is read as an `f32` and
    /// rounded to the nearest half; magnitudes above 65504 (including
    /// infinities) are rejected, `NaN` is accepted.
    pub fn parse(text: &str) -> Result<Half> {
        let bytes = text.as_bytes();
        let start = bytes
            .iter()
            .position(|c| !is_space(*c))
            .unwrap_or(bytes.len());
        let invalid = || {
            tracing::debug!(input = text, "invalid half syntax");
            Error::InvalidTextSyntax(text.to_string())
        };

        let number = scan_number(&bytes[start..]).ok_or_else(invalid)?;
        let end = start + number.len;
        let val: f32 = text[start..end].parse().map_err(|_| invalid())?;

        if !(-HALF_MAX..=HALF_MAX).contains(&val) && !val.is_nan() {
            tracing::debug!(input = text, "half input out of range");
            return Err(Error::OutOfRange(text.to_string()));
        }

        if !bytes[end..].iter().all(|c| is_space(*c)) {
            return Err(invalid());
        }

        Ok(Half(f16::from_f32(val)))
    }

    /// Formats the half as text.
    pub fn format(self, config: &OutputConfig) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        if self.is_infinite() {
            return if self.is_sign_negative() {
                "-Infinity".to_string()
            } else {
                "Infinity".to_string()
            };
        }

        let magnitude = Half::from_bits(self.to_bits() & 0x7fff);
        let (digits, exp, fixed_limit) = if config.shortest() {
            let (digits, exp) = shortest_digits(magnitude);
            (digits, exp, SHORTEST_FIXED_LIMIT)
        } else {
            let precision = config.significant_digits();
            let (digits, exp) = decimal_digits(magnitude.to_f64(), precision);
            (digits, exp, precision as i32)
        };

        let mut out = String::with_capacity(16);
        if self.is_sign_negative() {
            out.push('-');
        }
        if (-4..fixed_limit).contains(&exp) {
            write_fixed(&mut out, &digits, exp);
        } else {
            write_exponent(&mut out, &digits, exp);
        }
        out
    }
}

/// Rounds `v` to `precision` significant digits. Returns the digits without
/// trailing zeros and the decimal exponent of the first digit.
fn decimal_digits(v: f64, precision: usize) -> (String, i32) {
    let sci = format!("{:.*e}", precision.saturating_sub(1), v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp = exp.parse().unwrap_or(0);

    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let len = digits.trim_end_matches('0').len().max(1);
    digits.truncate(len);
    (digits, exp)
}

/// Fewest significant digits that parse back to `v`.
fn shortest_digits(v: Half) -> (String, i32) {
    let value = v.to_f64();
    // integers print exactly; fewer digits would only be padded with zeros
    if value.fract() == 0.0 {
        return decimal_digits(value, MAX_SHORTEST_DIGITS);
    }
    for precision in 1..MAX_SHORTEST_DIGITS {
        let (digits, exp) = decimal_digits(value, precision);
        let candidate = format!("{}e{}", digits, exp - (digits.len() as i32 - 1));
        if let Ok(parsed) = candidate.parse::<f32>() {
            if f16::from_f32(parsed).to_bits() == v.to_bits() {
                return (digits, exp);
            }
        }
    }
    decimal_digits(value, MAX_SHORTEST_DIGITS)
}

fn write_fixed(out: &mut String, digits: &str, exp: i32) {
    if exp < 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-exp - 1) as usize));
        out.push_str(digits);
        return;
    }

    let int_len = exp as usize + 1;
    if digits.len() > int_len {
        out.push_str(&digits[..int_len]);
        out.push('.');
        out.push_str(&digits[int_len..]);
    } else {
        out.push_str(digits);
        out.extend(std::iter::repeat('0').take(int_len - digits.len()));
    }
}

fn write_exponent(out: &mut String, digits: &str, exp: i32) {
    out.push_str(&digits[..1]);
    if digits.len() > 1 {
        out.push('.');
        out.push_str(&digits[1..]);
    }
    out.push('e');
    out.push(if exp < 0 { '-' } else { '+' });
    out.push_str(&format!("{:02}", exp.unsigned_abs()));
}

impl FromStr for Half {
    type Err = Error;

    fn from_str(s: &str) -> Result<Half> {
        Half::parse(s)
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&OutputConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::{scan_number, Number, NumberKind};
    use crate::{Error, Half, OutputConfig};

    fn h(v: f32) -> Half {
        Half::from_f32(v).unwrap()
    }

    #[test]
    fn test_scan_number() {
        assert_eq!(
            Some(Number {
                len: 6,
                kind: NumberKind::Finite { nonzero: true }
            }),
            scan_number(b"-1.5e3xyz")
        );
        assert_eq!(
            Some(Number {
                len: 2,
                kind: NumberKind::Finite { nonzero: false }
            }),
            scan_number(b"0.e")
        );
        assert_eq!(3, scan_number(b"1.2.3").unwrap().len);
        assert_eq!(1, scan_number(b"1e+").unwrap().len);
        assert_eq!(NumberKind::Infinite, scan_number(b"-Infinity").unwrap().kind);
        assert_eq!(4, scan_number(b"+inf").unwrap().len);
        assert_eq!(NumberKind::NaN, scan_number(b"NaN").unwrap().kind);
        assert_eq!(None, scan_number(b"."));
        assert_eq!(None, scan_number(b"abc"));
        assert_eq!(None, scan_number(b""));
    }

    #[test]
    fn test_parse() {
        assert_eq!(h(1.5), Half::parse("1.5").unwrap());
        assert_eq!(h(-2.0), Half::parse("  -2 \n").unwrap());
        assert_eq!(h(1000.0), Half::parse("1e3").unwrap());
        assert_eq!(h(0.5), Half::parse(".5").unwrap());
        assert_eq!(Half::MAX, Half::parse("65504").unwrap());
        assert_eq!(Half::MIN, "-65504".parse::<Half>().unwrap());
        assert!(Half::parse("nan").unwrap().is_nan());
    }

    #[test]
    fn test_parse_rounds_to_nearest_even() {
        assert_eq!(h(2048.0), Half::parse("2049").unwrap());
        assert_eq!(h(2052.0), Half::parse("2051").unwrap());
        assert_eq!(0x2e66, Half::parse("0.1").unwrap().to_bits());
    }

    #[test]
    fn test_parse_tiny_rounds_to_zero() {
        assert_eq!(Half::ZERO, Half::parse("1e-30").unwrap());
        assert!(Half::parse("-1e-30").unwrap().is_sign_negative());
    }

    #[test]
    fn test_parse_invalid_syntax() {
        for input in ["", "   ", "abc", "1.2.3", "1 2", "1x", ".", "--1"] {
            assert_eq!(
                Err(Error::InvalidTextSyntax(input.to_string())),
                Half::parse(input),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_hex_floats() {
        for input in ["0x1p-3", "0X10", "-0x1.8p1"] {
            assert_eq!(
                Err(Error::InvalidTextSyntax(input.to_string())),
                Half::parse(input),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        for input in ["100000", "-100000", "65505", "1e10", "inf", "-Infinity", "1e99999"] {
            assert_eq!(
                Err(Error::OutOfRange(input.to_string())),
                Half::parse(input),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_range_checked_before_trailing_junk() {
        assert_eq!(
            Err(Error::OutOfRange("1e9xyz".to_string())),
            Half::parse("1e9xyz")
        );
    }

    #[test]
    fn test_format_shortest() {
        let config = OutputConfig::default();
        assert_eq!("1.5", h(1.5).format(&config));
        assert_eq!("-2", h(-2.0).format(&config));
        assert_eq!("0.1", Half::parse("0.1").unwrap().format(&config));
        assert_eq!("0.3333", h(1.0 / 3.0).format(&config));
        assert_eq!("65504", Half::MAX.format(&config));
        assert_eq!("1000", h(1000.0).format(&config));
        assert_eq!("0.0001", Half::parse("0.0001").unwrap().format(&config));
        assert_eq!("6e-08", Half::MIN_POSITIVE_SUBNORMAL.format(&config));
        assert_eq!("0", Half::ZERO.format(&config));
        assert_eq!("-0", Half::NEG_ZERO.format(&config));
    }

    #[test]
    fn test_format_fixed_digits() {
        let config = OutputConfig::new(0);
        assert_eq!("0.0999756", Half::parse("0.1").unwrap().format(&config));
        assert_eq!("65504", Half::MAX.format(&config));
        assert_eq!("1.5", h(1.5).format(&config));
        assert_eq!("5.96046e-08", Half::MIN_POSITIVE_SUBNORMAL.format(&config));

        let config = OutputConfig::new(-5);
        assert_eq!("7e+04", Half::MAX.format(&config));
        assert_eq!("0.1", Half::parse("0.1").unwrap().format(&config));
    }

    #[test]
    fn test_format_special() {
        let config = OutputConfig::default();
        assert_eq!("NaN", Half::NAN.format(&config));
        assert_eq!("Infinity", Half::INFINITY.format(&config));
        assert_eq!("-Infinity", Half::NEG_INFINITY.format(&config));
        assert_eq!("NaN", Half::NAN.format(&OutputConfig::new(0)));
    }

    #[test]
    fn test_display() {
        assert_eq!("1.5", h(1.5).to_string());
        assert_eq!("0.1", format!("{}", Half::parse("0.1").unwrap()));
    }

    #[test]
    fn test_text_round_trip_every_finite_value() {
        let config = OutputConfig::default();
        for bits in 0..=u16::MAX {
            let v = Half::from_bits(bits);
            if !v.is_finite() {
                continue;
            }
            let text = v.format(&config);
            assert_eq!(bits, Half::parse(&text).unwrap().to_bits(), "{}", text);
        }
    }
}
