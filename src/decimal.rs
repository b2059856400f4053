/// Digits that always fit in a `u64` (10^19 < 2^64).
const MAX_MANTISSA_DIGITS: u32 = 19;

/// Mantissas at or above this lose precision when cast to `f64`.
const MAX_EXACT_MANTISSA: u64 = 1 << 53;

const MAX_EXACT_POW10: i32 = 22;

/// Largest integer magnitude we still trust after pre-scaling by a power of ten.
const MAX_EXACT_INT: f64 = 1e15;

const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexed {
    pub mantissa: u64,
    pub exponent: i32,
    pub negative: bool,
    /// A non-zero digit past the 19th significant digit was dropped.
    pub truncated: bool,
    /// Bytes of the input that belong to the numeral.
    pub consumed: usize,
}

/// Scans the longest numeral prefix of `bytes`.
///
/// Returns `None` when no digit is found. Scanning stops at the first byte that is
/// neither a digit nor the first decimal point, so `12.34.56` lexes as `12.34`.
pub fn lex(bytes: &[u8]) -> Option<Lexed> {
    let mut i = 0;
    let mut negative = false;

    match bytes.first() {
        Some(b'-') => {
            negative = true;
            i += 1;
        }
        Some(b'+') => i += 1,
        _ => (),
    }

    let mut mantissa = 0u64;
    let mut saw_digits = false;
    let mut saw_dot = false;
    let mut truncated = false;
    // significant digits seen, absorbed or not
    let mut digits: i32 = 0;
    let mut absorbed: u32 = 0;
    // position of the decimal point relative to the first significant digit
    let mut point: i32 = 0;

    while let Some(&b) = bytes.get(i) {
        match b {
            b'.' if !saw_dot => {
                saw_dot = true;
                point = digits;
            }
            b'0' if digits == 0 => {
                saw_digits = true;
                point -= 1;
            }
            b'0'..=b'9' => {
                saw_digits = true;
                digits += 1;
                if absorbed < MAX_MANTISSA_DIGITS {
                    mantissa = mantissa * 10 + (b - b'0') as u64;
                    absorbed += 1;
                } else if b != b'0' {
                    truncated = true;
                }
            }
            _ => break,
        }
        i += 1;
    }

    if !saw_digits {
        return None;
    }

    if !saw_dot {
        point = digits;
    }

    let exponent = if mantissa == 0 {
        0
    } else {
        point - absorbed as i32
    };

    Some(Lexed {
        mantissa,
        exponent,
        negative,
        truncated,
        consumed: i,
    })
}

/// Builds the `f64` for a lexed numeral when the result is guaranteed exact.
pub fn reconstruct(lexed: &Lexed) -> Option<f64> {
    if lexed.mantissa >= MAX_EXACT_MANTISSA {
        return None;
    }

    let mut value = lexed.mantissa as f64;
    if lexed.negative {
        value = -value;
    }

    let mut exponent = lexed.exponent;
    match exponent {
        0 => Some(value),
        1..=37 => {
            if exponent > MAX_EXACT_POW10 {
                value *= POW10[(exponent - MAX_EXACT_POW10) as usize];
                exponent = MAX_EXACT_POW10;
            }
            if value.abs() > MAX_EXACT_INT {
                return None;
            }
            Some(value * POW10[exponent as usize])
        }
        -22..=-1 => Some(value / POW10[(-exponent) as usize]),
        _ => None,
    }
}

/// Parses a reading through the exact fast path.
///
/// `None` means the input either isn't a numeral or falls outside the exactness
/// envelope (more than 2^53 in the mantissa, or an exponent beyond ±22 after
/// normalisation). Trailing bytes after the numeral are ignored.
#[inline]
pub fn parse_decimal(bytes: &[u8]) -> Option<f64> {
    lex(bytes).as_ref().and_then(reconstruct)
}

/// Like [`parse_decimal`], but the numeral must span all of `bytes`.
#[inline]
pub fn parse_exact(bytes: &[u8]) -> Option<f64> {
    let lexed = lex(bytes)?;
    if lexed.consumed != bytes.len() {
        return None;
    }
    reconstruct(&lexed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn std_parse(s: &str) -> f64 {
        s.parse().unwrap()
    }

    #[test]
    fn test_basic_readings() {
        assert_eq!(parse_decimal(b"0"), Some(0.0));
        assert_eq!(parse_decimal(b"-3.50"), Some(-3.5));
        assert_eq!(parse_decimal(b"12.3"), Some(12.3));
        assert_eq!(parse_decimal(b"-99.9"), Some(-99.9));
        assert_eq!(parse_decimal(b"+7.25"), Some(7.25));
        assert_eq!(parse_decimal(b"5."), Some(5.0));
        assert_eq!(parse_decimal(b".5"), Some(0.5));
    }

    #[test]
    fn test_rejects_non_numerals() {
        assert_eq!(parse_decimal(b""), None);
        assert_eq!(parse_decimal(b"-"), None);
        assert_eq!(parse_decimal(b"."), None);
        assert_eq!(parse_decimal(b"abc"), None);
        assert_eq!(parse_decimal(b" 1.0"), None);
    }

    #[test]
    fn test_second_point_stops_scan() {
        let lexed = lex(b"12.34.56").unwrap();
        assert_eq!(lexed.consumed, 5);
        assert_eq!(parse_decimal(b"12.34.56"), Some(12.34));
    }

    #[test]
    fn test_parse_exact_rejects_trailing_bytes() {
        assert_eq!(parse_exact(b"12.34"), Some(12.34));
        assert_eq!(parse_exact(b"12.34.56"), None);
        assert_eq!(parse_exact(b"1e3"), None);
        assert_eq!(parse_exact(b"4.5 "), None);
        assert_eq!(parse_exact(b""), None);
    }

    #[test]
    fn test_negative_zero() {
        let v = parse_decimal(b"-0.0").unwrap();
        assert_eq!(v, 0.0);
        assert!(v.is_sign_negative());
    }

    #[test]
    fn test_leading_zeros_do_not_shift_point() {
        let lexed = lex(b"000.0500").unwrap();
        assert_eq!(lexed.mantissa, 500);
        assert_eq!(lexed.exponent, -4);
        assert_eq!(parse_decimal(b"000.0500"), Some(0.05));
        assert_eq!(parse_decimal(b"007"), Some(7.0));
    }

    #[test]
    fn test_lex_exponent() {
        let lexed = lex(b"1.50").unwrap();
        assert_eq!((lexed.mantissa, lexed.exponent), (150, -2));

        let lexed = lex(b"100").unwrap();
        assert_eq!((lexed.mantissa, lexed.exponent), (100, 0));

        let lexed = lex(b"0.000").unwrap();
        assert_eq!((lexed.mantissa, lexed.exponent), (0, 0));
    }

    #[test]
    fn test_truncation_past_19_digits() {
        let lexed = lex(b"12345678901234567891").unwrap();
        assert!(lexed.truncated);
        assert_eq!(lexed.exponent, 1);
        assert_eq!(parse_decimal(b"12345678901234567891"), None);

        // Zeros past the cap shift the exponent but don't truncate.
        let lexed = lex(b"10000000000000000000").unwrap();
        assert!(!lexed.truncated);
        assert_eq!(lexed.exponent, 1);
    }

    #[test]
    fn test_mantissa_bound() {
        assert_eq!(parse_decimal(b"9007199254740991"), Some(9007199254740991.0));
        assert_eq!(parse_decimal(b"9007199254740992"), None);
    }

    #[test]
    fn test_positive_exponent_prescale() {
        // 1 followed by 30 zeros: mantissa 10^18 is too wide, rejected.
        assert_eq!(parse_decimal(b"1000000000000000000000000000000"), None);

        let lexed = Lexed {
            mantissa: 12,
            exponent: 25,
            negative: false,
            truncated: false,
            consumed: 0,
        };
        assert_eq!(reconstruct(&lexed), Some(std_parse("12e25")));

        let lexed = Lexed {
            mantissa: 123_456_789_012,
            exponent: 30,
            ..lexed
        };
        assert_eq!(reconstruct(&lexed), None);

        let lexed = Lexed {
            mantissa: 1,
            exponent: 38,
            ..lexed
        };
        assert_eq!(reconstruct(&lexed), None);
    }

    #[test]
    fn test_negative_exponent_bound() {
        assert_eq!(
            parse_decimal(b"0.0000000000000000000001"),
            Some(std_parse("1e-22"))
        );
        assert_eq!(parse_decimal(b"0.00000000000000000000001"), None);
    }

    #[test]
    fn test_matches_std_parser() {
        let cases = [
            "0.1", "0.2", "0.3", "-12.75", "3.14159", "99.99", "123456.789", "-0.001",
            "1234567890.12345", "42", "-17.0", "0.000123",
        ];
        for case in cases {
            assert_eq!(
                parse_decimal(case.as_bytes()).map(f64::to_bits),
                Some(std_parse(case).to_bits()),
                "{case}"
            );
        }
    }
}
