//! Text to typed value coercion.
//!
//! Integers are decimal with an optional sign and must fit the destination
//! width exactly. Floats accept decimal, scientific and hexadecimal-exponent
//! notation and must stay finite in the destination width. FourCC fields
//! also take a four-character literal.

use thiserror::Error;

use crate::core::tag::fourcc;
use crate::core::value::{FieldCategory, TypeKind, Value};

/// Error coercing one textual value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("empty value")]
    Empty,

    #[error("`{token}` is not a valid {kind}")]
    Invalid { token: String, kind: TypeKind },

    #[error("`{token}` is out of range for {kind}")]
    OutOfRange { token: String, kind: TypeKind },

    #[error("`{token}` is negative but {kind} is unsigned")]
    Negative { token: String, kind: TypeKind },

    #[error("text of {len} bytes does not fit a {capacity}-byte buffer")]
    TextTooLong { len: usize, capacity: usize },

    #[error("`{token}` is not a single character")]
    NotSingleChar { token: String },
}

/// Coerce one token into a scalar of `kind`.
pub fn coerce_value(
    token: &str,
    kind: TypeKind,
    category: FieldCategory,
) -> Result<Value, CoerceError> {
    if category == FieldCategory::FourCC {
        // Codes may carry a trailing space (`AVC `), so try the left-trimmed
        // token before the fully trimmed one.
        for code in [token.trim_start(), token.trim()] {
            if let [a, b, c, d] = *code.as_bytes() {
                if code.is_ascii() {
                    return Ok(Value::U32(fourcc([a, b, c, d])));
                }
            }
        }
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(CoerceError::Empty);
    }

    match kind {
        TypeKind::F32 => parse_float(token, kind).and_then(|v| {
            // Checked before narrowing, which would round down to f32::MAX.
            if v.abs() > f32::MAX as f64 {
                Err(out_of_range(token, kind))
            } else {
                Ok(Value::F32(v as f32))
            }
        }),
        TypeKind::F64 => parse_float(token, kind).map(Value::F64),
        TypeKind::Char => match token.as_bytes() {
            [c] => Ok(Value::Char(*c)),
            _ => Err(CoerceError::NotSingleChar {
                token: token.to_string(),
            }),
        },
        TypeKind::Record(_) => Err(invalid(token, kind)),
        _ => parse_integer(token, kind),
    }
}

/// Coerce a comma-separated list. Every token must coerce; the first
/// failure aborts the whole list.
pub fn coerce_list(
    raw: &str,
    kind: TypeKind,
    category: FieldCategory,
) -> Result<Vec<Value>, CoerceError> {
    raw.split(',')
        .map(|token| coerce_value(token, kind, category))
        .collect()
}

/// Encode `raw` into a zero-filled buffer of `capacity` bytes. The text
/// plus its terminator must fit.
pub fn coerce_text(raw: &str, capacity: usize) -> Result<Vec<u8>, CoerceError> {
    let bytes = raw.as_bytes();
    if bytes.len() >= capacity {
        return Err(CoerceError::TextTooLong {
            len: bytes.len(),
            capacity,
        });
    }

    let mut buf = vec![0; capacity];
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(buf)
}

fn invalid(token: &str, kind: TypeKind) -> CoerceError {
    CoerceError::Invalid {
        token: token.to_string(),
        kind,
    }
}

fn out_of_range(token: &str, kind: TypeKind) -> CoerceError {
    CoerceError::OutOfRange {
        token: token.to_string(),
        kind,
    }
}

fn parse_integer(token: &str, kind: TypeKind) -> Result<Value, CoerceError> {
    let (negative, digits) = match token.as_bytes()[0] {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(token, kind));
    }
    if negative && !kind.is_signed() {
        return Err(CoerceError::Negative {
            token: token.to_string(),
            kind,
        });
    }

    // Only overflows i128 when far out of range for any kind.
    let magnitude: i128 = digits.parse().map_err(|_| out_of_range(token, kind))?;
    let value = if negative { -magnitude } else { magnitude };

    let (min, max) = kind.integer_bounds().ok_or_else(|| invalid(token, kind))?;
    if value < min || value > max {
        return Err(out_of_range(token, kind));
    }

    Ok(match kind {
        TypeKind::U8 => Value::U8(value as u8),
        TypeKind::U16 => Value::U16(value as u16),
        TypeKind::U32 => Value::U32(value as u32),
        TypeKind::U64 => Value::U64(value as u64),
        TypeKind::I8 => Value::I8(value as i8),
        TypeKind::I16 => Value::I16(value as i16),
        TypeKind::I32 => Value::I32(value as i32),
        TypeKind::I64 => Value::I64(value as i64),
        _ => return Err(invalid(token, kind)),
    })
}

/// Exact decimal expansion of `f64::MAX`.
const F64_MAX_DIGITS: &str = "179769313486231570814527423731704356798070567525844996598917476803157260780028538760589558632766878171540458953514382464234321326889464182768467546703537516986049910576551282076245490090389328944075868508455133942304583236903222948165808559332123348274797826204144723168738177180919299881250404026184124858368";

/// Parse a finite float. `inf`/`nan` spellings are rejected, and so is any
/// magnitude above `f64::MAX`, including those that round down to it.
fn parse_float(token: &str, kind: TypeKind) -> Result<f64, CoerceError> {
    let (negative, body) = match token.as_bytes()[0] {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (magnitude, above_max) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        let hex = parse_hex_float(hex).ok_or_else(|| invalid(token, kind))?;
        (hex.to_f64(), hex.exceeds_f64_max())
    } else {
        let decimal_only = body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if !decimal_only || !body.bytes().any(|b| b.is_ascii_digit()) {
            return Err(invalid(token, kind));
        }
        let magnitude = body.parse::<f64>().map_err(|_| invalid(token, kind))?;
        (magnitude, magnitude == f64::MAX && decimal_exceeds(body, F64_MAX_DIGITS))
    };

    if !magnitude.is_finite() || above_max {
        return Err(out_of_range(token, kind));
    }
    Ok(if negative { -magnitude } else { magnitude })
}

/// Whether the unsigned decimal `body` is above the integer `limit`, compared
/// digit by digit without rounding.
fn decimal_exceeds(body: &str, limit: &str) -> bool {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], &body[pos + 1..]),
        None => (body, "0"),
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        return false;
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let significant = digits.trim_start_matches('0');
    // Position of the decimal point within `significant`.
    let point = int_part.len() as i64 + exponent - (digits.len() - significant.len()) as i64;
    let significant = significant.trim_end_matches('0');

    if significant.is_empty() {
        return false;
    }
    match point.cmp(&(limit.len() as i64)) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => significant > limit,
    }
}

/// Hexadecimal significand scaled by a power of two.
struct HexFloat {
    bits: u128,
    shift: i32,
    /// Nonzero digits were dropped past the significand's precision.
    truncated: bool,
}

impl HexFloat {
    fn to_f64(&self) -> f64 {
        // Two half steps keep the scale factor representable near the limits.
        let half = self.shift / 2;
        self.bits as f64 * 2f64.powi(half) * 2f64.powi(self.shift - half)
    }

    /// Whether the exact value is above `f64::MAX`, which is
    /// `(2^53 - 1) * 2^971`.
    fn exceeds_f64_max(&self) -> bool {
        if self.bits == 0 {
            return false;
        }
        let top = 127 - self.bits.leading_zeros() as i32;
        match top + self.shift {
            e if e > 1023 => true,
            e if e < 1023 => false,
            _ => {
                let (high, rest) = if top >= 52 {
                    let low = (top - 52) as u32;
                    (self.bits >> low, self.bits & ((1u128 << low) - 1))
                } else {
                    (self.bits << (52 - top) as u32, 0)
                };
                high == (1u128 << 53) - 1 && (rest != 0 || self.truncated)
            }
        }
    }
}

/// `h.hhh[p[+-]ddd]` with the `0x` prefix already stripped.
fn parse_hex_float(text: &str) -> Option<HexFloat> {
    let (mantissa, exponent) = match text.find(['p', 'P']) {
        Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
        None => (text, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut bits: u128 = 0;
    let mut scale: i64 = 0;
    let mut truncated = false;
    for (digits, is_frac) in [(int_part, false), (frac_part, true)] {
        for c in digits.chars() {
            let d = c.to_digit(16)? as u128;
            if bits >> 120 == 0 {
                bits = bits << 4 | d;
                if is_frac {
                    scale -= 4;
                }
            } else {
                truncated |= d != 0;
                if !is_frac {
                    // Digits past u128 precision still shift the value.
                    scale += 4;
                }
            }
        }
    }

    let exp: i64 = match exponent {
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            e.parse::<i64>().unwrap_or(if e.starts_with('-') {
                i64::MIN / 2
            } else {
                i64::MAX / 2
            })
        }
        None => 0,
    };

    Some(HexFloat {
        bits,
        shift: exp.saturating_add(scale).clamp(-4000, 4000) as i32,
        truncated,
    })
}
