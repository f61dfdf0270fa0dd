//! Strict text-to-scalar converters for the external grammar.
//!
//! Every converter consumes its whole input: trailing characters are a
//! syntax error, not an out-of-range error. Failures come back as a typed
//! [`LiteralError`]; no best-effort value is ever returned alongside one.

use core::num::IntErrorKind;

use thiserror::Error;

/// Failure of a primitive literal conversion.
///
/// `Invalid` is a syntax failure; the other three are range failures
/// (see [`is_out_of_range`](LiteralError::is_out_of_range)). Floats split
/// range failures by whether the rounded magnitude was zero: `1e400`
/// overflows, `1e-400` underflows.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum LiteralError {
    #[error("invalid {kind}: '{input}'")]
    Invalid { kind: &'static str, input: String },
    #[error("out of range: '{input}'")]
    OutOfRange { input: String },
    #[error("overflow: '{input}'")]
    Overflow { input: String },
    #[error("underflow: '{input}'")]
    Underflow { input: String },
}

impl LiteralError {
    pub fn is_out_of_range(&self) -> bool {
        !matches!(self, LiteralError::Invalid { .. })
    }
}

fn invalid(kind: &'static str, input: &str) -> LiteralError {
    LiteralError::Invalid {
        kind,
        input: input.to_string(),
    }
}

/// Parses `"true"` or `"false"`, nothing else.
pub fn parse_bool(v: &str) -> Result<bool, LiteralError> {
    match v {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid("bool", v)),
    }
}

/// Parses exactly one character.
pub fn parse_char(v: &str) -> Result<char, LiteralError> {
    let mut chars = v.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid("char", v)),
    }
}

/// Parses a decimal signed integer within `[min, max]`.
pub fn parse_i64(v: &str, min: i64, max: i64) -> Result<i64, LiteralError> {
    match v.parse::<i64>() {
        Ok(n) if n < min || n > max => Err(LiteralError::OutOfRange {
            input: v.to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(LiteralError::OutOfRange {
                    input: v.to_string(),
                })
            }
            _ => Err(invalid("integer", v)),
        },
    }
}

/// Parses a decimal unsigned integer within `[0, max]`.
pub fn parse_u64(v: &str, max: u64) -> Result<u64, LiteralError> {
    match v.parse::<u64>() {
        Ok(n) if n > max => Err(LiteralError::OutOfRange {
            input: v.to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(LiteralError::OutOfRange {
                    input: v.to_string(),
                })
            }
            _ => Err(invalid("integer", v)),
        },
    }
}

/// Parses a float; values that round to infinity or to zero from a nonzero
/// literal are range errors.
pub fn parse_f32(v: &str) -> Result<f32, LiteralError> {
    let x: f32 = v.parse().map_err(|_| invalid("float", v))?;
    check_float_range(v, x.is_infinite(), x == 0.0)?;
    Ok(x)
}

/// Double-precision variant of [`parse_f32`].
pub fn parse_f64(v: &str) -> Result<f64, LiteralError> {
    let x: f64 = v.parse().map_err(|_| invalid("double", v))?;
    check_float_range(v, x.is_infinite(), x == 0.0)?;
    Ok(x)
}

fn check_float_range(v: &str, is_inf: bool, is_zero: bool) -> Result<(), LiteralError> {
    if is_inf && !spells_infinity(v) {
        return Err(LiteralError::Overflow {
            input: v.to_string(),
        });
    }
    if is_zero && mantissa_is_nonzero(v) {
        return Err(LiteralError::Underflow {
            input: v.to_string(),
        });
    }
    Ok(())
}

fn spells_infinity(v: &str) -> bool {
    let v = v.strip_prefix(['+', '-']).unwrap_or(v);
    v.eq_ignore_ascii_case("inf") || v.eq_ignore_ascii_case("infinity")
}

/// Whether the literal's mantissa contains a nonzero digit, i.e. whether a
/// zero result can only have come from rounding.
fn mantissa_is_nonzero(v: &str) -> bool {
    v.split(['e', 'E'])
        .next()
        .unwrap_or("")
        .bytes()
        .any(|b| (b'1'..=b'9').contains(&b))
}
