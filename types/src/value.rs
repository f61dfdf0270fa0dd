use core::fmt;

/// A literal value inside a `categorical(...)` type.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Value<'a> {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(&'a str),
    /// Missing-value marker.
    Na,
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => f.write_str(&fmt_g(*v)),
            // Single-quoted, no escaping.
            Value::String(s) => write!(f, "'{s}'"),
            Value::Na => f.write_str("NA"),
        }
    }
}

/// Formats a float the way C's `%g` does (precision 6).
///
/// The value is rounded to six significant digits first; the rounded
/// exponent then selects fixed or scientific form. Scientific exponents
/// carry an explicit sign and at least two digits.
pub fn fmt_g(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{x:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= 6 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let prec = (5 - exp).max(0) as usize;
        trim_zeros(&format!("{x:.prec$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixed_form() {
        assert_eq!(fmt_g(1.2), "1.2");
        assert_eq!(fmt_g(-1.2), "-1.2");
        assert_eq!(fmt_g(0.0), "0");
        assert_eq!(fmt_g(123456.0), "123456");
        assert_eq!(fmt_g(0.0001), "0.0001");
    }

    #[test]
    fn scientific_form() {
        assert_eq!(fmt_g(1.05e10), "1.05e+10");
        assert_eq!(fmt_g(-1.2e33), "-1.2e+33");
        assert_eq!(fmt_g(1.2e-32), "1.2e-32");
        assert_eq!(fmt_g(0.00001), "1e-05");
        assert_eq!(fmt_g(1234567.0), "1.23457e+06");
        assert_eq!(fmt_g(1.79769e308), "1.79769e+308");
        assert_eq!(fmt_g(2.22508e-308), "2.22508e-308");
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int64(-176354404).to_string(), "-176354404");
        assert_eq!(Value::Float64(1.05e10).to_string(), "1.05e+10");
        assert_eq!(Value::String("xyz").to_string(), "'xyz'");
        assert_eq!(Value::String("").to_string(), "''");
        assert_eq!(Value::Na.to_string(), "NA");
    }
}
