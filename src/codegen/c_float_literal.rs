use std::fmt::Write;

use crate::prelude::ErrorsFirgen;

/// Significant digits that make every f64 round-trip through its decimal text.
pub const SIGNIFICANT_DIGITS: usize = 17;

/// Suffix that makes the host compiler read the literal as a single-precision constant.
pub const FLOAT_SUFFIX: &str = "f";

/// Appends `value` as a C `%.17g` literal followed by [`FLOAT_SUFFIX`].
///
/// `%g` rules: with the decimal exponent `e` of the value rounded to 17 significant digits, fixed
/// notation is used for `-4 <= e < 17`, otherwise `d.ddde±XX`. Trailing zeros of the fraction and
/// a bare trailing point are dropped in both forms. Parsing the digits back gives the exact same
/// double, subnormals and `-0.0` included.
///
/// Integral values keep the bare `%g` form, so 1.0 renders as `1f`. C rejects that literal; the
/// output is kept byte-identical to the tables already checked into the audio engine, and designed
/// tables only hit it at the degenerate factor 1 with an odd tap count.
pub fn write_scalar<W: Write>(out: &mut W, value: f64) -> Result<(), ErrorsFirgen> {
    if !value.is_finite() {
        return Err(ErrorsFirgen::NonFiniteValue(value));
    }
    if value.is_sign_negative() {
        out.write_char('-')?;
    }

    // Correctly rounded mantissa and exponent, e.g. "1.0000000000000001e-1".
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value.abs());
    let (mantissa, exp) = sci
        .split_once('e')
        .ok_or(ErrorsFirgen::InvalidInputRange("exponent missing from scientific form"))?;
    let exp: i32 = exp
        .parse()
        .map_err(|_| ErrorsFirgen::InvalidInputRange("malformed exponent in scientific form"))?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..SIGNIFICANT_DIGITS as i32).contains(&exp) {
        let (int_part, frac) = if exp >= 0 {
            let split = exp as usize + 1;
            (digits[..split].to_string(), digits[split..].to_string())
        } else {
            let zeros = "0".repeat((-exp - 1) as usize);
            ("0".to_string(), zeros + &digits)
        };
        out.write_str(&int_part)?;
        let frac = frac.trim_end_matches('0');
        if !frac.is_empty() {
            write!(out, ".{frac}")?;
        }
    } else {
        out.write_str(&digits[..1])?;
        let frac = digits[1..].trim_end_matches('0');
        if !frac.is_empty() {
            write!(out, ".{frac}")?;
        }
        let sign = if exp < 0 { '-' } else { '+' };
        write!(out, "e{sign}{:02}", exp.abs())?;
    }

    out.write_str(FLOAT_SUFFIX)?;
    Ok(())
}

pub fn format_scalar(value: f64) -> Result<String, ErrorsFirgen> {
    let mut s = String::with_capacity(SIGNIFICANT_DIGITS + 8);
    write_scalar(&mut s, value)?;
    Ok(s)
}

/// Appends a `const float name[] = { ... };` declaration holding `coefficients` in order.
///
/// Every element is followed by `", "`, including the last one; C accepts the trailing comma.
pub fn write_array<W: Write>(out: &mut W, coefficients: &[f64], name: &str) -> Result<(), ErrorsFirgen> {
    writeln!(out, "const float {name}[] = {{")?;
    for (index, &value) in coefficients.iter().enumerate() {
        write_scalar(out, value).map_err(|e| match e {
            ErrorsFirgen::NonFiniteValue(value) => ErrorsFirgen::NonFiniteCoefficient { index, value },
            other => other,
        })?;
        out.write_str(", ")?;
    }
    out.write_str("\n};\n")?;
    Ok(())
}

pub fn format_array(coefficients: &[f64], name: &str) -> Result<String, ErrorsFirgen> {
    // Roughly 24 bytes per rendered coefficient.
    let mut s = String::with_capacity(name.len() + 32 + coefficients.len() * 24);
    write_array(&mut s, coefficients, name)?;
    Ok(s)
}
