//! Numeric formatting helpers shared by the table renderers.

/// Round a value to a fixed number of decimal places.
///
/// Values that cannot be scaled by `10^decimals` without overflowing are
/// returned unchanged.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Format a value in "general" notation with `precision` significant digits.
///
/// Fixed notation is used when the decimal exponent lies in `[-4, precision)`,
/// scientific notation otherwise. Trailing zeros (and a dangling decimal point)
/// are removed, and exponents are written with a sign and at least two digits.
///
/// # Examples
///
/// ```
/// use hit_cluster::utils::format::format_general;
///
/// assert_eq!(format_general(95.5, 6), "95.5");
/// assert_eq!(format_general(1e-10, 4), "1e-10");
/// assert_eq!(format_general(123_456_789.0, 6), "1.23457e+08");
/// ```
#[must_use]
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let precision_exp = precision as i32;

    if exponent < -4 || exponent >= precision_exp {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        #[allow(clippy::cast_sign_loss)] // Clamped to zero above
        let decimals = (precision_exp - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Format a rounded value the way the display tables expect it.
#[must_use]
pub fn format_rounded(value: f64, decimals: u32) -> String {
    format_general(round_to(value, decimals), 6)
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
