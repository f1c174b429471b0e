//! Fixed-precision number formatting in the style of C `%.Ng`.

/// Significant digits used for `mut_escape` values.
pub const ESCAPE_SIGNIFICANT_DIGITS: usize = 4;

/// Formats `value` with `digits` significant digits like C `printf("%.{digits}g")`.
///
/// Scientific notation is used when the decimal exponent after rounding is
/// below -4 or at least `digits`. Trailing zeros are stripped in both forms.
///
/// ```
/// use escape_output::format_significant;
///
/// assert_eq!(format_significant(0.123456, 4), "0.1235");
/// assert_eq!(format_significant(123456.0, 4), "1.235e+05");
/// assert_eq!(format_significant(0.00001, 4), "1e-05");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let digits = digits.max(1);
    let scientific = format!("{value:.prec$e}", prec = digits - 1);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    let max_exponent = i32::try_from(digits).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= max_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(max_exponent - 1 - exponent).unwrap_or(0);
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

/// Renders a `mut_escape` cell; missing values become an empty cell.
pub fn format_escape_value(value: Option<f64>) -> String {
    value
        .map(|value| format_significant(value, ESCAPE_SIGNIFICANT_DIGITS))
        .unwrap_or_default()
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
