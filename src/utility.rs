/// Evaluate a polynomial, coefficients ordered from highest power to lowest
pub(crate) fn polyval(p: &[f64], x: f64) -> f64 {
    p
        .iter()
        .fold(0_f64, |acc, val| acc*x + val)
}

/// Shortest round-trip representation of a float, without a trailing `.0`
/// on whole numbers.
pub(crate) fn format_float(value: f64) -> String {
    let mut buf = ryu::Buffer::new();
    let formatted = buf.format(value);

    formatted
        .strip_suffix(".0")
        .unwrap_or(formatted)
        .to_string()
}

/// Parses a finite float, naming `what` in the error message.
pub(crate) fn parse_finite(value: &str, what: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{what} \"{value}\" is not a valid number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyval_horner() {
        // 2x^2 - 3x + 1
        assert_eq!(polyval(&[2., -3., 1.], 0.), 1.);
        assert_eq!(polyval(&[2., -3., 1.], 2.), 3.);
        assert_eq!(polyval(&[], 5.), 0.);
    }

    #[test]
    fn format_whole_and_fractional() {
        assert_eq!(format_float(651409.0), "651409");
        assert_eq!(format_float(651409.903), "651409.903");
        assert_eq!(format_float(-2.5), "-2.5");
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert_eq!(parse_finite("12.5", "Easting"), Ok(12.5));
        assert!(parse_finite("inf", "Easting").is_err());
        assert!(parse_finite("NaN", "Easting").is_err());
        assert!(parse_finite("abc", "Easting").is_err());
    }
}
