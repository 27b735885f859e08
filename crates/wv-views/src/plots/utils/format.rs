//! Number formatting for axes, tooltips and panels

use wv_core::model::Indicator;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// SI-prefixed value with `significant` digits, e.g. `2000 -> "2k"`
pub fn format_si(value: f64, significant: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format_number(value);
    }

    let significant = significant.max(1) as i32;
    let rounded = round_significant(value, significant);
    let exponent = rounded.abs().log10().floor() as i32;
    let prefix_exponent = (exponent.div_euclid(3) * 3).clamp(-24, 24);
    let mantissa = rounded / 10f64.powi(prefix_exponent);
    let decimals = (significant - 1 - (exponent - prefix_exponent)).max(0) as usize;
    let prefix = SI_PREFIXES[((prefix_exponent + 24) / 3) as usize];

    format!("{mantissa:.decimals$}{prefix}")
}

fn round_significant(value: f64, significant: i32) -> f64 {
    let exponent = value.abs().log10().floor() as i32;
    let magnitude = 10f64.powi(exponent - significant + 1);
    (value / magnitude).round() * magnitude
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Rounded to an integer with comma thousands separators
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Dollar amount in whole units, e.g. `"$12,345"`
pub fn format_currency(value: f64) -> String {
    format!("${}", format_thousands(value))
}

/// Shortest plain rendering, `72.5` or `72`
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Axis tick formatter for an indicator
pub fn tick_format(indicator: Indicator) -> fn(f64) -> String {
    if indicator.is_log_scaled() {
        |v| format_si(v, 1)
    } else {
        |v| format_fixed(v, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_si_one_digit() {
        assert_eq!(format_si(500.0, 1), "500");
        assert_eq!(format_si(1000.0, 1), "1k");
        assert_eq!(format_si(2000.0, 1), "2k");
        assert_eq!(format_si(50_000.0, 1), "50k");
        assert_eq!(format_si(100_000.0, 1), "100k");
        assert_eq!(format_si(1_500_000.0, 1), "2M");
        assert_eq!(format_si(0.0, 1), "0");
    }

    #[test]
    fn test_si_more_digits() {
        assert_eq!(format_si(1234.0, 3), "1.23k");
        assert_eq!(format_si(999_900.0, 2), "1.0M");
        assert_eq!(format_si(0.5, 1), "500m");
    }

    #[test]
    fn test_thousands_and_currency() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(123_456_789.0), "123,456,789");
        assert_eq!(format_thousands(-4321.4), "-4,321");
        assert_eq!(format_currency(12_345.49), "$12,345");
    }

    #[test]
    fn test_plain_and_fixed() {
        assert_eq!(format_number(72.5), "72.5");
        assert_eq!(format_number(72.0), "72");
        assert_eq!(format_fixed(72.0, 1), "72.0");
    }

    #[test]
    fn test_tick_format_per_indicator() {
        assert_eq!(tick_format(Indicator::GdpPerCapita)(20_000.0), "20k");
        assert_eq!(tick_format(Indicator::Population)(1e8), "100M");
        assert_eq!(tick_format(Indicator::LiteracyRate)(42.0), "42.0");
    }
}
