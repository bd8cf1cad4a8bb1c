//! Axis label formatting
//!
//! Value axes take a small format specifier of the form `.Nf`: fixed-point
//! with `N` digits after the decimal point. `.0f` (integer-rounded) is the
//! default; precipitation amounts use `.2f`.

use std::fmt;
use std::str::FromStr;

use crate::errors::ForecastError;

/// Fixed-point number format for value axis labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormat {
    precision: usize,
}

impl ValueFormat {
    pub const fn fixed(precision: usize) -> Self {
        Self { precision }
    }

    pub fn apply(&self, value: f64) -> String {
        let formatted = format!("{:.*}", self.precision, value);
        // Rounding a small negative number yields "-0"
        if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        }
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::fixed(0)
    }
}

impl FromStr for ValueFormat {
    type Err = ForecastError;

    fn from_str(specifier: &str) -> Result<Self, Self::Err> {
        let digits = specifier
            .strip_prefix('.')
            .and_then(|s| s.strip_suffix('f'))
            .ok_or_else(|| ForecastError::Render(format!("unsupported value format '{specifier}'")))?;
        let precision = digits
            .parse::<usize>()
            .map_err(|_| ForecastError::Render(format!("unsupported value format '{specifier}'")))?;
        Ok(Self::fixed(precision))
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}f", self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_format() {
        assert_eq!(".0f".parse::<ValueFormat>().unwrap(), ValueFormat::fixed(0));
        assert_eq!(".2f".parse::<ValueFormat>().unwrap(), ValueFormat::fixed(2));
        assert!("2f".parse::<ValueFormat>().is_err());
        assert!(".xf".parse::<ValueFormat>().is_err());
        assert!(".2e".parse::<ValueFormat>().is_err());
    }

    #[test]
    fn test_apply() {
        let integer = ValueFormat::default();
        assert_eq!(integer.apply(31.6), "32");
        assert_eq!(integer.apply(-4.0), "-4");
        assert_eq!(integer.apply(-0.2), "0");

        let hundredths = ValueFormat::fixed(2);
        assert_eq!(hundredths.apply(0.1), "0.10");
        assert_eq!(hundredths.apply(0.126), "0.13");
    }

    #[test]
    fn test_display_matches_specifier() {
        assert_eq!(ValueFormat::fixed(2).to_string(), ".2f");
    }
}
