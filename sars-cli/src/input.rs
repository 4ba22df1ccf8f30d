use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections for values typed into the calculator screen. These never reach
/// the engine; the shell re-prompts locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("negative amount '{0}'")]
    NegativeAmount(String),

    #[error("invalid age '{0}'")]
    InvalidAge(String),
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas
/// (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses an annual income amount.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty input and
/// negative amounts are rejected; income must be a non-negative decimal.
pub fn parse_income(s: &str) -> Result<Decimal, InputError> {
    let normalized = normalize_decimal_input(s);
    let value: Decimal = normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid income: {}", e);
        InputError::InvalidAmount(s.trim().to_string())
    })?;
    if value < Decimal::ZERO {
        tracing::warn!(input = %s, "negative income");
        return Err(InputError::NegativeAmount(s.trim().to_string()));
    }
    Ok(value)
}

/// Parses an age as a non-negative integer.
pub fn parse_age(s: &str) -> Result<u32, InputError> {
    s.trim().parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid age: {}", e);
        InputError::InvalidAge(s.trim().to_string())
    })
}

/// Formats a monetary amount as rand with exactly two decimal places.
pub fn format_rand(value: Decimal) -> String {
    format!("R {value:.2}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_income_accepts_comma_thousands_separator() {
        assert_eq!(parse_income("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_income("2,000,000").unwrap(), dec!(2000000));
    }

    #[test]
    fn parse_income_trims_whitespace() {
        assert_eq!(parse_income("  100000  ").unwrap(), dec!(100000));
    }

    #[test]
    fn parse_income_rejects_empty_input() {
        assert!(matches!(
            parse_income(""),
            Err(InputError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_income("   "),
            Err(InputError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_income_rejects_non_numeric_input() {
        assert_eq!(
            parse_income("abc"),
            Err(InputError::InvalidAmount("abc".to_string()))
        );
    }

    #[test]
    fn parse_income_rejects_negative_amounts() {
        assert_eq!(
            parse_income("-100"),
            Err(InputError::NegativeAmount("-100".to_string()))
        );
    }

    #[test]
    fn parse_age_accepts_non_negative_integers() {
        assert_eq!(parse_age("0").unwrap(), 0);
        assert_eq!(parse_age(" 65 ").unwrap(), 65);
    }

    #[test]
    fn parse_age_rejects_negatives_and_fractions() {
        assert!(parse_age("-1").is_err());
        assert!(parse_age("30.5").is_err());
        assert!(parse_age("").is_err());
    }

    #[test]
    fn format_rand_always_shows_two_decimals() {
        assert_eq!(format_rand(dec!(770)), "R 770.00");
        assert_eq!(format_rand(dec!(717798.00)), "R 717798.00");
        assert_eq!(format_rand(dec!(0)), "R 0.00");
    }
}
