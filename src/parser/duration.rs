//! @ai:module:intent Normalise harness duration tokens to seconds
//! @ai:module:layer domain
//! @ai:module:public_api parse_duration_seconds, DurationError
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Why a duration token could not be normalised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    #[error("duration is not finite")]
    NotFinite,
}

/// @ai:intent Convert a value in the given unit to seconds
/// @ai:effects pure
fn to_seconds(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "" | "s" => Some(value),
        "ms" => Some(value / 1_000.0),
        "us" | "µs" | "μs" => Some(value / 1_000_000.0),
        "ns" => Some(value / 1_000_000_000.0),
        "m" => Some(value * 60.0),
        "h" => Some(value * 3600.0),
        _ => None,
    }
}

/// @ai:intent Convert a duration token such as `250ms`, `1.5s`, `42` or `1m2.5s` to seconds
/// @ai:pre token has surrounding whitespace removed
/// @ai:post ms values are divided by 1000; `s` and bare numbers are taken as seconds
/// @ai:effects pure
pub fn parse_duration_seconds(token: &str) -> Result<f64, DurationError> {
    if token.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total = 0.0;
    let mut rest = token;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        if number.is_empty() {
            return Err(DurationError::InvalidNumber(rest.to_string()));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let value: f64 = number
            .parse()
            .map_err(|_| DurationError::InvalidNumber(number.to_string()))?;
        total += to_seconds(value, unit)
            .ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;
        rest = next;
    }

    if !total.is_finite() {
        return Err(DurationError::NotFinite);
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_milliseconds_divide_by_thousand() {
        assert!(approx(parse_duration_seconds("250ms").unwrap(), 0.25));
        assert!(approx(parse_duration_seconds("12.5ms").unwrap(), 0.0125));
    }

    #[test]
    fn test_seconds_and_bare_numbers() {
        assert!(approx(parse_duration_seconds("1.5s").unwrap(), 1.5));
        assert!(approx(parse_duration_seconds("42").unwrap(), 42.0));
        assert!(approx(parse_duration_seconds("0.75").unwrap(), 0.75));
    }

    #[test]
    fn test_sub_millisecond_units() {
        assert!(approx(parse_duration_seconds("350µs").unwrap(), 350e-6));
        assert!(approx(parse_duration_seconds("350us").unwrap(), 350e-6));
        assert!(approx(parse_duration_seconds("900ns").unwrap(), 900e-9));
    }

    #[test]
    fn test_compound_duration() {
        assert!(approx(parse_duration_seconds("1m2.5s").unwrap(), 62.5));
        assert!(approx(parse_duration_seconds("1h0m30s").unwrap(), 3630.0));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(parse_duration_seconds(""), Err(DurationError::Empty));
        assert_eq!(
            parse_duration_seconds("1.2.3s"),
            Err(DurationError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(
            parse_duration_seconds("5days"),
            Err(DurationError::UnknownUnit("days".to_string()))
        );
        assert!(matches!(
            parse_duration_seconds("ms"),
            Err(DurationError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_overflowing_duration_is_rejected() {
        let token = format!("{}s", "9".repeat(400));
        assert_eq!(parse_duration_seconds(&token), Err(DurationError::NotFinite));
    }
}
