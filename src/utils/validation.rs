//! Centralized validation and helper functions.

use std::str::FromStr;

/// Keep `value` only if it lies within `[min, max]`.
///
/// # Examples
///
/// ```
/// use census_tracker::utils::validation::in_range_or_none;
///
/// assert_eq!(in_range_or_none(Some(1800), 1725, 1835), Some(1800));
/// assert_eq!(in_range_or_none(Some(1900), 1725, 1835), None);
/// assert_eq!(in_range_or_none(None::<i32>, 1725, 1835), None);
/// ```
#[must_use]
pub fn in_range_or_none<T: PartialOrd + Copy>(value: Option<T>, min: T, max: T) -> Option<T> {
    value.filter(|v| (min..=max).contains(v))
}

/// Parse a number from free text, ignoring surrounding whitespace.
/// Anything else that does not parse yields `None`.
#[must_use]
pub fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Parse a number and keep it only if it lies within `[min, max]`.
#[must_use]
pub fn parse_in_range<T: FromStr + PartialOrd + Copy>(raw: &str, min: T, max: T) -> Option<T> {
    in_range_or_none(parse_number(raw), min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_or_none_generic() {
        assert_eq!(in_range_or_none(Some(0.5_f64), 0.0, 1.0), Some(0.5));
        assert_eq!(in_range_or_none(Some(2_u8), 3, 9), None);
        assert_eq!(in_range_or_none(Some('c'), 'a', 'z'), Some('c'));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<i32>(" 1820 "), Some(1820));
        assert_eq!(parse_number::<i32>("1820?"), None);
        assert_eq!(parse_number::<i32>("vers 1820"), None);
        assert_eq!(parse_number::<i32>(""), None);
    }

    #[test]
    fn test_parse_in_range() {
        assert_eq!(parse_in_range("1800", 1725, 1835), Some(1800));
        assert_eq!(parse_in_range("1700", 1725, 1835), None);
        assert_eq!(parse_in_range("bad", 1725, 1835), None);
    }
}
