//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A one-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The page number, starting from 1.
    pub number: u64,
    /// The maximum number of items on a page.
    pub size: u64,
}

impl Page {
    /// The number of items to skip to reach this page.
    pub fn offset(&self) -> u64 {
        self.number.saturating_sub(1).saturating_mul(self.size)
    }
}

/// Parse the `page` query parameter, falling back to `default` when absent.
///
/// # Errors
/// Returns [Error::InvalidQueryParameter] if the value is not an integer
/// greater than zero.
pub(crate) fn parse_page_number(value: Option<&str>, default: u64) -> Result<u64, Error> {
    parse_positive_integer("page", value, default)
}

/// Parse the `perPage` query parameter, falling back to `default` when absent.
///
/// # Errors
/// Returns [Error::InvalidQueryParameter] if the value is not an integer
/// greater than zero.
pub(crate) fn parse_page_size(value: Option<&str>, default: u64) -> Result<u64, Error> {
    parse_positive_integer("perPage", value, default)
}

fn parse_positive_integer(
    name: &'static str,
    value: Option<&str>,
    default: u64,
) -> Result<u64, Error> {
    let Some(value) = value else {
        return Ok(default);
    };

    let invalid = |reason: String| Error::InvalidQueryParameter {
        name,
        value: value.to_owned(),
        reason,
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_owned())),
        Ok(number) => Ok(number),
        Err(error) => Err(invalid(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{Page, PaginationConfig, parse_page_number, parse_page_size};

    #[test]
    fn default_config_starts_on_first_page_of_ten() {
        let config = PaginationConfig::default();

        assert_eq!(config.default_page, 1);
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Page { number: 1, size: 10 }.offset(), 0);
        assert_eq!(Page { number: 2, size: 10 }.offset(), 10);
        assert_eq!(Page { number: 4, size: 3 }.offset(), 9);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        assert_eq!(
            Page {
                number: u64::MAX,
                size: u64::MAX
            }
            .offset(),
            u64::MAX
        );
    }

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(parse_page_number(None, 1), Ok(1));
        assert_eq!(parse_page_size(None, 10), Ok(10));
    }

    #[test]
    fn parses_positive_integers() {
        assert_eq!(parse_page_number(Some("3"), 1), Ok(3));
        assert_eq!(parse_page_size(Some(" 25 "), 10), Ok(25));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(
            parse_page_number(Some("0"), 1),
            Err(Error::InvalidQueryParameter {
                name: "page",
                value: "0".to_owned(),
                reason: "must be greater than zero".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_non_numeric_and_negative_values() {
        for value in ["abc", "-1", "1.5", ""] {
            let result = parse_page_size(Some(value), 10);

            assert!(
                matches!(result, Err(Error::InvalidQueryParameter { name: "perPage", .. })),
                "{value:?} gave {result:?}"
            );
        }
    }
}
