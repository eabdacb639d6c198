//! Field validators for product submissions
//!
//! Each `parse_*` function both checks and converts one raw form value. The
//! `validate_*` wrappers plug them into `#[validate(custom(...))]`, so the
//! same rules run during validation and during conversion.

use crate::core::category::Category;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;
use url::Url;
use validator::ValidationError;

/// Minimum length of a product name
pub const NAME_MIN_LENGTH: usize = 2;

/// Maximum length of a product name
pub const NAME_MAX_LENGTH: usize = 100;

/// Maximum number of digits in a price
pub const PRICE_MAX_DIGITS: u32 = 7;

/// Number of fractional digits in a price
pub const PRICE_DECIMAL_PLACES: u32 = 2;

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn required() -> ValidationError {
    error("required", "This field is required.")
}

/// Check a product name
pub fn parse_name(value: &str) -> Result<String, ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(required());
    }
    if len < NAME_MIN_LENGTH {
        return Err(error(
            "min_length",
            format!(
                "Minimum name length is {} symbols. You entered {} symbols.",
                NAME_MIN_LENGTH, len
            ),
        ));
    }
    if len > NAME_MAX_LENGTH {
        return Err(error(
            "max_length",
            format!(
                "Maximum name length is {} symbols. You entered {} symbols.",
                NAME_MAX_LENGTH, len
            ),
        ));
    }
    Ok(value.to_string())
}

/// Parse a category code
pub fn parse_category(value: &str) -> Result<Category, ValidationError> {
    if value.is_empty() {
        return Err(required());
    }
    Category::from_code(value).ok_or_else(|| {
        error(
            "invalid_choice",
            format!(
                "Select a valid choice. {} is not one of the available choices.",
                value
            ),
        )
    })
}

/// Parse a stock quantity: a whole number, zero or more
pub fn parse_quantity(value: &str) -> Result<i32, ValidationError> {
    if value.is_empty() {
        return Err(required());
    }
    let quantity = value
        .parse::<i64>()
        .map_err(|_| error("invalid", "Enter a whole number."))?;
    if quantity < 0 {
        return Err(error(
            "min_value",
            "Ensure this value is greater than or equal to 0.",
        ));
    }
    i32::try_from(quantity).map_err(|_| {
        error(
            "max_value",
            format!("Ensure this value is less than or equal to {}.", i32::MAX),
        )
    })
}

/// Split a plain decimal literal into its whole and fractional digit runs
///
/// Accepts an optional sign, ASCII digits and at most one point, with at least
/// one digit overall. Exponents, separators and anything else are rejected.
fn split_decimal(value: &str) -> Option<(bool, &str, &str)> {
    let negative = value.starts_with('-');
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction) {
        return None;
    }
    Some((negative, whole, fraction))
}

/// Parse a price: non-negative, at most 7 digits of which at most 2 are fractional
///
/// Digits are counted on the submitted text, ignoring leading zeros and
/// trailing fractional zeros. The result is rescaled to exactly two
/// fractional digits.
pub fn parse_price(value: &str) -> Result<Decimal, ValidationError> {
    if value.is_empty() {
        return Err(required());
    }
    let (negative, whole, fraction) =
        split_decimal(value).ok_or_else(|| error("invalid", "Enter a number."))?;
    let whole = whole.trim_start_matches('0');
    let fraction = fraction.trim_end_matches('0');

    if negative && !(whole.is_empty() && fraction.is_empty()) {
        return Err(error(
            "min_value",
            "Ensure this value is greater than or equal to 0.",
        ));
    }

    let decimals = fraction.len() as u32;
    let whole_digits = whole.len() as u32;
    let digits = whole_digits + decimals;

    if digits > PRICE_MAX_DIGITS {
        return Err(error(
            "max_digits",
            format!(
                "Ensure that there are no more than {} digits in total.",
                PRICE_MAX_DIGITS
            ),
        ));
    }
    if decimals > PRICE_DECIMAL_PLACES {
        return Err(error(
            "max_decimal_places",
            format!(
                "Ensure that there are no more than {} decimal places.",
                PRICE_DECIMAL_PLACES
            ),
        ));
    }
    if whole_digits > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
        return Err(error(
            "max_whole_digits",
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES
            ),
        ));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let canonical = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };
    let mut price =
        Decimal::from_str(&canonical).map_err(|_| error("invalid", "Enter a number."))?;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

/// URL schemes accepted for product images
pub const IMAGE_URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Check an image link: an absolute web URL with a host
pub fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    let invalid = || error("url", "Enter a valid URL.");
    let url = Url::parse(value).map_err(|_| invalid())?;

    if !IMAGE_URL_SCHEMES.contains(&url.scheme()) {
        return Err(invalid());
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    parse_name(value).map(|_| ())
}

pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    parse_category(value).map(|_| ())
}

pub fn validate_quantity(value: &str) -> Result<(), ValidationError> {
    parse_quantity(value).map(|_| ())
}

pub fn validate_price(value: &str) -> Result<(), ValidationError> {
    parse_price(value).map(|_| ())
}
