//! Input validation for the user form.
//!
//! The two predicates define the exact accepted string language for email and
//! phone fields. The `validate_*` wrappers turn a rejection into an
//! [`Error::Validation`] carrying the message shown on the form's error line.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, FormField, Result, ValidationError};

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address (format: xxxx@xxxx.xxx).";
pub const PHONE_MESSAGE: &str =
    "Please enter a valid phone number (format: 01x-xxx xxxx or 01x xxx xxxx).";
pub const FULL_NAME_MESSAGE: &str = "Please enter a full name.";
pub const DATE_OF_BIRTH_MESSAGE: &str =
    "Please enter a valid date of birth (format: yyyy-mm-dd).";

/// Format of the date-input text held in the draft.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// One email part: anything but `@` and the ECMAScript whitespace set.
///
/// Not `\s`: the regex crate's class includes U+0085 and excludes U+FEFF.
const EMAIL_PART: &str = r"[^@\t\n\x0B\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{EMAIL_PART}@{EMAIL_PART}\.{EMAIL_PART}$")).unwrap()
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(01[0-9]-[0-9]{3} [0-9]{4}|01[0-9] [0-9]{3} [0-9]{4})$").unwrap()
});

/// Returns true iff `email` has the shape `local@domain.tld`.
///
/// Each part is one or more characters that are neither whitespace nor `@`.
/// No trimming or normalization is applied.
///
/// # Examples
/// ```
/// use userform::validation::is_valid_email;
///
/// assert!(is_valid_email("a@b.co"));
/// assert!(!is_valid_email("a@b"));
/// assert!(!is_valid_email("a b@c.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Returns true iff `phone_number` is `01X-XXX XXXX` or `01X XXX XXXX`.
///
/// # Examples
/// ```
/// use userform::validation::is_valid_phone_number;
///
/// assert!(is_valid_phone_number("012-345 6789"));
/// assert!(is_valid_phone_number("012 345 6789"));
/// assert!(!is_valid_phone_number("012345 6789"));
/// ```
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_REGEX.is_match(phone_number)
}

pub fn validate_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(invalid(FormField::Email, EMAIL_MESSAGE));
    }
    Ok(())
}

pub fn validate_phone_number(phone_number: &str) -> Result<()> {
    if !is_valid_phone_number(phone_number) {
        return Err(invalid(FormField::PhoneNumber, PHONE_MESSAGE));
    }
    Ok(())
}

/// Full name is required; whitespace alone does not count.
pub fn validate_full_name(full_name: &str) -> Result<()> {
    if full_name.trim().is_empty() {
        return Err(invalid(FormField::FullName, FULL_NAME_MESSAGE));
    }
    Ok(())
}

/// Parses the date-input text. Empty input means "no date of birth".
pub fn validate_date_of_birth(dob: &str) -> Result<Option<NaiveDate>> {
    if dob.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(dob, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| invalid(FormField::DateOfBirth, DATE_OF_BIRTH_MESSAGE))
}

fn invalid(field: FormField, message: &str) -> Error {
    Error::Validation(ValidationError::new(field, message))
}
