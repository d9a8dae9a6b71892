//! Login and password rules for account forms.
//!
//! Everything here is a pure function over submitted text: validators
//! collect every violation they find and never short-circuit between rules,
//! so a form can be redisplayed with all of its problems at once.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::constants::{
    FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_LOGIN, FIELD_NEW_PASSWORD,
    FIELD_NEW_PASSWORD_CONFIRMATION, FIELD_PASSWORD, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
    MSG_EMPTY_FIELD, MSG_INVALID_LOGIN, MSG_PASSWORDS_DIFFER, PASSWORD_SYMBOLS,
};
use crate::form::{FieldErrors, FormFields};

/// Digits outside category `Nd` that still count as digits.
const EXTRA_DIGITS: &str = "⁰¹²³⁴⁵⁶⁷⁸⁹₀₁₂₃₄₅₆₇₈₉";

/// Latin letters and digits only, at least five of them.
static LOGIN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{5,}$").unwrap());

/// Separator used when several password violations share one form field.
pub const VIOLATION_SEPARATOR: &str = "; ";

/// A single broken password rule.
///
/// Variants are declared in reporting order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    #[error("Длина менее 8 символов")]
    TooShort,

    #[error("Длина более 128 символов")]
    TooLong,

    #[error("Пароль не должен содержать пробелов")]
    ContainsSpace,

    #[error("Должна быть хотя бы одна цифра")]
    MissingDigit,

    #[error("Должна быть хотя бы одна строчная буква")]
    MissingLowercase,

    #[error("Должна быть хотя бы одна заглавная буква")]
    MissingUppercase,

    /// First character outside letters, digits and [`PASSWORD_SYMBOLS`]
    #[error("Недопустимый символ: {0}")]
    DisallowedCharacter(char),
}

/// Check a password against every rule.
///
/// Returns the violations in reporting order; an empty vector means the
/// password is acceptable. Only the first disallowed character is reported.
pub fn validate_password(password: &str) -> Vec<PasswordViolation> {
    let mut violations = Vec::new();
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooShort);
    }
    if length > MAX_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooLong);
    }
    if password.contains(' ') {
        violations.push(PasswordViolation::ContainsSpace);
    }
    if !password.chars().any(is_digit) {
        violations.push(PasswordViolation::MissingDigit);
    }
    if !password.chars().any(char::is_lowercase) {
        violations.push(PasswordViolation::MissingLowercase);
    }
    if !password.chars().any(char::is_uppercase) {
        violations.push(PasswordViolation::MissingUppercase);
    }
    if let Some(c) = password.chars().find(|c| !is_password_char(*c)) {
        violations.push(PasswordViolation::DisallowedCharacter(c));
    }

    violations
}

/// Join violations into the single message shown under a password field.
pub fn join_violations(violations: &[PasswordViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(VIOLATION_SEPARATOR)
}

/// Whether a login has the accepted shape (ASCII letters/digits, 5+ long).
pub fn is_valid_login(login: &str) -> bool {
    LOGIN_PATTERN.is_match(login)
}

/// Validate an account form.
///
/// `login` and `password` are only checked when requested (the edit form
/// carries neither); `last_name` and `first_name` are always required.
/// Other fields are accepted as submitted.
pub fn validate_user_input<F>(fields: &F, require_login: bool, require_password: bool) -> FieldErrors
where
    F: FormFields + ?Sized,
{
    let mut errors = FieldErrors::new();

    if require_login {
        let login = fields.field(FIELD_LOGIN).trim();
        if login.is_empty() {
            errors.insert(FIELD_LOGIN, MSG_EMPTY_FIELD);
        } else if !is_valid_login(login) {
            errors.insert(FIELD_LOGIN, MSG_INVALID_LOGIN);
        }
    }

    if require_password {
        let password = fields.field(FIELD_PASSWORD);
        if password.is_empty() {
            errors.insert(FIELD_PASSWORD, MSG_EMPTY_FIELD);
        } else {
            let violations = validate_password(password);
            if !violations.is_empty() {
                errors.insert(FIELD_PASSWORD, join_violations(&violations));
            }
        }
    }

    for field in [FIELD_LAST_NAME, FIELD_FIRST_NAME] {
        if fields.field(field).trim().is_empty() {
            errors.insert(field, MSG_EMPTY_FIELD);
        }
    }

    errors
}

/// Validate the new password and its confirmation on the change-password form.
///
/// Checking the old password needs the stored hash, so the caller adds that
/// entry itself.
pub fn validate_password_change(new_password: &str, confirmation: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let violations = validate_password(new_password);
    if !violations.is_empty() {
        errors.insert(FIELD_NEW_PASSWORD, join_violations(&violations));
    }
    if new_password != confirmation {
        errors.insert(FIELD_NEW_PASSWORD_CONFIRMATION, MSG_PASSWORDS_DIFFER);
    }

    errors
}

/// Decimal digits of any script, plus superscript and subscript digits.
///
/// Fractions and numeral letters such as `½` or `Ⅻ` are not digits.
fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber || EXTRA_DIGITS.contains(c)
}

/// Letters are the `L*` categories; combining marks are not letters.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn is_password_char(c: char) -> bool {
    is_letter(c) || is_digit(c) || PASSWORD_SYMBOLS.contains(c)
}
