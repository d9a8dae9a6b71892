//! Phone number normalization.
//!
//! Accepts loosely formatted Russian numbers (`+7 (912) 345-67-89`,
//! `8(912)3456789`, `912.345.67.89`) and rewrites them into the canonical
//! `8-XXX-XXX-XX-XX` form.

use serde::Serialize;
use thiserror::Error;

use crate::constants::{
    PHONE_DIGITS_WITHOUT_PREFIX, PHONE_DIGITS_WITH_PREFIX, PHONE_PUNCTUATION, PHONE_TRUNK_PREFIX,
};

/// Why a raw phone number was rejected.
///
/// The display text is the message shown next to the input field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PhoneRejection {
    /// The input contains something other than digits, `+ - . ( )` and whitespace
    #[error("Недопустимый ввод. В номере телефона встречаются недопустимые символы.")]
    Chars,

    /// The input has the wrong number of digits for its prefix
    #[error("Недопустимый ввод. Неверное количество цифр.")]
    Count,
}

/// Outcome of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneVerdict {
    /// Input accepted; `formatted` is always `8-DDD-DDD-DD-DD`
    Accepted { formatted: String },
    /// Input rejected for the given reason
    Rejected { reason: PhoneRejection },
}

impl PhoneVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PhoneVerdict::Accepted { .. })
    }

    /// Canonical form of an accepted number
    pub fn formatted(&self) -> Option<&str> {
        match self {
            PhoneVerdict::Accepted { formatted } => Some(formatted),
            PhoneVerdict::Rejected { .. } => None,
        }
    }

    /// Rejection reason of a rejected number
    pub fn rejection(&self) -> Option<PhoneRejection> {
        match self {
            PhoneVerdict::Accepted { .. } => None,
            PhoneVerdict::Rejected { reason } => Some(*reason),
        }
    }

    fn rejected(reason: PhoneRejection) -> Self {
        PhoneVerdict::Rejected { reason }
    }
}

/// Validate a raw phone number and rewrite it into canonical form.
///
/// Numbers starting with `+7` or `8` (after trimming) must carry exactly
/// 11 digits; every other number must carry exactly 10. An 11-digit number
/// without one of those prefixes is rejected.
pub fn normalize(raw: &str) -> PhoneVerdict {
    if !has_only_phone_chars(raw) {
        return PhoneVerdict::rejected(PhoneRejection::Chars);
    }

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let expected = if has_trunk_prefix(raw.trim()) {
        PHONE_DIGITS_WITH_PREFIX
    } else {
        PHONE_DIGITS_WITHOUT_PREFIX
    };

    if digits.len() != expected {
        return PhoneVerdict::rejected(PhoneRejection::Count);
    }

    PhoneVerdict::Accepted {
        formatted: canonical_form(&digits),
    }
}

fn has_only_phone_chars(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || PHONE_PUNCTUATION.contains(c))
}

fn has_trunk_prefix(trimmed: &str) -> bool {
    trimmed.starts_with("+7") || trimmed.starts_with('8')
}

/// Format 10 or 11 ASCII digits; an 11th leading digit is replaced by the trunk prefix.
fn canonical_form(digits: &str) -> String {
    let subscriber = match digits.len() {
        PHONE_DIGITS_WITH_PREFIX => &digits[1..],
        _ => digits,
    };

    format!(
        "{}-{}-{}-{}-{}",
        PHONE_TRUNK_PREFIX,
        &subscriber[0..3],
        &subscriber[3..6],
        &subscriber[6..8],
        &subscriber[8..10]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(raw: &str) -> String {
        match normalize(raw) {
            PhoneVerdict::Accepted { formatted } => formatted,
            other => panic!("expected {raw:?} to be accepted, got {other:?}"),
        }
    }

    fn rejection(raw: &str) -> PhoneRejection {
        normalize(raw)
            .rejection()
            .unwrap_or_else(|| panic!("expected {raw:?} to be rejected"))
    }

    #[test]
    fn test_ten_digits_get_trunk_prefix() {
        assert_eq!(accepted("1234567890"), "8-123-456-78-90");
    }

    #[test]
    fn test_plus_seven_is_rewritten() {
        assert_eq!(accepted("+7 (123) 456-78-90"), "8-123-456-78-90");
        assert_eq!(accepted("+79123456789"), "8-912-345-67-89");
        assert_eq!(accepted("+7 912 345 67 89"), "8-912-345-67-89");
    }

    #[test]
    fn test_leading_eight_is_kept() {
        assert_eq!(accepted("8(123)4567590"), "8-123-456-75-90");
    }

    #[test]
    fn test_dots_and_surrounding_whitespace() {
        assert_eq!(accepted("123.456.75.90"), "8-123-456-75-90");
        assert_eq!(accepted("  +7 912 345 67 89\t"), "8-912-345-67-89");
        assert_eq!(accepted("912\u{a0}345\u{a0}67\u{a0}89"), "8-912-345-67-89");
    }

    #[test]
    fn test_plus_without_seven_counts_as_plain_number() {
        assert_eq!(accepted("+1234567890"), "8-123-456-78-90");
        assert_eq!(rejection("+8 912 345 67 89"), PhoneRejection::Count);
    }

    #[test]
    fn test_disallowed_characters() {
        assert_eq!(rejection("123ABC456"), PhoneRejection::Chars);
        assert_eq!(rejection("8912345678x"), PhoneRejection::Chars);
        assert_eq!(rejection("+7 912 345 67 89 🙂"), PhoneRejection::Chars);
        assert_eq!(rejection("8/912/345/67/89"), PhoneRejection::Chars);
        // Non-ASCII digits are not part of the allowed set
        assert_eq!(rejection("٩١٢٣٤٥٦٧٨٩"), PhoneRejection::Chars);
    }

    #[test]
    fn test_empty_input_is_rejected_as_chars() {
        assert_eq!(rejection(""), PhoneRejection::Chars);
    }

    #[test]
    fn test_wrong_digit_count_with_prefix() {
        assert_eq!(rejection("+7 12345"), PhoneRejection::Count);
        assert_eq!(rejection("8 12345"), PhoneRejection::Count);
        assert_eq!(rejection("8 912 345 67 890"), PhoneRejection::Count);
        // 10 digits are not enough once the number starts with 8
        assert_eq!(rejection("8123456789"), PhoneRejection::Count);
    }

    #[test]
    fn test_wrong_digit_count_without_prefix() {
        assert_eq!(rejection("12345"), PhoneRejection::Count);
        assert_eq!(rejection("   "), PhoneRejection::Count);
        assert_eq!(rejection("()-."), PhoneRejection::Count);
    }

    #[test]
    fn test_eleven_digits_without_prefix_are_rejected() {
        assert_eq!(rejection("91234567890"), PhoneRejection::Count);
        assert_eq!(rejection("7 912 345 67 89"), PhoneRejection::Count);
    }

    #[test]
    fn test_accepted_output_shape() {
        for raw in ["1234567890", "+7 (000) 000-00-00", "8 999 999 99 99", "(495) 123 45 67"] {
            let formatted = accepted(raw);
            let parts: Vec<&str> = formatted.split('-').collect();
            let lengths: Vec<usize> = parts.iter().map(|p| p.len()).collect();
            assert_eq!(lengths, vec![1, 3, 3, 2, 2], "{formatted}");
            assert_eq!(parts[0], "8");
            assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
        }
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            PhoneRejection::Chars.to_string(),
            "Недопустимый ввод. В номере телефона встречаются недопустимые символы."
        );
        assert_eq!(
            PhoneRejection::Count.to_string(),
            "Недопустимый ввод. Неверное количество цифр."
        );
    }

    #[test]
    fn test_normalize_is_idempotent_per_input() {
        for raw in ["+7 (123) 456-78-90", "91234567890", "abc", ""] {
            assert_eq!(normalize(raw), normalize(raw));
        }
    }

    #[test]
    fn test_verdict_accessors() {
        let ok = normalize("1234567890");
        assert!(ok.is_accepted());
        assert_eq!(ok.formatted(), Some("8-123-456-78-90"));
        assert_eq!(ok.rejection(), None);

        let bad = normalize("12");
        assert!(!bad.is_accepted());
        assert_eq!(bad.formatted(), None);
        assert_eq!(bad.rejection(), Some(PhoneRejection::Count));
    }
}
