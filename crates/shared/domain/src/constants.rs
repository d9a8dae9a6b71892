//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Ordinary account role
pub const ROLE_USER: &str = "user";

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

/// Roles created by the `seed` command, with their descriptions
pub const DEFAULT_ROLES: &[(&str, &str)] = &[
    (ROLE_ADMIN, "Администраторы"),
    (ROLE_USER, "Обычные пользователи"),
];

// =============================================================================
// Credentials
// =============================================================================

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length, counted in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Minimum login length
pub const MIN_LOGIN_LENGTH: usize = 5;

/// Symbols a password may contain besides letters and digits
pub const PASSWORD_SYMBOLS: &str = "~!?@#$%^&*_-+()[]{}></\\|\"'.,:";

// =============================================================================
// Phone numbers
// =============================================================================

/// Punctuation accepted inside a raw phone number (whitespace is accepted too)
pub const PHONE_PUNCTUATION: &str = "+-.()";

/// Digits expected when the number starts with `+7` or `8`
pub const PHONE_DIGITS_WITH_PREFIX: usize = 11;

/// Digits expected for any other number
pub const PHONE_DIGITS_WITHOUT_PREFIX: usize = 10;

/// Trunk prefix of the canonical form
pub const PHONE_TRUNK_PREFIX: char = '8';

// =============================================================================
// Form fields
// =============================================================================

pub const FIELD_LOGIN: &str = "login";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_LAST_NAME: &str = "last_name";
pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_PATRONYMIC: &str = "patronymic";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_DB: &str = "db";
pub const FIELD_OLD_PASSWORD: &str = "old_password";
pub const FIELD_NEW_PASSWORD: &str = "new_password";
pub const FIELD_NEW_PASSWORD_CONFIRMATION: &str = "new_password2";

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_EMPTY_FIELD: &str = "Поле не может быть пустым";
pub const MSG_INVALID_LOGIN: &str =
    "Логин должен содержать только латинские буквы/цифры и быть >=5 символов";
pub const MSG_WRONG_OLD_PASSWORD: &str = "Старый пароль введён неверно.";
pub const MSG_PASSWORDS_DIFFER: &str = "Пароли не совпадают.";
pub const MSG_STORAGE_FAILURE: &str = "Ошибка сохранения";
