//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Sessions
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Lifetime of a "remember me" login in days
pub const DEFAULT_REMEMBER_DAYS: i64 = 7;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Cookie carrying the signed login token
pub const AUTH_COOKIE: &str = "auth_token";

/// Cookie carrying the anonymous session identifier
pub const SESSION_COOKIE: &str = "session_id";

/// Sessions without a visit for this long are dropped
pub const SESSION_IDLE_SECS: u64 = 30 * 60;

/// Interval between idle session sweeps
pub const SESSION_SWEEP_SECS: u64 = 60;

/// Upper bound on sessions held at once
pub const MAX_SESSIONS: usize = 10_000;

/// Cookie toggled by the cookie demo page
pub const LAB_COOKIE: &str = "lab2_cookie";

/// Lifetime of the demo cookie in days
pub const LAB_COOKIE_DAYS: i64 = 30;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://lab.db?mode=rwc";

/// Default administrator created by `seed`
pub const DEFAULT_ADMIN_LOGIN: &str = "admin";

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_LOGIN_REQUIRED: &str =
    "Для доступа к запрашиваемой странице необходимо войти в систему.";
pub const MSG_INVALID_CREDENTIALS: &str = "Неверный логин или пароль.";
pub const MSG_LOGGED_IN: &str = "Вход выполнен успешно.";
pub const MSG_LOGGED_OUT: &str = "Вы вышли из системы.";
pub const MSG_USER_CREATED: &str = "Пользователь успешно создан.";
pub const MSG_USER_UPDATED: &str = "Данные пользователя обновлены.";
pub const MSG_USER_DELETED: &str = "Пользователь удалён.";
pub const MSG_PASSWORD_CHANGED: &str = "Пароль успешно изменён.";
pub const MSG_COOKIE_SET: &str = "Cookie установлено";
pub const MSG_COOKIE_REMOVED: &str = "Cookie удалено";
