//! Authentication service - Credentials, login tokens and password changes.
//!
//! Password hashing lives in the `domain::Password` value object; this
//! service only decides who may log in and what the token says.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{Config, SECONDS_PER_HOUR};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;
use domain::{
    validate_password_change, Password, User, FIELD_OLD_PASSWORD, MSG_WRONG_OLD_PASSWORD,
};

/// Hash verified when the login is unknown, so both failure paths cost one Argon2 run.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::hash("lab-portal-timing-guard").ok());

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub login: String,
    pub exp: i64,
    pub iat: i64,
}

/// A signed login token and how long the browser should keep it.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    /// Persistent ("remember me") logins outlive the browser session
    pub persistent: bool,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check a login and password; unknown logins and wrong passwords fail alike.
    async fn authenticate(&self, login: &str, password: &str) -> AppResult<User>;

    /// Sign a token for an authenticated user.
    fn issue_token(&self, user: &User, remember: bool) -> AppResult<AuthToken>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Change the password of `user`.
    ///
    /// Every problem with the submission is reported at once as
    /// [`AppError::InvalidForm`].
    async fn change_password(
        &self,
        user: &User,
        old_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> AppResult<()>;
}

/// Concrete implementation of AuthService
pub struct Authenticator<R: UserRepository> {
    users: Arc<R>,
    config: Config,
}

impl<R: UserRepository> Authenticator<R> {
    pub fn new(users: Arc<R>, config: Config) -> Self {
        Self { users, config }
    }

    fn token_lifetime(&self, remember: bool) -> i64 {
        if remember {
            self.config.remember_days * 24 * SECONDS_PER_HOUR
        } else {
            self.config.jwt_expiration_hours * SECONDS_PER_HOUR
        }
    }
}

#[async_trait]
impl<R: UserRepository> AuthService for Authenticator<R> {
    async fn authenticate(&self, login: &str, password: &str) -> AppResult<User> {
        let login = login.trim();
        let user = self.users.find_by_login(login).await?;

        let verified = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()).verify(password),
            None => {
                if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                    let _ = dummy.verify(password);
                }
                false
            }
        };

        match user {
            Some(user) if verified => {
                tracing::info!(user_id = user.id, login = %user.login, "User logged in");
                Ok(user)
            }
            _ => {
                tracing::warn!(login = %login, "Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, user: &User, remember: bool) -> AppResult<AuthToken> {
        let now = Utc::now();
        let expires_in = self.token_lifetime(remember);

        let claims = Claims {
            sub: user.id,
            login: user.login.clone(),
            exp: (now + Duration::seconds(expires_in)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(AuthToken {
            token,
            expires_in,
            persistent: remember,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn change_password(
        &self,
        user: &User,
        old_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> AppResult<()> {
        let mut errors = validate_password_change(new_password, confirmation);
        if !Password::from_hash(user.password_hash.clone()).verify(old_password) {
            errors.insert(FIELD_OLD_PASSWORD, MSG_WRONG_OLD_PASSWORD);
        }
        if !errors.is_empty() {
            return Err(AppError::InvalidForm(errors));
        }

        let password_hash = Password::hash(new_password)?.into_string();
        self.users.update_password(user.id, password_hash).await?;

        tracing::info!(user_id = user.id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;

    const SECRET: &str = "test-secret-key-at-least-32-characters";

    fn config() -> Config {
        Config::new("sqlite::memory:", SECRET).unwrap()
    }

    fn user_with_password(password: &str) -> User {
        User {
            id: 7,
            login: "user01".to_string(),
            password_hash: Password::hash(password).unwrap().into_string(),
            last_name: Some("Ivanov".to_string()),
            first_name: Some("Ivan".to_string()),
            patronymic: None,
            role_id: None,
            role: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_trims_login() {
        let user = user_with_password("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .withf(|login| login == "user01")
            .returning(move |_| Ok(Some(user.clone())));

        let auth = Authenticator::new(Arc::new(repo), config());
        let found = auth.authenticate("  user01 ", "Secret123").await.unwrap();
        assert_eq!(found.id, 7);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password() {
        let user = user_with_password("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth.authenticate("user01", "secret123").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_unknown_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().returning(|_| Ok(None));

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth.authenticate("ghost", "Secret123").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_token_round_trip_and_lifetime() {
        let auth = Authenticator::new(Arc::new(MockUserRepository::new()), config());
        let user = user_with_password("Secret123");

        let session = auth.issue_token(&user, false).unwrap();
        assert_eq!(session.expires_in, 24 * 3600);
        assert!(!session.persistent);

        let remembered = auth.issue_token(&user, true).unwrap();
        assert_eq!(remembered.expires_in, 7 * 24 * 3600);
        assert!(remembered.persistent);

        let claims = auth.verify_token(&remembered.token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.login, "user01");
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let user = user_with_password("Secret123");
        let other = Config::new("sqlite::memory:", "another-secret-key-at-least-32-chars").unwrap();
        let token = Authenticator::new(Arc::new(MockUserRepository::new()), other)
            .issue_token(&user, false)
            .unwrap()
            .token;

        let auth = Authenticator::new(Arc::new(MockUserRepository::new()), config());
        assert!(matches!(auth.verify_token(&token), Err(AppError::Jwt(_))));
        assert!(auth.verify_token("garbage").is_err());
    }

    #[tokio::test]
    async fn test_change_password_reports_every_problem() {
        let user = user_with_password("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_update_password().never();

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth.change_password(&user, "wrong", "short", "other").await;

        let Err(AppError::InvalidForm(errors)) = result else {
            panic!("expected form errors");
        };
        assert_eq!(errors.get("old_password"), Some(MSG_WRONG_OLD_PASSWORD));
        assert!(errors.contains("new_password"));
        assert!(errors.contains("new_password2"));
    }

    #[tokio::test]
    async fn test_change_password_stores_new_hash() {
        let user = user_with_password("Secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_update_password()
            .withf(|id, hash| *id == 7 && Password::from_hash(hash.clone()).verify("NewStrong1"))
            .times(1)
            .returning(|_, _| Ok(()));

        let auth = Authenticator::new(Arc::new(repo), config());
        auth.change_password(&user, "Secret123", "NewStrong1", "NewStrong1")
            .await
            .unwrap();
    }
}
