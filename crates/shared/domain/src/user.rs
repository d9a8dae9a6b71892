//! User and role domain entities and related types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_LOGIN, FIELD_PASSWORD, FIELD_PATRONYMIC, FIELD_ROLE,
    ROLE_ADMIN,
};
use crate::form::FormFields;

/// Named group of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        self.name == ROLE_ADMIN
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub patronymic: Option<String>,
    pub role_id: Option<i32>,
    /// Role loaded alongside the user, when it has one
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Last name, first name and patronymic joined by spaces, skipping blanks.
    pub fn full_name(&self) -> String {
        [&self.last_name, &self.first_name, &self.patronymic]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_admin)
    }

    /// Editable fields of this user, as the edit form expects them.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            patronymic: self.patronymic.clone(),
            role_id: self.role_id,
        }
    }
}

/// Fields shared by the create and edit forms.
///
/// Blank text fields are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub patronymic: Option<String>,
    pub role_id: Option<i32>,
}

impl UserProfile {
    /// Read the profile fields from a submitted form.
    ///
    /// An empty or non-numeric `role` means "no role".
    pub fn from_fields<F: FormFields + ?Sized>(fields: &F) -> Self {
        Self {
            last_name: non_blank(fields.field(FIELD_LAST_NAME)),
            first_name: non_blank(fields.field(FIELD_FIRST_NAME)),
            patronymic: non_blank(fields.field(FIELD_PATRONYMIC)),
            role_id: fields.field(FIELD_ROLE).trim().parse().ok(),
        }
    }

    /// Form values used to prefill the edit form.
    pub fn to_form_values(&self) -> BTreeMap<String, String> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        BTreeMap::from([
            (FIELD_LAST_NAME.to_string(), text(&self.last_name)),
            (FIELD_FIRST_NAME.to_string(), text(&self.first_name)),
            (FIELD_PATRONYMIC.to_string(), text(&self.patronymic)),
            (
                FIELD_ROLE.to_string(),
                self.role_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
        ])
    }
}

/// Account creation data, after the form has been validated.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    /// Plain text password; hashed before it is stored
    pub password: String,
    pub profile: UserProfile,
}

impl NewUser {
    pub fn from_fields<F: FormFields + ?Sized>(fields: &F) -> Self {
        Self {
            login: fields.field(FIELD_LOGIN).trim().to_string(),
            password: fields.field(FIELD_PASSWORD).to_string(),
            profile: UserProfile::from_fields(fields),
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: i32,
    pub login: String,
    pub full_name: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub patronymic: Option<String>,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            id: user.id,
            login: user.login,
            last_name: user.last_name,
            first_name: user.first_name,
            patronymic: user.patronymic,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
