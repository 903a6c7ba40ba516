//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_EMAIL, FIELD_PASSWORD, FIELD_USERNAME, ROLE_ADMIN, ROLE_USER};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Store-assigned user identifier
pub type UserId = i64;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: Password,
    pub role: UserRole,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Change the username (uniqueness is checked by the caller)
    pub fn rename(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password digest
    pub fn replace_password(&mut self, password_hash: Password) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Enable or disable the account
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.updated_at = Utc::now();
    }

    /// Email is fixed at registration; any differing value is rejected.
    pub fn ensure_email_unchanged(&self, email: &str) -> DomainResult<()> {
        if email != self.email {
            return Err(DomainError::rejected_field_change(FIELD_EMAIL));
        }
        Ok(())
    }
}

/// Insert payload for a user that has no identifier yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Password,
    pub role: UserRole,
    pub enabled: bool,
}

impl NewUser {
    /// New account with the default role, enabled
    pub fn new(username: String, email: String, password_hash: Password) -> Self {
        Self {
            username,
            email,
            password_hash,
            role: UserRole::User,
            enabled: true,
        }
    }
}

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterUser {
    /// Reject blank username, email or password
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            (FIELD_USERNAME, &self.username),
            (FIELD_EMAIL, &self.email),
            (FIELD_PASSWORD, &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

/// Partial update input; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub enabled: Option<bool>,
    pub email: Option<String>,
}

/// User view (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserView {
    /// Unique user identifier
    pub id: UserId,
    /// Login name
    pub username: String,
    /// User email address
    pub email: String,
    /// User role
    pub role: String,
    /// Whether the account is enabled
    pub enabled: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            enabled: user.enabled,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            enabled: user.enabled,
        }
    }
}
