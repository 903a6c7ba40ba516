//! Account service - registration, lookup and partial update of users.
//!
//! Uniqueness of usernames and emails is checked up front for a friendly
//! error, and enforced again by the store's unique constraints so that
//! concurrent writers cannot both win.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{
    NewUser, PasswordHasher, RegisterUser, UpdateUser, UserId, UserView, FIELD_EMAIL,
    FIELD_USERNAME,
};

use crate::repository::UserRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account with the default role, enabled
    async fn register(&self, input: RegisterUser) -> AppResult<UserView>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<UserView>;

    /// Apply a partial update; nothing is persisted unless every field passes
    async fn update_user(&self, id: UserId, changes: UpdateUser) -> AppResult<UserView>;
}

/// Concrete implementation of AccountService using a repository and hasher.
pub struct AccountManager {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, input: RegisterUser) -> AppResult<UserView> {
        input.validate()?;

        if self.repo.exists_by_username(&input.username).await? {
            tracing::warn!("Registration rejected: username already taken");
            return Err(AppError::conflict(FIELD_USERNAME));
        }
        if self.repo.exists_by_email(&input.email).await? {
            tracing::warn!("Registration rejected: email already taken");
            return Err(AppError::conflict(FIELD_EMAIL));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repo
            .insert(NewUser::new(input.username, input.email, password_hash))
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(UserView::from(user))
    }

    async fn get_user(&self, id: UserId) -> AppResult<UserView> {
        let user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        Ok(UserView::from(user))
    }

    async fn update_user(&self, id: UserId, changes: UpdateUser) -> AppResult<UserView> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        if let Some(username) = changes.username {
            if username != user.username {
                if self.repo.exists_by_username(&username).await? {
                    tracing::warn!(user_id = id, "Update rejected: username already taken");
                    return Err(AppError::conflict(FIELD_USERNAME));
                }
                user.rename(username);
            }
        }

        // Empty string means "keep the current password"
        if let Some(password) = changes.password.filter(|p| !p.is_empty()) {
            user.replace_password(self.hasher.hash(&password)?);
        }

        if let Some(enabled) = changes.enabled {
            user.set_enabled(enabled);
        }

        if let Some(email) = changes.email {
            if let Err(e) = user.ensure_email_unchanged(&email) {
                tracing::warn!(user_id = id, "Update rejected: email change attempted");
                return Err(e.into());
            }
        }

        let user = self.repo.update(user).await?;

        tracing::info!(user_id = user.id, "User updated");
        Ok(UserView::from(user))
    }
}
