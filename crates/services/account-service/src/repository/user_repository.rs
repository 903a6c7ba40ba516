//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr, Unchanged,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, User, UserId, FIELD_EMAIL, FIELD_USERNAME};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Writes that would duplicate a username or email fail with
/// [`AppError::Conflict`] naming the offending field.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check whether any user has this username
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// Check whether any user has this email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Insert a new user; the store assigns the ID and timestamps
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Persist the mutable fields of an existing user (email is never written)
    async fn update(&self, user: User) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash.into_string()),
            role: Set(user.role.to_string()),
            enabled: Set(user.enabled),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_err)?;
        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Unchanged(user.id),
            username: Set(user.username),
            email: Unchanged(user.email),
            password_hash: Set(user.password_hash.into_string()),
            role: Set(user.role.to_string()),
            enabled: Set(user.enabled),
            created_at: Unchanged(user.created_at),
            updated_at: Set(chrono::Utc::now()),
        };

        let model = active_model.update(&self.db).await.map_err(map_write_err)?;
        Ok(User::from(model))
    }
}

/// Translate write failures into conflicts and missing rows.
fn map_write_err(err: DbErr) -> AppError {
    if matches!(err, DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) {
        return AppError::NotFound;
    }

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            AppError::conflict(violated_field(&detail))
        }
        _ => AppError::from(err),
    }
}

/// Name the unique column from a driver message, e.g.
/// `UNIQUE constraint failed: users.username` (SQLite) or
/// `duplicate key value violates unique constraint "users_email_key"` (Postgres).
fn violated_field(detail: &str) -> &'static str {
    if detail.contains(FIELD_USERNAME) {
        FIELD_USERNAME
    } else if detail.contains(FIELD_EMAIL) {
        FIELD_EMAIL
    } else {
        "user"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violated_field_sqlite_message() {
        assert_eq!(
            violated_field("UNIQUE constraint failed: users.username"),
            "username"
        );
        assert_eq!(violated_field("UNIQUE constraint failed: users.email"), "email");
    }

    #[test]
    fn test_violated_field_postgres_message() {
        assert_eq!(
            violated_field("duplicate key value violates unique constraint \"users_email_key\""),
            "email"
        );
        assert_eq!(violated_field("something else"), "user");
    }

    #[test]
    fn test_missing_row_maps_to_not_found() {
        assert!(matches!(
            map_write_err(DbErr::RecordNotUpdated),
            AppError::NotFound
        ));
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        assert!(matches!(
            map_write_err(DbErr::Custom("boom".to_string())),
            AppError::Database(_)
        ));
    }
}
