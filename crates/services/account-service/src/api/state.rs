//! Application state for dependency injection.

use std::sync::Arc;

use domain::PasswordHasher;

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{AccountManager, AccountService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account use cases
    pub account_service: Arc<dyn AccountService>,
    /// Database handle for health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM store and the given hasher into an account manager.
    pub fn from_database(database: Arc<Database>, hasher: Arc<dyn PasswordHasher>) -> Self {
        let user_repo = Arc::new(UserStore::new(database.get_connection()));
        let account_service = Arc::new(AccountManager::new(user_repo, hasher));

        Self::new(account_service, database)
    }

    /// Create new app state with manually injected services.
    pub fn new(account_service: Arc<dyn AccountService>, database: Arc<Database>) -> Self {
        Self {
            account_service,
            database,
        }
    }
}
