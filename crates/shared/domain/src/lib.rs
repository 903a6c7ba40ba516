//! Domain layer - Core account entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence and transport live in the service crates.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Argon2Hasher, Password, PasswordHasher};
pub use user::{NewUser, RegisterUser, UpdateUser, User, UserId, UserRole, UserView};
