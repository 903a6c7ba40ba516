//! Domain-level constants.
//!
//! These constants define business rules and the names used in
//! user-facing error messages.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "USER";

/// Administrator role (never assigned by this service)
pub const ROLE_ADMIN: &str = "ADMIN";

// =============================================================================
// Field names
// =============================================================================

/// Unique login name of an account
pub const FIELD_USERNAME: &str = "username";

/// Unique, immutable email address of an account
pub const FIELD_EMAIL: &str = "email";

/// Plain text password (only ever seen on input)
pub const FIELD_PASSWORD: &str = "password";
