//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No token stored; the view should redirect to login.
    #[error("please log in to continue")]
    LoginRequired,

    /// Logged in, but not as an admin.
    #[error("admin access required")]
    AdminRequired,

    /// Login or registration form is incomplete.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] storefront_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::LoginRequired)
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::AdminRequired)
    }
}
