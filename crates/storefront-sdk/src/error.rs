//! Storefront client errors.

use storefront_auth::AuthError;
use storefront_cache::CacheError;
use storefront_commerce::CommerceError;
use storefront_data::FetchError;
use thiserror::Error;

/// Errors returned by the storefront services.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Local validation of a domain value failed.
    #[error("{0}")]
    Commerce(#[from] CommerceError),

    /// Local storage failed.
    #[error("storage error: {0}")]
    Cache(#[from] CacheError),

    /// The request failed or the server rejected it.
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),

    /// Not logged in, or not allowed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StorefrontError {
    /// The message to show inline.
    ///
    /// Server responses contribute their `message` field when present; local
    /// validation errors describe themselves; everything else shows `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            StorefrontError::Fetch(e) => e.server_message().unwrap_or_else(|| fallback.to_string()),
            StorefrontError::Commerce(CommerceError::SerializationError(_)) => fallback.to_string(),
            StorefrontError::Commerce(e) => e.to_string(),
            StorefrontError::Auth(AuthError::Cache(_)) => fallback.to_string(),
            StorefrontError::Auth(e) => e.to_string(),
            StorefrontError::Cache(_) | StorefrontError::Config(_) => fallback.to_string(),
        }
    }

    /// Whether the view should redirect to login instead of showing an error.
    pub fn requires_login(&self) -> bool {
        match self {
            StorefrontError::Auth(e) => e.is_auth_failure(),
            StorefrontError::Fetch(e) => e.status() == Some(401),
            _ => false,
        }
    }

    /// Whether the user is logged in but lacks the admin role.
    pub fn is_permission_error(&self) -> bool {
        match self {
            StorefrontError::Auth(e) => e.is_permission_error(),
            StorefrontError::Fetch(e) => e.status() == Some(403),
            _ => false,
        }
    }

    pub fn is_empty_cart(&self) -> bool {
        matches!(self, StorefrontError::Commerce(CommerceError::EmptyCart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> StorefrontError {
        FetchError::HttpError {
            status,
            message: body.to_string(),
        }
        .into()
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = http(400, r#"{"message":"Slug already exists"}"#);
        assert_eq!(err.user_message("Failed to create product"), "Slug already exists");

        let err = http(500, "Internal Server Error");
        assert_eq!(
            err.user_message("Failed to create product"),
            "Failed to create product"
        );

        let err: StorefrontError = FetchError::Timeout.into();
        assert_eq!(err.user_message("Failed to fetch cart"), "Failed to fetch cart");
    }

    #[test]
    fn test_user_message_for_local_errors() {
        let err: StorefrontError =
            CommerceError::ValidationError("please select a size".into()).into();
        assert_eq!(err.user_message("x"), "Validation error: please select a size");
    }

    #[test]
    fn test_requires_login() {
        assert!(StorefrontError::from(AuthError::LoginRequired).requires_login());
        assert!(http(401, "").requires_login());
        assert!(!http(404, "").requires_login());
        assert!(!StorefrontError::from(AuthError::AdminRequired).requires_login());
        assert!(StorefrontError::from(AuthError::AdminRequired).is_permission_error());
    }

    #[test]
    fn test_is_empty_cart() {
        assert!(StorefrontError::from(CommerceError::EmptyCart).is_empty_cart());
        assert!(!http(400, "").is_empty_cart());
    }
}
