//! Login and registration payloads.

use crate::AuthError;
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::ImageFile;

/// Multipart field name for the optional avatar on registration.
pub const PROFILE_IMAGE_FIELD: &str = "profileImage";

/// Credentials posted as JSON to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::InvalidCredentials("email is required".into()));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidCredentials("password is required".into()));
        }
        Ok(())
    }
}

/// A registration form, sent as multipart so an avatar can ride along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_image: Option<ImageFile>,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
            profile_image: None,
        }
    }

    pub fn with_profile_image(mut self, image: ImageFile) -> Self {
        self.profile_image = Some(image);
        self
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.is_empty() {
            return Err(AuthError::InvalidCredentials("name is required".into()));
        }
        LoginCredentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()
    }

    /// Text fields in form order; the profile image is appended separately.
    pub fn text_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_trims_email() {
        let creds = LoginCredentials::new("  ada@x.io ", "pw");
        assert_eq!(creds.email, "ada@x.io");
        assert!(creds.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            serde_json::json!({"email": "ada@x.io", "password": "pw"})
        );
    }

    #[test]
    fn test_login_requires_password() {
        let err = LoginCredentials::new("ada@x.io", "").validate().unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_registration_fields() {
        let reg = Registration::new("Ada", "ada@x.io", "pw")
            .with_profile_image(ImageFile::new("me.jpg", vec![1, 2]));
        assert!(reg.validate().is_ok());
        assert_eq!(reg.text_fields()[0], ("name", "Ada"));
        assert_eq!(
            reg.profile_image.as_ref().map(|i| i.content_type.as_str()),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_registration_requires_name() {
        assert!(Registration::new(" ", "a@b.c", "pw").validate().is_err());
    }
}
