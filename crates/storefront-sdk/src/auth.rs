//! Login, registration and the stored session.

use crate::{ApiClient, StorefrontError};
use storefront_auth::{AuthUser, LoginCredentials, Registration, PROFILE_IMAGE_FIELD};
use storefront_data::{Method, MultipartForm};

/// `/auth` endpoints plus the session predicates views gate on.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/login`. The session is stored when the response has a token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser, StorefrontError> {
        credentials.validate()?;
        let request = self
            .api
            .request(Method::Post, "/auth/login")?
            .json(credentials)?;
        let user: AuthUser = self.api.execute(request).await?.json()?;
        self.api.auth().persist(&user)?;
        Ok(user)
    }

    /// `POST /auth/register` as multipart, with the optional profile image.
    pub async fn register(&self, registration: &Registration) -> Result<AuthUser, StorefrontError> {
        registration.validate()?;
        let mut form = registration
            .text_fields()
            .into_iter()
            .fold(MultipartForm::new(), |form, (name, value)| form.text(name, value));
        if let Some(image) = &registration.profile_image {
            form = form.file(
                PROFILE_IMAGE_FIELD,
                image.file_name.clone(),
                image.content_type.clone(),
                image.bytes.clone(),
            );
        }

        let request = self
            .api
            .request(Method::Post, "/auth/register")?
            .multipart(form);
        let user: AuthUser = self.api.execute(request).await?.json()?;
        self.api.auth().persist(&user)?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), StorefrontError> {
        Ok(self.api.auth().logout()?)
    }

    pub fn current_user(&self) -> Result<Option<AuthUser>, StorefrontError> {
        Ok(self.api.auth().current_user()?)
    }

    pub fn is_authenticated(&self) -> Result<bool, StorefrontError> {
        Ok(self.api.auth().is_authenticated()?)
    }

    pub fn is_admin(&self) -> Result<bool, StorefrontError> {
        Ok(self.api.auth().is_admin()?)
    }
}
