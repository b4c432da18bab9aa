//! Persisted auth session.

use crate::{AuthError, AuthUser};
use storefront_cache::Cache;

/// Storage key for the bare bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON user record.
pub const USER_KEY: &str = "user";

/// Token and user record kept in the client's key-value storage.
///
/// "Authenticated" means a token is stored; the token is never validated locally.
#[derive(Debug, Clone)]
pub struct AuthStore {
    cache: Cache,
}

impl AuthStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Save a login/registration response.
    ///
    /// Nothing is written unless the response carries a token. Returns whether the
    /// session was stored.
    pub fn persist(&self, user: &AuthUser) -> Result<bool, AuthError> {
        let Some(token) = user.token.as_deref().filter(|t| !t.is_empty()) else {
            tracing::warn!(email = %user.email, "auth response without token, session not stored");
            return Ok(false);
        };
        self.cache.set_string(TOKEN_KEY, token)?;
        self.cache.set(USER_KEY, user)?;
        tracing::info!(email = %user.email, role = user.role.as_str(), "session stored");
        Ok(true)
    }

    /// Remove token and user.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.cache.delete(TOKEN_KEY)?;
        self.cache.delete(USER_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .cache
            .get_string(TOKEN_KEY)?
            .filter(|t| !t.is_empty()))
    }

    /// The stored user record, if any.
    pub fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.cache.get(USER_KEY)?)
    }

    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.token()?.is_some())
    }

    /// True when the stored user has the admin role.
    pub fn is_admin(&self) -> Result<bool, AuthError> {
        Ok(self
            .current_user()?
            .map(|u| u.is_admin())
            .unwrap_or(false))
    }

    /// The stored token, or [`AuthError::LoginRequired`].
    pub fn require_authenticated(&self) -> Result<String, AuthError> {
        self.token()?.ok_or(AuthError::LoginRequired)
    }

    /// Gate for admin-only operations.
    pub fn require_admin(&self) -> Result<String, AuthError> {
        let token = self.require_authenticated()?;
        if self.is_admin()? {
            Ok(token)
        } else {
            Err(AuthError::AdminRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn user(role: Role, token: Option<&str>) -> AuthUser {
        AuthUser {
            name: "Ada".into(),
            email: "ada@x.io".into(),
            role,
            token: token.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_persist_with_token() {
        let cache = Cache::memory();
        let store = AuthStore::new(cache.clone());

        assert!(store.persist(&user(Role::User, Some("abc"))).unwrap());
        assert_eq!(cache.get_string(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert!(store.is_authenticated().unwrap());
        assert!(!store.is_admin().unwrap());
        assert_eq!(store.current_user().unwrap().unwrap().name, "Ada");
    }

    #[test]
    fn test_persist_without_token_writes_nothing() {
        let cache = Cache::memory();
        let store = AuthStore::new(cache.clone());

        assert!(!store.persist(&user(Role::Admin, None)).unwrap());
        assert!(cache.keys().unwrap().is_empty());
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_logout() {
        let store = AuthStore::new(Cache::memory());
        store.persist(&user(Role::Admin, Some("t"))).unwrap();
        assert!(store.is_admin().unwrap());

        store.logout().unwrap();
        assert!(!store.is_authenticated().unwrap());
        assert!(store.current_user().unwrap().is_none());
        // Logging out twice is fine.
        store.logout().unwrap();
    }

    #[test]
    fn test_require_gates() {
        let store = AuthStore::new(Cache::memory());
        assert!(matches!(
            store.require_authenticated(),
            Err(AuthError::LoginRequired)
        ));
        assert!(matches!(store.require_admin(), Err(AuthError::LoginRequired)));

        store.persist(&user(Role::User, Some("t"))).unwrap();
        assert_eq!(store.require_authenticated().unwrap(), "t");
        assert!(matches!(store.require_admin(), Err(AuthError::AdminRequired)));

        store.persist(&user(Role::Admin, Some("t2"))).unwrap();
        assert_eq!(store.require_admin().unwrap(), "t2");
    }
}
