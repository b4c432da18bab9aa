//! Authentication session for the storefront client.
//!
//! Holds the bearer token and user record in the persistence port under the
//! `token` and `user` keys, and answers the authenticated/admin predicates that
//! gate protected views.

mod credentials;
mod error;
mod session;
mod user;

pub use credentials::{LoginCredentials, Registration, PROFILE_IMAGE_FIELD};
pub use error::AuthError;
pub use session::{AuthStore, TOKEN_KEY, USER_KEY};
pub use user::{AuthUser, Role};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AuthError, AuthStore, AuthUser, LoginCredentials, Registration, Role};
}
