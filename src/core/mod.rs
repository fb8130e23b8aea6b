//! Session and role-based access control for the console

#[cfg(feature = "ssr")]
pub mod api_proxy;
pub mod backend;
#[cfg(feature = "ssr")]
pub mod config;
mod error;
pub mod guard;
mod identity;
pub mod provider;
pub mod routes;
pub mod session_store;
#[cfg(test)]
mod tests;
pub mod validation;

pub use backend::{AuthBackend, BackendProfile, DEFAULT_API_BASE, HttpAuthBackend};
pub use error::{AuthError, StorageError};
pub use guard::{GuardDecision, decide, decide_route};
pub use identity::{Identity, Role};
pub use provider::{IdentityProvider, SessionState, SessionView};
pub use routes::{AppRoute, PostAuthRedirect, RouteAccess, canonical_route, landing_route};
pub use session_store::{
    BrowserStorage, MemoryStorage, SESSION_STORAGE_KEY, SessionStore, StorageBackend,
};
pub use validation::{FieldError, RegistrationForm, registration_errors, validate_registration};
