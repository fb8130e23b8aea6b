//! Auth context for the console
//!
//! Reactive projection of the identity provider:
//! - `state()` reads the provider's `SessionView` and re-runs readers
//!   whenever an operation changes the session
//! - `loading` is set while a login or registration is in flight
//! - `error` holds the last notice worth showing to the user
//!
//! The provider itself is the only writer of the session.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::{
    AuthError, BrowserStorage, HttpAuthBackend, Identity, IdentityProvider, RegistrationForm,
    SessionState, SessionView, landing_route,
};

/// Provider wired to the HTTP backend and browser storage
pub type ConsoleProvider = IdentityProvider<HttpAuthBackend, BrowserStorage>;

/// Failure shown above a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthNotice {
    pub message: String,
    /// Submitting the same form again may succeed
    pub retryable: bool,
}

/// Notice for an operation error. Field errors are shown next to their
/// input instead.
fn notice_for(error: &AuthError) -> Option<AuthNotice> {
    match error.field() {
        Some(field) if field != "form" => None,
        _ => Some(AuthNotice {
            message: error.to_string(),
            retryable: error.is_retryable(),
        }),
    }
}

/// Auth context providing session state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    view: StoredValue<SessionView>,
    /// Bumped after every operation that may change the session
    revision: RwSignal<u64>,
    /// Loading state for auth operations
    pub loading: RwSignal<bool>,
    /// Notice from last operation
    pub error: RwSignal<Option<AuthNotice>>,
    provider: StoredValue<Arc<ConsoleProvider>>,
}

impl AuthContext {
    /// Current session state, tracked
    pub fn state(&self) -> SessionState {
        self.revision.track();
        self.view.with_value(SessionView::state)
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Check if the stored session has not been read yet
    pub fn is_initializing(&self) -> bool {
        self.state().is_initializing()
    }

    /// Get current identity (if authenticated)
    pub fn identity(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    fn provider(&self) -> Arc<ConsoleProvider> {
        self.provider.get_value()
    }

    /// Leave the initializing state by reading the stored session
    pub fn initialize(&self) {
        self.provider().initialize();
        self.revision.update(|r| *r += 1);
    }

    /// Notify readers and record the outcome of an operation
    fn finish<T>(
        &self,
        provider: &ConsoleProvider,
        result: Result<T, AuthError>,
    ) -> Result<T, AuthError> {
        self.revision.update(|r| *r += 1);
        self.loading.set(provider.is_busy());

        if let Err(e) = &result
            && let Some(notice) = notice_for(e)
        {
            self.error.set(Some(notice));
        }

        result
    }

    /// Sign in with email and password
    pub async fn login(self, email: String, password: String) -> Result<Identity, AuthError> {
        let provider = self.provider();
        self.loading.set(true);
        self.error.set(None);

        let result = provider.login(&email, &password).await;
        self.finish(&provider, result)
    }

    /// Create an account and sign in with it
    pub async fn register(self, form: RegistrationForm) -> Result<Identity, AuthError> {
        let provider = self.provider();
        self.loading.set(true);
        self.error.set(None);

        let result = provider.register(&form).await;
        self.finish(&provider, result)
    }

    /// Sign out the current user
    pub fn logout(&self) -> Result<(), AuthError> {
        let provider = self.provider();
        let result = provider.logout();
        self.finish(&provider, result)
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context() -> AuthContext {
    // Starts initializing on both server and client to avoid hydration mismatch
    let provider = Arc::new(ConsoleProvider::new(
        HttpAuthBackend::default(),
        BrowserStorage,
    ));

    let ctx = AuthContext {
        view: StoredValue::new(provider.view()),
        revision: RwSignal::new(0),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        provider: StoredValue::new(provider),
    };

    // Restore the session from localStorage after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            ctx.initialize();
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Send a visitor who already has a session to their landing route.
///
/// Only the session restored at startup triggers this. A sign-in that
/// completes later is routed by the form that started it.
pub fn use_redirect_when_signed_in() {
    let auth = use_auth_context();
    let navigate = use_navigate();

    Effect::new(move |settled: Option<bool>| {
        if settled == Some(true) {
            return true;
        }

        match auth.state() {
            SessionState::Initializing => false,
            SessionState::Anonymous => true,
            SessionState::Authenticated(identity) => {
                navigate(landing_route(Some(&identity)).path(), Default::default());
                true
            }
        }
    });
}
