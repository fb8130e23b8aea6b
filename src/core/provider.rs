//! Identity provider: the single writer of the current session
//!
//! Holds the session state machine
//! (`Initializing -> Anonymous | Authenticated`), owns the session store
//! and serializes identity-changing operations. Guards and views get a
//! read-only `SessionView`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use leptos::logging;

use super::backend::AuthBackend;
use super::error::AuthError;
use super::identity::Identity;
use super::session_store::{SessionStore, StorageBackend};
use super::validation::{RegistrationForm, validate_login, validate_registration};

/// Current session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Stored session not read yet
    #[default]
    Initializing,
    /// Nobody is signed in
    Anonymous,
    /// Signed in
    Authenticated(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self, SessionState::Initializing)
    }
}

type SharedState = Arc<RwLock<SessionState>>;

fn read_state(state: &SharedState) -> SessionState {
    match state.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn write_state(state: &SharedState, next: SessionState) {
    match state.write() {
        Ok(mut guard) => *guard = next,
        Err(poisoned) => *poisoned.into_inner() = next,
    }
}

/// Read-only projection of the provider's state
#[derive(Debug, Clone)]
pub struct SessionView {
    state: SharedState,
}

impl SessionView {
    /// Current state, read fresh on every call
    pub fn state(&self) -> SessionState {
        read_state(&self.state)
    }

    pub fn current(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }
}

/// Holds the busy flag for the duration of one identity-changing operation
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AuthError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self { flag })
            .map_err(|_| AuthError::ConcurrentAuthOperation)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Authority over who is using the console
pub struct IdentityProvider<B, S> {
    backend: B,
    store: SessionStore<S>,
    state: SharedState,
    busy: AtomicBool,
}

impl<B, S> IdentityProvider<B, S>
where
    B: AuthBackend,
    S: StorageBackend,
{
    /// Create a provider in the `Initializing` state
    pub fn new(backend: B, storage: S) -> Self {
        Self {
            backend,
            store: SessionStore::new(storage),
            state: Arc::new(RwLock::new(SessionState::Initializing)),
            busy: AtomicBool::new(false),
        }
    }

    /// Read the stored session and leave `Initializing`.
    ///
    /// Only the first call has an effect; later calls return the current
    /// state unchanged.
    pub fn initialize(&self) -> SessionState {
        let current = self.state();
        if !current.is_initializing() {
            return current;
        }

        let next = match self.store.load() {
            Some(identity) => {
                logging::log!("Restored session for {} ({})", identity.email, identity.role);
                SessionState::Authenticated(identity)
            }
            None => SessionState::Anonymous,
        };

        write_state(&self.state, next.clone());
        next
    }

    pub fn state(&self) -> SessionState {
        read_state(&self.state)
    }

    pub fn current(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            state: Arc::clone(&self.state),
        }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a login or registration is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn ensure_initialized(&self) -> Result<(), AuthError> {
        if self.state().is_initializing() {
            Err(AuthError::NotInitialized)
        } else {
            Ok(())
        }
    }

    /// Persist first, then publish. A guard never observes an
    /// authenticated state whose session is not yet written.
    fn establish(&self, identity: Identity) -> Identity {
        self.store.save(&identity);
        write_state(&self.state, SessionState::Authenticated(identity.clone()));
        identity
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.ensure_initialized()?;
        let _busy = BusyGuard::acquire(&self.busy)?;

        validate_login(email, password)?;

        let profile = self
            .backend
            .authenticate(email.trim(), password)
            .await
            .inspect_err(|e| logging::warn!("Login failed: {}", e))?;
        let identity = profile.into_identity()?;

        logging::log!("Signed in as {} ({})", identity.email, identity.role);
        Ok(self.establish(identity))
    }

    /// Create an account and sign in with it
    pub async fn register(&self, form: &RegistrationForm) -> Result<Identity, AuthError> {
        self.ensure_initialized()?;
        let _busy = BusyGuard::acquire(&self.busy)?;

        validate_registration(form)?;

        let mut profile = self
            .backend
            .create_account(form)
            .await
            .inspect_err(|e| logging::warn!("Registration failed: {}", e))?;

        // The form fills in whatever the backend left out.
        profile.name = profile.name.or_else(|| form.name.clone());
        profile.phone_number = profile.phone_number.or_else(|| form.phone_number.clone());
        profile.department_id = profile.department_id.or_else(|| form.department());
        let identity = profile.into_identity()?;

        logging::log!("Registered {} ({})", identity.email, identity.role);
        Ok(self.establish(identity))
    }

    /// Sign out. Safe to call when nobody is signed in.
    ///
    /// Rejected before the stored session has been read and while a login
    /// or registration is in flight.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.ensure_initialized()?;
        let _busy = BusyGuard::acquire(&self.busy)?;

        write_state(&self.state, SessionState::Anonymous);
        self.store.clear();
        Ok(())
    }
}
